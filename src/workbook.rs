//! Planilha local (.xlsx/.xls/.ods) como origem offline
//!
//! As escritas ficam só em memória; o arquivo não é alterado.

use crate::error::{AppError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use sample_select_common::{MemoryTable, TableRow};
use std::path::Path;

/// Lê a aba inteira mantendo as posições absolutas (linha 1 = cabeçalho)
pub fn read_sheet_rows(path: &Path, sheet_name: &str) -> Result<Vec<TableRow>> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::Workbook(format!("{}: {}", path.display(), e)))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(sample_select_common::Error::SourceUnavailable(sheet_name.to_string()).into());
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::Workbook(format!("{}: {}", sheet_name, e)))?;

    let Some((start_row, start_col)) = range.start() else {
        return Ok(Vec::new());
    };

    let mut rows: Vec<TableRow> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row: TableRow = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        // como a API, sem células vazias no fim
        while row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
        rows.push(row);
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Origem em memória carregada do arquivo
pub fn load_memory_table(path: &Path, sheet_name: &str) -> Result<MemoryTable> {
    let rows = read_sheet_rows(path, sheet_name)?;
    Ok(MemoryTable::new(sheet_name, rows))
}
