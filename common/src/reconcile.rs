//! Conciliação entre a planilha e as amostras escaneadas
//!
//! A coluna identificadora é lida como texto formatado, aparada e
//! comparada por igualdade exata com o conjunto de códigos.

use crate::column::column_to_index;
use crate::error::{Error, Result};
use crate::types::{Header, MatchSet, MatchedRow, TableRow, FIRST_DATA_LINE};
use std::collections::HashSet;

/// Separa cabeçalho e dados. Tabela vazia = aba inexistente ou sem conteúdo.
pub fn split_table(mut all_rows: Vec<TableRow>, sheet_name: &str) -> Result<(Header, Vec<TableRow>)> {
    if all_rows.is_empty() {
        return Err(Error::SourceUnavailable(sheet_name.to_string()));
    }
    let data = all_rows.split_off(1);
    let header = all_rows.pop().unwrap_or_default();
    Ok((header, data))
}

/// Seleciona as linhas cuja coluna identificadora está no conjunto
///
/// As posições começam em 2 (linha 1 é o cabeçalho) e seguem a ordem da
/// tabela, não a ordem de leitura. As linhas retornadas já vêm
/// completadas até a largura do cabeçalho.
pub fn match_rows(
    header: &[String],
    rows: &[TableRow],
    id_column: &str,
    selected: &HashSet<&str>,
) -> Result<MatchSet> {
    let id_idx = column_to_index(id_column)?;
    Ok(match_rows_at(header, rows, id_idx, selected))
}

/// Igual a `match_rows`, com o índice da coluna já resolvido
pub fn match_rows_at(
    header: &[String],
    rows: &[TableRow],
    id_idx: usize,
    selected: &HashSet<&str>,
) -> MatchSet {
    if selected.is_empty() {
        return MatchSet::default();
    }

    let matched = rows
        .iter()
        .zip(FIRST_DATA_LINE..)
        .filter(|(row, _)| {
            let sample_no = row.get(id_idx).map(|c| c.trim()).unwrap_or("");
            selected.contains(sample_no)
        })
        .map(|(row, position)| MatchedRow {
            row: pad_row(row.clone(), header.len()),
            position,
        })
        .collect();

    MatchSet { rows: matched }
}

/// Completa a linha com células vazias até `width`
///
/// A API omite células vazias no fim da linha. Linhas já com a largura
/// (ou maiores) não são alteradas.
pub fn pad_row(mut row: TableRow, width: usize) -> TableRow {
    if row.len() < width {
        row.resize(width, String::new());
    }
    row
}
