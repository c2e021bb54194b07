//! Tipos compartilhados
//!
//! - TableRow / Header: células da planilha como texto
//! - RowPosition: linha 1-based na planilha de origem (cabeçalho = linha 1)
//! - MatchSet: linhas selecionadas com suas posições

use serde::{Deserialize, Serialize};

/// Linha da tabela (pode ser mais curta que o cabeçalho)
pub type TableRow = Vec<String>;

/// Nomes das colunas
pub type Header = Vec<String>;

/// Primeira linha de dados na planilha de origem
pub const FIRST_DATA_LINE: u32 = 2;

/// MIME type do arquivo exportado
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Linha selecionada e sua posição na origem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRow {
    pub row: TableRow,
    pub position: u32,
}

/// Resultado da conciliação, na ordem original da tabela
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    pub rows: Vec<MatchedRow>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Posições (linhas 1-based) das linhas selecionadas
    pub fn positions(&self) -> Vec<u32> {
        self.rows.iter().map(|m| m.position).collect()
    }

    pub fn table_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().map(|m| &m.row)
    }
}

/// Arquivo gerado para download
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub row_count: usize,
}

/// Intervalo escrito em uma coluna (linhas inclusivas)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnWrite {
    pub column: String,
    pub start_line: u32,
    pub end_line: u32,
    pub values: Vec<String>,
}

impl ColumnWrite {
    pub fn line_count(&self) -> usize {
        (self.end_line - self.start_line + 1) as usize
    }
}

/// O que a exportação fez
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub artifact: ExportArtifact,
    pub positions: Vec<u32>,
    pub writes: Vec<ColumnWrite>,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_set_positions() {
        let set = MatchSet {
            rows: vec![
                MatchedRow { row: vec!["S1".into()], position: 2 },
                MatchedRow { row: vec!["S4".into()], position: 5 },
            ],
        };
        assert_eq!(set.len(), 2);
        assert_eq!(set.positions(), vec![2, 5]);
        assert_eq!(set.table_rows().count(), 2);
    }

    #[test]
    fn test_column_write_line_count() {
        let write = ColumnWrite {
            column: "AF".into(),
            start_line: 3,
            end_line: 7,
            values: vec![String::new(); 5],
        };
        assert_eq!(write.line_count(), 5);
    }
}
