//! Exportação das amostras selecionadas (CLI e desktop)

pub mod excel_core;

use crate::error::Result;
use crate::types::{ExportArtifact, Header, MatchSet, XLSX_MIME};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use excel_core::build_workbook_buffer;

/// Opções de exportação
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Nome da aba no arquivo gerado
    pub sheet_name: String,
    /// Prefixo do nome do arquivo
    pub file_prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Amostras".into(),
            file_prefix: "amostras".into(),
        }
    }
}

/// Nome sugerido: `<prefixo>_<data>.xlsx`, com a data segura para arquivos
pub fn suggested_file_name(prefix: &str, today: &str) -> String {
    let safe_date: String = today
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    format!("{}_{}.xlsx", prefix, safe_date)
}

/// Gera o arquivo com cabeçalho + linhas selecionadas (ordem da tabela)
pub fn build_artifact(
    header: &Header,
    matches: &MatchSet,
    options: &ExportOptions,
    today: &str,
) -> Result<ExportArtifact> {
    let bytes = build_workbook_buffer(header, matches.table_rows(), &options.sheet_name)?;
    let file_name = suggested_file_name(&options.file_prefix, today);
    debug!(file = %file_name, size = bytes.len(), "workbook built");

    Ok(ExportArtifact {
        file_name,
        mime_type: XLSX_MIME,
        bytes,
        row_count: matches.len(),
    })
}

/// Grava o arquivo. `output` pode ser uma pasta ou um caminho de arquivo.
pub fn save_artifact(artifact: &ExportArtifact, output: &Path) -> Result<PathBuf> {
    let path = if output.is_dir() || output.extension().is_none() {
        std::fs::create_dir_all(output)?;
        output.join(&artifact.file_name)
    } else {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        output.to_path_buf()
    };

    std::fs::write(&path, &artifact.bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchedRow;

    fn matches() -> MatchSet {
        MatchSet {
            rows: vec![MatchedRow { row: vec!["S2".into(), "Bob".into()], position: 3 }],
        }
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(suggested_file_name("amostras", "25/12/2024"), "amostras_25-12-2024.xlsx");
        assert_eq!(suggested_file_name("lab", "2024-12-25 10:00"), "lab_2024-12-25_10-00.xlsx");
    }

    #[test]
    fn test_build_artifact() {
        let header = vec!["ID".to_string(), "Name".to_string()];
        let artifact = build_artifact(&header, &matches(), &ExportOptions::default(), "25/12/2024").unwrap();

        assert_eq!(artifact.file_name, "amostras_25-12-2024.xlsx");
        assert_eq!(artifact.mime_type, XLSX_MIME);
        assert_eq!(artifact.row_count, 1);
        // zip (xlsx)
        assert_eq!(&artifact.bytes[..2], b"PK");
    }

    #[test]
    fn test_save_artifact_into_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("saida");
        let header = vec!["ID".to_string()];
        let artifact = build_artifact(&header, &matches(), &ExportOptions::default(), "01/02/2025").unwrap();

        let path = save_artifact(&artifact, &dir).unwrap();
        assert_eq!(path, dir.join("amostras_01-02-2025.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }
}
