use anyhow::{Context, Result};
use sample_select_common::ExportArtifact;
use std::fs;
use std::path::{Path, PathBuf};

pub fn save_artifact_to(path: &Path, artifact: &ExportArtifact) -> Result<()> {
    fs::write(path, &artifact.bytes).with_context(|| format!("gravar {}", path.display()))?;
    Ok(())
}

/// Garante a extensão .xlsx no caminho escolhido no diálogo
pub fn with_xlsx_extension(path: PathBuf) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if has_ext { path } else { path.with_extension("xlsx") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_select_common::types::XLSX_MIME;

    #[test]
    fn test_with_xlsx_extension() {
        assert_eq!(with_xlsx_extension(PathBuf::from("a/amostras")), PathBuf::from("a/amostras.xlsx"));
        assert_eq!(with_xlsx_extension(PathBuf::from("b.XLSX")), PathBuf::from("b.XLSX"));
    }

    #[test]
    fn test_save_artifact_to() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact {
            file_name: "amostras_01-02-2025.xlsx".into(),
            mime_type: XLSX_MIME,
            bytes: vec![1, 2, 3],
            row_count: 1,
        };
        let path = dir.path().join(&artifact.file_name);
        save_artifact_to(&path, &artifact).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);

        let missing = dir.path().join("nao/existe.xlsx");
        assert!(save_artifact_to(&missing, &artifact).is_err());
    }
}
