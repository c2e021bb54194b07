//! Casos de erro da CLI
//!
//! ## Histórico de alterações
//! - 2026-10-18: criação inicial

use sample_select_common::Error;
use sample_select_rust::error::AppError;
use sample_select_rust::workbook::{load_memory_table, read_sheet_rows};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_missing_workbook() {
    let result = read_sheet_rows(Path::new("/nonexistent/path/12345.xlsx"), "Geral");
    assert!(matches!(result, Err(AppError::FileNotFound(_))));
}

#[test]
fn test_missing_sheet_is_source_unavailable() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("lab.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Outra").unwrap();
    sheet.write_string(0, 0, "Amostra").unwrap();
    workbook.save(&path).unwrap();

    let err = load_memory_table(&path, "Geral").unwrap_err();
    assert!(matches!(err, AppError::Common(Error::SourceUnavailable(_))));
    assert!(!err.is_warning());
}

#[test]
fn test_not_a_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notas.xlsx");
    std::fs::write(&path, "isto não é uma planilha").unwrap();

    assert!(matches!(read_sheet_rows(&path, "Geral"), Err(AppError::Workbook(_))));
}

#[test]
fn test_warnings_and_failures() {
    assert!(AppError::from(Error::EmptySelection).is_warning());
    assert!(AppError::from(Error::NoMatches).is_warning());
    assert!(!AppError::from(Error::RemoteWrite("403".into())).is_warning());
    assert!(!AppError::FileNotFound("x".into()).is_warning());
}

#[test]
fn test_error_display() {
    let errors = vec![
        AppError::from(Error::EmptySelection),
        AppError::from(Error::NoMatches),
        AppError::from(Error::SourceUnavailable("Geral".into())),
        AppError::from(Error::Auth("token expirado".into())),
        AppError::FileNotFound("lab.xlsx".into()),
        AppError::Workbook("corrompido".into()),
        AppError::Prompt("sem terminal".into()),
        AppError::InvalidSetting("x".into()),
    ];

    for err in errors {
        assert!(!err.to_string().is_empty(), "mensagem vazia: {:?}", err);
    }
    // transparente: a mensagem da biblioteca passa sem prefixo
    assert_eq!(
        AppError::from(Error::EmptySelection).to_string(),
        Error::EmptySelection.to_string()
    );
}
