use crate::error::{AppError, Result};
use sample_select_common::Settings;

/// Aplica "chave=valor" nas configurações
pub fn apply_assignment(settings: &mut Settings, assignment: &str) -> Result<()> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| AppError::InvalidSetting(format!("use chave=valor: {}", assignment)))?;
    settings.set(key.trim(), value)?;
    Ok(())
}

pub fn print_settings(settings: &Settings) {
    let path_or_unset = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "não definido".to_string())
    };

    println!("Configurações:");
    println!("  Planilha: {}", settings.spreadsheet_id);
    println!("  Aba: {}", settings.sheet_name);
    println!("  Coluna da amostra: {}", settings.id_column);
    println!("  Coluna de status: {} (\"{}\")", settings.status_column, settings.status_value);
    println!("  Coluna de data: {} ({})", settings.date_column, settings.date_format);
    println!("  Estratégia de escrita: {}", settings.write_strategy);
    println!("  Aba exportada: {}", settings.export_sheet_name);
    println!("  Prefixo do arquivo: {}", settings.file_prefix);
    println!("  Autenticação: {:?}", settings.auth.mode);
    println!("  Client secret: {}", path_or_unset(&settings.auth.client_secret_path));
    println!("  Chave de conta de serviço: {}", path_or_unset(&settings.auth.service_account_key));
    if let Ok(path) = settings.token_cache_path() {
        println!("  Cache de token: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_assignment() {
        let mut settings = Settings::default();
        apply_assignment(&mut settings, "sheet_name=Lab 2").unwrap();
        apply_assignment(&mut settings, "status_column = ah").unwrap();
        assert_eq!(settings.sheet_name, "Lab 2");
        assert_eq!(settings.status_column, "AH");
    }

    #[test]
    fn test_apply_assignment_errors() {
        let mut settings = Settings::default();
        assert!(matches!(
            apply_assignment(&mut settings, "sheet_name"),
            Err(AppError::InvalidSetting(_))
        ));
        assert!(matches!(
            apply_assignment(&mut settings, "desconhecida=1"),
            Err(AppError::Common(_))
        ));
    }
}
