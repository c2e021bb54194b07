//! Escolha da origem: Google Sheets ou planilha local

use crate::cli::SourceArgs;
use crate::error::Result;
use crate::workbook::load_memory_table;
use sample_select_common::{credentials_from_settings, Settings, SheetsClient, TableSource};
use tracing::{info, warn};

/// Abre a origem uma vez por comando; as credenciais ficam dentro dela
pub async fn open_source(settings: &Settings, args: &SourceArgs) -> Result<Box<dyn TableSource>> {
    if let Some(path) = &args.source_file {
        warn!(file = %path.display(), "offline source: writes stay in memory");
        let table = load_memory_table(path, &settings.sheet_name)?;
        return Ok(Box::new(table));
    }

    let spreadsheet_id = settings.require_spreadsheet_id()?;
    let credentials = credentials_from_settings(settings).await?;
    let client = SheetsClient::new(credentials, spreadsheet_id, settings.sheet_name.clone())?;
    info!(spreadsheet = spreadsheet_id, sheet = %settings.sheet_name, "google sheets source ready");
    Ok(Box::new(client))
}
