//! Configurações da ferramenta
//!
//! Gravadas em `~/.config/amostras/config.json`. Os valores padrão são os
//! da planilha do laboratório.
//!
//! ## Histórico de alterações
//! - 2026-10-18: criação inicial
//! - 2026-10-18: `today()` devolve erro para formato de data inválido

use crate::column::normalize_column;
use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::status::{StatusUpdate, WriteStrategy};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_SPREADSHEET_ID: &str = "1VLDQUCO3Aw4ClAvhjkUsnBxG44BTjz-MjHK04OqPxYM";

/// Tipo de credencial do Google
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// Consentimento interativo no navegador, token salvo em disco
    #[default]
    Installed,
    /// Conta de serviço (arquivo de chave JSON)
    ServiceAccount,
}

impl std::str::FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "installed" | "oauth" => Ok(AuthMode::Installed),
            "service-account" | "service_account" | "sa" => Ok(AuthMode::ServiceAccount),
            _ => Err(format!("Modo de autenticação desconhecido: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub mode: AuthMode,
    /// client_secret.json (se ausente, usa GOOGLE_CLIENT_SECRET)
    pub client_secret_path: Option<PathBuf>,
    pub service_account_key: Option<PathBuf>,
    /// Cache de tokens (padrão: token.json na pasta de configuração)
    pub token_cache: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Coluna com o número da amostra
    pub id_column: String,
    pub status_column: String,
    pub date_column: String,
    pub status_value: String,
    /// Formato strftime da data gravada e do nome do arquivo
    pub date_format: String,
    pub export_sheet_name: String,
    pub file_prefix: String,
    pub write_strategy: WriteStrategy,
    pub auth: AuthSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.into(),
            sheet_name: "Geral".into(),
            id_column: "G".into(),
            status_column: "AF".into(),
            date_column: "AG".into(),
            status_value: "Analisando Amostra".into(),
            date_format: "%d/%m/%Y".into(),
            export_sheet_name: "Amostras".into(),
            file_prefix: "amostras".into(),
            write_strategy: WriteStrategy::Span,
            auth: AuthSettings::default(),
        }
    }
}

impl Settings {
    /// Carrega do arquivo padrão e aplica variáveis de ambiente
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::config_path()?)?;
        settings.apply_env();
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("pasta pessoal não encontrada".into()))?;
        Ok(home.join(".config").join("amostras"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn token_cache_path(&self) -> Result<PathBuf> {
        match &self.auth.token_cache {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("token.json")),
        }
    }

    /// Variáveis de ambiente têm prioridade sobre o arquivo
    pub fn apply_env(&mut self) {
        if let Ok(id) = std::env::var("AMOSTRAS_SPREADSHEET_ID") {
            if !id.trim().is_empty() {
                self.spreadsheet_id = id.trim().to_string();
            }
        }
        if let Ok(name) = std::env::var("AMOSTRAS_SHEET_NAME") {
            if !name.trim().is_empty() {
                self.sheet_name = name;
            }
        }
    }

    /// Valida colunas e formato de data antes de qualquer chamada remota
    pub fn validate(&self) -> Result<()> {
        for column in [&self.id_column, &self.status_column, &self.date_column] {
            normalize_column(column)?;
        }
        if self.sheet_name.trim().is_empty() {
            return Err(Error::Config("nome da aba vazio".into()));
        }
        self.check_date_format()
    }

    fn check_date_format(&self) -> Result<()> {
        let invalid = self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(Error::Config(format!("formato de data inválido: {}", self.date_format)));
        }
        Ok(())
    }

    /// Exige um ID de planilha (somente para a origem remota)
    pub fn require_spreadsheet_id(&self) -> Result<&str> {
        let id = self.spreadsheet_id.trim();
        if id.is_empty() {
            return Err(Error::Config("spreadsheet_id não definido".into()));
        }
        Ok(id)
    }

    /// Data de hoje no formato configurado
    ///
    /// O arquivo de configuração pode ter sido editado à mão, então o
    /// formato é conferido aqui e não só em `validate`.
    pub fn today(&self) -> Result<String> {
        self.check_date_format()?;
        let mut out = String::new();
        write!(out, "{}", chrono::Local::now().format(&self.date_format))
            .map_err(|_| Error::Config(format!("formato de data inválido: {}", self.date_format)))?;
        Ok(out)
    }

    pub fn status_update(&self, today: &str) -> Result<StatusUpdate> {
        Ok(StatusUpdate {
            status_column: normalize_column(&self.status_column)?,
            date_column: normalize_column(&self.date_column)?,
            status_value: self.status_value.clone(),
            date: today.to_string(),
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.export_sheet_name.clone(),
            file_prefix: self.file_prefix.clone(),
        }
    }

    /// Altera um campo pelo nome (`config --set chave=valor`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "spreadsheet_id" => self.spreadsheet_id = value.into(),
            "sheet_name" => self.sheet_name = value.into(),
            "id_column" => self.id_column = normalize_column(value)?,
            "status_column" => self.status_column = normalize_column(value)?,
            "date_column" => self.date_column = normalize_column(value)?,
            "status_value" => self.status_value = value.into(),
            "date_format" => self.date_format = value.into(),
            "export_sheet_name" => self.export_sheet_name = value.into(),
            "file_prefix" => self.file_prefix = value.into(),
            "write_strategy" => self.write_strategy = value.parse().map_err(Error::Config)?,
            "auth.mode" => self.auth.mode = value.parse().map_err(Error::Config)?,
            "auth.client_secret_path" => self.auth.client_secret_path = optional_path(value),
            "auth.service_account_key" => self.auth.service_account_key = optional_path(value),
            "auth.token_cache" => self.auth.token_cache = optional_path(value),
            _ => return Err(Error::Config(format!("chave desconhecida: {}", key))),
        }
        Ok(())
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
