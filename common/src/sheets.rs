//! Cliente da API Google Sheets v4
//!
//! Leitura com `valueRenderOption=FORMATTED_VALUE` (números como digitados)
//! e escrita com `valueInputOption=RAW` (sem interpretar fórmulas).
//!
//! ## Histórico de alterações
//! - 2026-10-18: criação inicial
//! - 2026-10-18: testes de status HTTP contra servidor local

use crate::auth::CredentialProvider;
use crate::column::a1_range;
use crate::error::{Error, Result};
use crate::source::TableSource;
use crate::types::TableRow;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SHEETS_API_ROOT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<[&'a str; 1]>,
}

/// Sessão com a planilha: criada uma vez e passada a quem precisa
pub struct SheetsClient {
    http: reqwest::Client,
    credentials: Box<dyn CredentialProvider>,
    api_root: String,
    spreadsheet_id: String,
    sheet_name: String,
}

impl SheetsClient {
    pub fn new(
        credentials: Box<dyn CredentialProvider>,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("cliente HTTP: {}", e)))?;
        Ok(Self {
            http,
            credentials,
            api_root: SHEETS_API_ROOT.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        })
    }

    /// Troca a raiz da API (servidores de teste)
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}/values",
            self.api_root.trim_end_matches('/'),
            self.spreadsheet_id
        ))
        .map_err(|e| Error::Config(format!("URL da API: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("URL da API sem caminho".into()))?
            .push(range);
        Ok(url)
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableSource for SheetsClient {
    fn name(&self) -> &str {
        &self.sheet_name
    }

    async fn fetch(&self) -> Result<Vec<TableRow>> {
        let token = self.credentials.access_token().await?;

        let mut url = self.values_url(&a1_range(&self.sheet_name, None))?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "FORMATTED_VALUE")
            .append_pair("majorDimension", "ROWS");
        debug!(%url, "fetching sheet");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::RemoteRead(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Error::Auth(format!("{}: {}", status, body.trim()))
                }
                // aba inexistente: "Unable to parse range"
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                    Error::SourceUnavailable(format!("{} ({})", self.sheet_name, status))
                }
                _ => Error::RemoteRead(format!("{}: {}", status, body.trim())),
            });
        }

        let payload: ValueRangeResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteRead(e.to_string()))?;

        let rows: Vec<TableRow> = payload
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        debug!(rows = rows.len(), "sheet fetched");
        Ok(rows)
    }

    async fn update_column(
        &self,
        column: &str,
        start_line: u32,
        end_line: u32,
        values: &[String],
    ) -> Result<()> {
        let token = self.credentials.access_token().await?;

        let range = a1_range(&self.sheet_name, Some((column, start_line, end_line)));
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values: values.iter().map(|v| [v.as_str()]).collect(),
        };
        debug!(%range, values = values.len(), "updating range");

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::RemoteWrite(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => Error::Auth(format!("{}: {}", status, body.trim())),
                _ => Error::RemoteWrite(format!("{} {}: {}", range, status, body.trim())),
            });
        }
        Ok(())
    }
}
