//! Tipos de erro

use thiserror::Error;

/// Erro comum
///
/// Todas as falhas encerram a tentativa de exportação atual; nada é
/// repetido automaticamente e a lista de amostras é preservada.
#[derive(Error, Debug)]
pub enum Error {
    #[error("A lista de amostras está vazia.")]
    EmptySelection,

    #[error("Planilha vazia ou aba não encontrada: {0}")]
    SourceUnavailable(String),

    #[error("Nenhuma amostra encontrada na planilha.")]
    NoMatches,

    #[error("Uma exportação já está em andamento.")]
    Busy,

    #[error("Falha ao ler a planilha: {0}")]
    RemoteRead(String),

    #[error("Falha ao atualizar status no Sheets: {0}")]
    RemoteWrite(String),

    #[error("Falha de autorização do Google: {0}")]
    Auth(String),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro ao gerar Excel: {0}")]
    Export(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Condições reportadas como aviso e não como erro
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::NoMatches | Error::EmptySelection | Error::Busy)
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(err.to_string())
    }
}

/// Alias de Result
pub type Result<T> = std::result::Result<T, Error>;
