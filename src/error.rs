use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] sample_select_common::Error),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Erro ao ler a planilha local: {0}")]
    Workbook(String),

    #[error("Entrada interativa falhou: {0}")]
    Prompt(String),

    #[error("Configuração inválida: {0}")]
    InvalidSetting(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Avisos (lista vazia, nenhuma correspondência) não são falhas graves
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Common(err) if err.is_warning())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
