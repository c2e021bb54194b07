//! Sample Select Common Library
//!
//! Lógica compartilhada entre a CLI e o app desktop: lista de amostras,
//! conciliação com a planilha, atualização de status e exportação.

pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod reconcile;
pub mod selector;
pub mod session;
pub mod source;
pub mod status;
pub mod types;

#[cfg(feature = "sheets")]
pub mod auth;
#[cfg(feature = "sheets")]
pub mod sheets;

pub use column::{column_to_index, index_to_column};
pub use config::Settings;
pub use error::{Error, Result};
pub use export::{build_artifact, save_artifact, suggested_file_name, ExportOptions};
pub use pipeline::{run_export, Phase, RunOptions};
pub use reconcile::{match_rows, pad_row, split_table};
pub use selector::SampleSelector;
pub use session::{Outcome, Session};
pub use source::{MemoryTable, TableSource};
pub use status::{StatusUpdate, WriteStrategy};
pub use types::{ExportArtifact, ExportReport, MatchSet, MatchedRow, TableRow};

#[cfg(feature = "sheets")]
pub use auth::{credentials_from_settings, CredentialProvider};
#[cfg(feature = "sheets")]
pub use sheets::SheetsClient;
