//! Estado da sessão de leitura
//!
//! Idle → Collecting (leitura) → Exporting → Success | NoMatches | erro,
//! voltando sempre para Collecting. Só "limpar" esvazia a lista.
//!
//! ## Histórico de alterações
//! - 2026-10-18: criação inicial
//! - 2026-10-18: exportação repetida vira `Error::Busy`

use crate::error::{Error, Result};
use crate::selector::SampleSelector;
use crate::types::ExportReport;

/// Resultado da última exportação, para exibição
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exported { file_name: String, row_count: usize },
    Warning(String),
    Failed(String),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Exported { row_count, .. } => {
                format!("✔️ {} amostra(s) exportada(s).", row_count)
            }
            Outcome::Warning(msg) => format!("⚠ {}", msg),
            Outcome::Failed(msg) => format!("❌ {}", msg),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub selector: SampleSelector,
    /// Texto do campo de leitura
    pub pending_input: String,
    exporting: bool,
    last_outcome: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter no campo de leitura: adiciona e limpa o campo
    pub fn on_scan(&mut self) -> bool {
        let input = std::mem::take(&mut self.pending_input);
        self.selector.add(&input)
    }

    pub fn on_clear(&mut self) {
        self.selector.clear();
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Inicia a exportação e devolve a lista a processar
    ///
    /// Lista vazia é reportada sem mudar de estado.
    pub fn begin_export(&mut self) -> Result<SampleSelector> {
        if self.exporting {
            return Err(Error::Busy);
        }
        if self.selector.is_empty() {
            self.last_outcome = Some(Outcome::Warning(Error::EmptySelection.to_string()));
            return Err(Error::EmptySelection);
        }
        self.exporting = true;
        Ok(self.selector.clone())
    }

    /// Registra o resultado; a lista de amostras é mantida
    pub fn finish_export(&mut self, result: &Result<ExportReport>) -> &Outcome {
        self.exporting = false;
        let outcome = match result {
            Ok(report) => Outcome::Exported {
                file_name: report.artifact.file_name.clone(),
                row_count: report.artifact.row_count,
            },
            Err(err) if err.is_warning() => Outcome::Warning(err.to_string()),
            Err(err) => Outcome::Failed(err.to_string()),
        };
        self.last_outcome.insert(outcome)
    }
}
