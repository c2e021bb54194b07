//! Fluxo de exportação
//!
//! busca → conciliação → atualização de status → geração do Excel.
//! Qualquer falha encerra a tentativa; nada é repetido.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::export::build_artifact;
use crate::reconcile::{match_rows, split_table};
use crate::selector::SampleSelector;
use crate::source::TableSource;
use crate::types::ExportReport;
use tracing::{info, warn};

/// Etapas com indicação de ocupado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetching,
    Writing,
    Building,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Fetching => "Buscando dados no Google Sheets...",
            Phase::Writing => "Atualizando status no Sheets...",
            Phase::Building => "Gerando arquivo Excel...",
        }
    }

    /// Número da etapa (1..=3)
    pub fn step(&self) -> usize {
        match self {
            Phase::Fetching => 1,
            Phase::Writing => 2,
            Phase::Building => 3,
        }
    }
}

/// Parâmetros de uma execução
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Só planeja as escritas, sem alterar a planilha
    pub dry_run: bool,
}

/// Executa a exportação para as amostras selecionadas
///
/// Lista vazia falha com `EmptySelection` sem nenhuma chamada remota;
/// nenhuma correspondência falha com `NoMatches` antes de escrever.
pub async fn run_export<S, F>(
    source: &S,
    selector: &SampleSelector,
    settings: &Settings,
    today: &str,
    options: RunOptions,
    mut on_phase: F,
) -> Result<ExportReport>
where
    S: TableSource + ?Sized,
    F: FnMut(Phase),
{
    if selector.is_empty() {
        return Err(Error::EmptySelection);
    }
    settings.validate()?;

    on_phase(Phase::Fetching);
    let all_rows = source.fetch().await?;
    let (header, data) = split_table(all_rows, source.name())?;
    let matches = match_rows(&header, &data, &settings.id_column, &selector.code_set())?;
    info!(rows = data.len(), matched = matches.len(), "reconciled");

    if matches.is_empty() {
        warn!(codes = selector.len(), "no sample matched");
        return Err(Error::NoMatches);
    }
    let positions = matches.positions();

    on_phase(Phase::Writing);
    let update = settings.status_update(today)?;
    let writes = if options.dry_run {
        let planned = update.plan(&positions, settings.write_strategy)?;
        for write in &planned {
            warn!(
                column = %write.column,
                start = write.start_line,
                end = write.end_line,
                "dry run: range not written"
            );
        }
        planned
    } else {
        update.apply(source, &positions, settings.write_strategy).await?
    };

    on_phase(Phase::Building);
    let artifact = build_artifact(&header, &matches, &settings.export_options(), today)?;
    info!(file = %artifact.file_name, rows = artifact.row_count, "export ready");

    Ok(ExportReport {
        artifact,
        positions,
        writes,
        dry_run: options.dry_run,
    })
}
