use crate::error::Result;
use crate::progress::PhaseSpinner;
use sample_select_common::{
    run_export, save_artifact, ExportReport, RunOptions, SampleSelector, Settings, TableSource,
};
use std::path::{Path, PathBuf};
use tracing::error;

/// Executa a exportação com indicação de etapa e grava o arquivo
pub async fn export_selection(
    source: &dyn TableSource,
    selector: &SampleSelector,
    settings: &Settings,
    output: &Path,
    options: RunOptions,
) -> Result<(ExportReport, PathBuf)> {
    let today = settings.today()?;
    let mut spinner = PhaseSpinner::new();

    let result = run_export(source, selector, settings, &today, options, |phase| spinner.phase(phase)).await;
    let report = match result {
        Ok(report) => {
            spinner.finish();
            report
        }
        Err(err) => {
            spinner.abandon();
            if !err.is_warning() {
                error!(error = %err, "export failed");
            }
            return Err(err.into());
        }
    };

    let path = save_artifact(&report.artifact, output)?;
    print_report(&report, &path);
    Ok((report, path))
}

fn print_report(report: &ExportReport, path: &Path) {
    if report.dry_run {
        println!("- Simulação: a planilha não foi alterada");
    }
    for write in &report.writes {
        println!(
            "  {} {}{}:{}{} ({} linha(s))",
            if report.dry_run { "seria escrito" } else { "escrito" },
            write.column,
            write.start_line,
            write.column,
            write.end_line,
            write.line_count()
        );
    }
    println!("✔️ {} amostra(s) exportada(s).", report.artifact.row_count);
    println!("✔ Excel: {}", path.display());
}
