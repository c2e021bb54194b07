use clap::Parser;
use sample_select_common::{
    column_to_index, credentials_from_settings, index_to_column, split_table, CredentialProvider,
    RunOptions, SampleSelector, Settings, TableSource,
};
use sample_select_rust::{cli, config, error, export, logging, scan, source};
use cli::{Cli, Commands};
use error::{AppError, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_warning() => {
            eprintln!("⚠ {}", err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan { output, source: source_args } => {
            println!("🧾 amostras - Selecionar Amostras\n");
            let settings = Settings::load()?;
            let table = source::open_source(&settings, &source_args).await?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            scan::run_interactive_scan(
                table.as_ref(),
                &settings,
                &output_dir,
                RunOptions { dry_run: source_args.dry_run },
            )
            .await?;
        }

        Commands::Export { codes, codes_file, output, source: source_args } => {
            println!("📥 amostras - Gerar planilha\n");
            let settings = Settings::load()?;

            let mut selector: SampleSelector = codes.iter().collect();
            if let Some(path) = codes_file {
                if !path.exists() {
                    return Err(AppError::FileNotFound(path.display().to_string()));
                }
                let content = std::fs::read_to_string(&path)?;
                for line in content.lines() {
                    selector.add(line);
                }
            }
            // lista vazia: nenhuma chamada remota
            if selector.is_empty() {
                return Err(sample_select_common::Error::EmptySelection.into());
            }
            println!("- {} amostra(s): {}", selector.len(), selector.display());

            let table = source::open_source(&settings, &source_args).await?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_selection(
                table.as_ref(),
                &selector,
                &settings,
                &output_dir,
                RunOptions { dry_run: source_args.dry_run },
            )
            .await?;

            println!("\n✅ Concluído");
        }

        Commands::Auth => {
            let settings = Settings::load()?;
            println!("🔑 Autorizando acesso ao Google Sheets...");
            let credentials = credentials_from_settings(&settings).await?;
            credentials.access_token().await?;
            match settings.token_cache_path() {
                Ok(path) => println!("✔ Autorizado (token em {})", path.display()),
                Err(_) => println!("✔ Autorizado"),
            }
        }

        Commands::Inspect { source: source_args } => {
            let settings = Settings::load()?;
            let table = source::open_source(&settings, &source_args).await?;
            let (header, data) = split_table(table.fetch().await?, table.name())?;

            println!("Aba: {}", table.name());
            println!("Linhas de dados: {}", data.len());
            println!("Colunas:");
            for (i, name) in header.iter().enumerate() {
                println!("  {:>3}  {}", index_to_column(i), name);
            }
            let id_idx = column_to_index(&settings.id_column)?;
            match header.get(id_idx) {
                Some(name) => println!("Coluna da amostra: {} ({})", settings.id_column, name),
                None => println!("⚠ Coluna da amostra {} está fora do cabeçalho", settings.id_column),
            }
        }

        Commands::Config { show, set, reset } => {
            let path = Settings::config_path()?;
            let mut settings = if reset {
                Settings::default()
            } else {
                Settings::load_from(&path)?
            };

            for assignment in &set {
                config::apply_assignment(&mut settings, assignment)?;
            }
            if reset || !set.is_empty() {
                settings.validate()?;
                settings.save_to(&path)?;
                println!("✔ Configurações salvas: {}", path.display());
            }
            if show || (!reset && set.is_empty()) {
                config::print_settings(&settings);
            }
        }
    }

    Ok(())
}
