//! Sessão interativa de leitura
//!
//! Cada Enter adiciona o código lido. Comandos começam com ':'.

use crate::error::{AppError, Result};
use crate::export::export_selection;
use dialoguer::Input;
use sample_select_common::{RunOptions, Session, Settings, TableSource};
use std::path::Path;

/// Ação a partir de uma linha digitada/lida
#[derive(Debug, PartialEq, Eq)]
pub enum ScanAction {
    /// Código escaneado
    Add(String),
    /// Remove um código lido por engano
    Remove(String),
    List,
    Clear,
    Export,
    Quit,
    /// Linha vazia
    Nothing,
}

pub fn parse_line(line: &str) -> ScanAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ScanAction::Nothing;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ScanAction::Add(trimmed.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "l" | "list" => ScanAction::List,
        "c" | "clear" => ScanAction::Clear,
        "e" | "export" => ScanAction::Export,
        "q" | "quit" => ScanAction::Quit,
        "r" | "remove" if !arg.is_empty() => ScanAction::Remove(arg.to_string()),
        // códigos que começam com ':' continuam valendo
        _ => ScanAction::Add(trimmed.to_string()),
    }
}

/// Roda a sessão até ':q'
pub async fn run_interactive_scan(
    source: &dyn TableSource,
    settings: &Settings,
    output: &Path,
    options: RunOptions,
) -> Result<()> {
    let mut session = Session::new();

    println!("📷 Escaneie o código de barras da amostra e pressione Enter");
    println!("---");
    println!("Comandos: [:l] lista [:c] limpar [:r CÓDIGO] remover [:e] gerar planilha [:q] sair");
    println!("---\n");

    loop {
        let line: String = Input::new()
            .with_prompt("Amostra")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::Prompt(e.to_string()))?;

        match parse_line(&line) {
            ScanAction::Nothing => {}
            ScanAction::Add(code) => {
                session.pending_input = code;
                if session.on_scan() {
                    println!("  + ({} na lista)", session.selector.len());
                } else {
                    println!("  já está na lista");
                }
            }
            ScanAction::Remove(code) => {
                if session.selector.remove(&code) {
                    println!("  - {} removida", code);
                } else {
                    println!("  {} não está na lista", code);
                }
            }
            ScanAction::List => {
                println!("### Amostras selecionadas");
                println!("{}", session.selector.display());
            }
            ScanAction::Clear => {
                session.on_clear();
                println!("🗑️ Lista limpa");
            }
            ScanAction::Export => {
                let selector = match session.begin_export() {
                    Ok(selector) => selector,
                    Err(_) => {
                        if let Some(outcome) = session.last_outcome() {
                            println!("{}", outcome.message());
                        }
                        continue;
                    }
                };

                let result = export_selection(source, &selector, settings, output, options).await;
                match result {
                    Ok((report, _path)) => {
                        session.finish_export(&Ok(report));
                    }
                    Err(err) => {
                        let err = match err {
                            AppError::Common(err) => err,
                            other => sample_select_common::Error::Export(other.to_string()),
                        };
                        let outcome = session.finish_export(&Err(err));
                        println!("{}", outcome.message());
                    }
                }
            }
            ScanAction::Quit => {
                println!("Encerrando ({} amostra(s) na lista).", session.selector.len());
                break;
            }
        }
    }

    Ok(())
}
