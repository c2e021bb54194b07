use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "amostras")]
#[command(about = "Seleciona amostras por código de barras e gera planilha Excel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logs detalhados (nível DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Origem da tabela e modo de escrita
#[derive(clap::Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Usa uma planilha local (.xlsx) em vez do Google Sheets; nada é gravado nela
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Não atualiza status/data na planilha, só mostra o que seria escrito
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sessão interativa: escaneie códigos e exporte
    Scan {
        /// Pasta ou arquivo de saída (padrão: pasta atual)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Exporta de uma vez os códigos informados
    Export {
        /// Códigos das amostras
        codes: Vec<String>,

        /// Arquivo com um código por linha
        #[arg(short = 'f', long)]
        codes_file: Option<PathBuf>,

        /// Pasta ou arquivo de saída (padrão: pasta atual)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Autoriza o acesso ao Google Sheets e guarda o token
    Auth,

    /// Mostra o cabeçalho e o total de linhas da planilha
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Mostra/edita as configurações
    Config {
        /// Mostra as configurações
        #[arg(long)]
        show: bool,

        /// Altera um valor (chave=valor), ex.: --set id_column=G
        #[arg(long, value_name = "CHAVE=VALOR")]
        set: Vec<String>,

        /// Volta aos valores padrão
        #[arg(long)]
        reset: bool,
    },
}
