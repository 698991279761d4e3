use anyhow::{Context, Result, bail};
use barik_core::Language;
use barik_ingest::{LedgerBuilder, PagedDocument};
use barik_stats::compute_stats;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod report;
mod state;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "barik",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BARIK_BUILD_SHA"), ")"),
    about = "Trips and spending from a Barik card statement"
)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute trip and spending statistics from a statement page dump
    Stats {
        /// JSON page dump: an array of pages, each an array of {text, x, y}
        #[arg(long)]
        input: PathBuf,

        /// Label language (es, eu); defaults to the config value
        #[arg(long)]
        lang: Option<Language>,

        /// Print the full statistics as JSON
        #[arg(long)]
        json: bool,

        /// Override the row grouping threshold
        #[arg(long)]
        row_threshold: Option<f64>,
    },

    /// Print the reconstructed transaction ledger
    Ledger {
        #[arg(long)]
        input: PathBuf,

        /// Write the ledger to this CSV file instead of printing it
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        row_threshold: Option<f64>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config to ~/.barik/config.toml
    Init,
    /// Show the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Stats {
            input,
            lang,
            json,
            row_threshold,
        } => {
            let cfg = load_config()?;
            let ledger = load_ledger(&input, &cfg, row_threshold).await?;

            let language = lang.unwrap_or(cfg.report.language);
            let stats = compute_stats(&ledger, language.locale());

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Parsed {} transactions from {}\n", ledger.len(), input.display());
                print!("{}", report::render_stats(&stats)?);
            }
        }

        Command::Ledger {
            input,
            csv,
            row_threshold,
        } => {
            let cfg = load_config()?;
            let ledger = load_ledger(&input, &cfg, row_threshold).await?;

            match csv {
                Some(path) => {
                    export::export_ledger_csv(&path, &ledger)?;
                    println!("Wrote {} transactions to {}", ledger.len(), path.display());
                }
                None => print!("{}", report::render_ledger(&ledger)?),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_ledger(
    input: &Path,
    cfg: &Config,
    row_threshold: Option<f64>,
) -> Result<Vec<barik_core::Transaction>> {
    if !input.exists() {
        bail!("page dump not found: {} (pass --input <pages.json>)", input.display());
    }

    let mut options = cfg.ingest.clone();
    if let Some(t) = row_threshold {
        options.row_threshold = t;
    }

    let doc = PagedDocument::load(input)
        .await
        .with_context(|| format!("loading {}", input.display()))?;
    tracing::info!(path = %input.display(), pages = doc.pages.len(), "loaded page dump");
    let builder = LedgerBuilder::new(&options)?;

    builder
        .build(&doc)
        .await
        .with_context(|| format!("extracting transactions from {}", input.display()))
}
