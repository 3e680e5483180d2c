use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use smartspend_core::{Ledger, filter_by_keyword, render_table};
use smartspend_finance::{
    InsightModel, LedgerStats, LlmClient, Provider, generate_insights, read_csv_path, write_csv_path,
};
use smartspend_ingest::{ExtractError, Extraction, StatementExtractor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "smartspend",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SMARTSPEND_BUILD_SHA"), ")"),
    about = "Extract a ledger from bank statement PDFs and summarize it"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the transaction ledger from a statement PDF and write CSVs
    Extract {
        /// Statement PDF
        pdf: PathBuf,

        /// Passphrase for encrypted statements
        #[arg(long)]
        password: Option<String>,

        /// Full ledger CSV (default: [export].transactions_csv)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Keyword for the filtered subset (default: [export].filter_keyword)
        #[arg(long)]
        keyword: Option<String>,

        /// Filtered subset CSV (default: [export].filtered_csv)
        #[arg(long)]
        filtered_out: Option<PathBuf>,

        /// Fail when more records than this were dropped as malformed
        #[arg(long)]
        max_malformed: Option<usize>,

        /// Do not print the ledger table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Statistics and narrative insights for a statement PDF or a ledger CSV
    Insights {
        /// Statement PDF or CSV written by `extract`
        input: PathBuf,

        #[arg(long)]
        password: Option<String>,

        /// Skip the language model; statistics only
        #[arg(long)]
        offline: bool,

        /// Override [llm].provider
        #[arg(long)]
        provider: Option<Provider>,
    },

    /// Manage ~/.smartspend/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Manage provider API keys in ~/.smartspend/auth.json
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Paste an API key for a provider
    SetKey {
        #[arg(long, default_value = "gemini")]
        provider: Provider,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg, cli.verbose);

    match cli.command {
        Command::Extract {
            pdf,
            password,
            out,
            keyword,
            filtered_out,
            max_malformed,
            quiet,
        } => {
            let Some(extraction) = extract(&cfg, &pdf, password)? else {
                return Ok(());
            };
            let ledger = &extraction.ledger;

            let out = out.unwrap_or_else(|| cfg.export.transactions_csv.clone());
            write_csv_path(ledger, &out)?;

            let keyword = keyword.unwrap_or_else(|| cfg.export.filter_keyword.clone());
            let subset = filter_by_keyword(ledger, &keyword);
            let filtered_out = filtered_out.unwrap_or_else(|| cfg.export.filtered_csv.clone());
            write_csv_path(&subset, &filtered_out)?;

            if !quiet {
                print!("{}", render_table(ledger));
                println!();
            }
            println!(
                "Extracted {} transactions from {} page(s) -> {}",
                ledger.len(),
                extraction.pages,
                out.display()
            );
            println!("{} matching {:?} -> {}", subset.len(), keyword, filtered_out.display());

            let dropped = extraction.malformed_count();
            if dropped > 0 {
                println!("Skipped {dropped} malformed record(s)");
            }
            if let Some(limit) = max_malformed.filter(|&limit| dropped > limit) {
                bail!("{dropped} malformed records exceeds --max-malformed {limit}");
            }
        }

        Command::Insights {
            input,
            password,
            offline,
            provider,
        } => {
            let ledger = if is_csv(&input) {
                read_csv_path(&input)?
            } else {
                match extract(&cfg, &input, password)? {
                    Some(extraction) => extraction.ledger,
                    None => return Ok(()),
                }
            };
            insights(&cfg, &ledger, offline, provider)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },

        Command::Auth { command } => match command {
            AuthCommand::SetKey { provider } => auth::paste_api_key(provider)?,
        },
    }

    Ok(())
}

fn init_logging(cfg: &Config, verbose: bool) {
    let default_level = if verbose { "debug" } else { cfg.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Run the extraction pipeline on `pdf`. `None` means the statement held no
/// transactions, which is reported but not treated as a failure.
fn extract(cfg: &Config, pdf: &Path, password: Option<String>) -> Result<Option<Extraction>> {
    let bytes = fs::read(pdf).with_context(|| format!("read {}", pdf.display()))?;
    let extractor = StatementExtractor::new(&cfg.profile).context("invalid [profile] in config")?;

    let result = match extractor.extract_pdf(&bytes, password.as_deref()) {
        Err(ExtractError::PasswordRequired) if password.is_none() => {
            info!("statement is encrypted");
            let pass = auth::prompt_secret("Statement password")?;
            extractor.extract_pdf(&bytes, Some(&pass))
        }
        other => other,
    };

    match result {
        Ok(extraction) => Ok(Some(extraction)),
        Err(ExtractError::NoTransactionsFound) => {
            warn!(path = %pdf.display(), "no transactions found in statement");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("extract {}", pdf.display())),
    }
}

fn insights(cfg: &Config, ledger: &Ledger, offline: bool, provider: Option<Provider>) -> Result<()> {
    let stats = LedgerStats::from_ledger(ledger, &cfg.profile.keywords);
    print!("{}", stats.render());
    println!();

    let client = if offline {
        None
    } else {
        let provider = provider.unwrap_or(cfg.llm.provider);
        let api_key = auth::load_auth()?.key_for(provider);
        if api_key.is_none() {
            warn!("no {provider} api key; run: smartspend auth set-key --provider {provider}");
        }
        let llm = cfg.llm.to_llm_config(provider, api_key);
        debug!(provider = %llm.provider, model = %llm.model, "summarizing with language model");
        Some(LlmClient::new(llm))
    };

    let out = generate_insights(client.as_ref().map(|c| c as &dyn InsightModel), ledger, &stats);
    println!("{}", out.text);
    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}
