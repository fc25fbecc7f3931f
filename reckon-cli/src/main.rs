//! reckon: extract verified transactions from bank-statement text.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use reckon_core::{
    Currency, ManualAdjustment, ReconciliationResult, StatementMetadata, Transaction,
    apply_manual_adjustments, monthly_summary,
};
use reckon_extract::{extract_statement, extract_transactions};

mod config;
mod export;
mod metadata;

#[derive(Parser, Debug)]
#[command(
    name = "reckon",
    version,
    about = "Bank-statement transaction extraction and balance reconciliation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from statement text and reconcile balances
    Extract {
        /// Plain-text statement (output of the PDF/OCR text extractor)
        input: PathBuf,

        /// Currency hint (AED or INR); unknown hints use the configured default
        #[arg(long)]
        currency: Option<String>,

        /// Stated opening balance (overrides fetched metadata)
        #[arg(long)]
        opening: Option<f64>,

        /// Stated closing balance (overrides fetched metadata)
        #[arg(long)]
        closing: Option<f64>,

        /// Engine calibration TOML; shipped defaults when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON list of manual adjustments folded into the opening balance
        #[arg(long)]
        adjustments: Option<PathBuf>,

        /// Fetch statement metadata from an Ollama-compatible endpoint
        #[arg(long)]
        ollama_url: Option<String>,

        /// Model used for metadata extraction
        #[arg(long, default_value = "qwen2.5:3b")]
        model: String,

        /// Bank-name hint forwarded to the metadata extractor
        #[arg(long)]
        bank: Option<String>,

        /// Account-holder hint forwarded to the metadata extractor
        #[arg(long)]
        holder: Option<String>,

        /// Also write the transactions to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monthly debit/credit totals over a statement's transactions
    Summary {
        /// Plain-text statement
        input: PathBuf,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        /// Currency hint (AED or INR)
        #[arg(long)]
        currency: Option<String>,

        /// Engine calibration TOML
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// What `extract` prints: everything the persistence collaborator stores.
#[derive(Debug, Serialize)]
struct ExtractReport {
    statement_metadata: StatementMetadata,
    statement_hash: Option<String>,
    reconciliation: ReconciliationResult,
    transactions: Vec<Transaction>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            input,
            currency,
            opening,
            closing,
            config,
            adjustments,
            ollama_url,
            model,
            bank,
            holder,
            csv,
        } => {
            cmd_extract(
                input, currency, opening, closing, config, adjustments, ollama_url, model, bank,
                holder, csv,
            )
            .await
        }
        Command::Summary {
            input,
            year,
            month,
            currency,
            config,
        } => cmd_summary(input, year, month, currency, config),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_extract(
    input: PathBuf,
    currency: Option<String>,
    opening: Option<f64>,
    closing: Option<f64>,
    config: Option<PathBuf>,
    adjustments: Option<PathBuf>,
    ollama_url: Option<String>,
    model: String,
    bank: Option<String>,
    holder: Option<String>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let engine_config = config::load_engine_config(config.as_deref())?;
    let text =
        fs::read_to_string(&input).with_context(|| format!("read {}", input.display()))?;
    tracing::debug!(bytes = text.len(), "loaded statement text");
    let currency = Currency::resolve(currency.as_deref(), engine_config.default_currency);

    let mut meta = match &ollama_url {
        Some(url) => {
            metadata::fetch_metadata(url, &model, &text, currency, bank.as_deref(), holder.as_deref())
                .await?
        }
        None => StatementMetadata::new(currency),
    };
    if meta.bank_name.is_none() {
        meta.bank_name = bank
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);
    }
    if opening.is_some() {
        meta.opening_balance = opening;
    }
    if closing.is_some() {
        meta.closing_balance = closing;
    }

    if let Some(path) = &adjustments {
        let raw =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let adjustments: Vec<ManualAdjustment> =
            serde_json::from_str(&raw).context("parse adjustments JSON")?;
        if let Some(balance) = meta.opening_balance {
            meta.opening_balance = Some(apply_manual_adjustments(balance, &adjustments));
        }
    }

    let extraction = extract_statement(&text, currency, &meta, &engine_config)?;

    if let Some(path) = &csv {
        export::write_csv(path, &extraction.transactions)?;
    }

    let report = ExtractReport {
        statement_hash: meta.content_hash(),
        statement_metadata: meta,
        reconciliation: extraction.reconciliation,
        transactions: extraction.transactions,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_summary(
    input: PathBuf,
    year: i32,
    month: u32,
    currency: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let engine_config = config::load_engine_config(config.as_deref())?;
    let text =
        fs::read_to_string(&input).with_context(|| format!("read {}", input.display()))?;
    let currency = Currency::resolve(currency.as_deref(), engine_config.default_currency);

    let txns = extract_transactions(&text, currency, &engine_config)?;
    let summary = monthly_summary(&txns, year, month);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
