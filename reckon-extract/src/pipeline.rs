//! The extraction pipeline driver.
//!
//! One invocation owns all of its state; independent documents can run
//! concurrently without sharing anything. Deterministic: identical text
//! and currency produce identical output.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use reckon_core::{
    Currency, EngineConfig, ReconciliationResult, StatementMetadata, Transaction, reconcile,
};

use crate::canonicalize::canonicalize;
use crate::chain::{correct_with_balance_chain, select_orientation};
use crate::cleaner::{clean_descriptions, resolve_conflicts};
use crate::duplicates::flag_duplicates;
use crate::row::{CandidateRow, parse_row};
use crate::scanner::scan_candidates;
use crate::token::Tokenizer;

/// Everything the engine hands to the persistence and presentation
/// collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementExtraction {
    pub transactions: Vec<Transaction>,
    pub reconciliation: ReconciliationResult,
}

/// Run the full pipeline over extracted statement text and reconcile
/// against the metadata's opening/closing balances.
pub fn extract_statement(
    text: &str,
    currency: Currency,
    metadata: &StatementMetadata,
    config: &EngineConfig,
) -> Result<StatementExtraction> {
    let transactions = extract_transactions(text, currency, config)?;
    let reconciliation = reconcile(
        metadata.opening_balance,
        metadata.closing_balance,
        &transactions,
        config.reconcile_tolerance,
    );
    Ok(StatementExtraction {
        transactions,
        reconciliation,
    })
}

/// Transaction extraction without statement-level reconciliation.
pub fn extract_transactions(
    text: &str,
    currency: Currency,
    config: &EngineConfig,
) -> Result<Vec<Transaction>> {
    let tokenizer = Tokenizer::new()?;

    let candidates = scan_candidates(text, &tokenizer);
    debug!(candidates = candidates.len(), "scanned candidate lines");

    let rows: Vec<CandidateRow> = candidates
        .iter()
        .filter_map(|line| parse_row(line, &tokenizer))
        .collect();
    debug!(rows = rows.len(), "parsed rows");

    let txns: Vec<Transaction> = rows
        .into_iter()
        .map(|row| canonicalize(row, currency, config))
        .collect();

    let txns = select_orientation(txns, config);
    let txns = correct_with_balance_chain(txns, config);
    let txns = flag_duplicates(txns);
    let txns = clean_descriptions(txns, config)?;
    let txns = resolve_conflicts(txns);

    info!(transactions = txns.len(), %currency, "extraction complete");
    Ok(txns)
}
