//! Description cleanup and residual debit/credit conflict resolution.

use anyhow::Result;
use regex::Regex;

use reckon_core::{Direction, EngineConfig, Transaction};

/// Strip noise tokens from every description: embedded short dates
/// (`02/11`), currency+amount compounds (`AED1050.00`), long numeric
/// chunks (leaked reference numbers), and known transaction-type
/// prefixes. Removed tokens go to the audit trail, never silently away.
/// A cleanup that would empty the description keeps the original.
pub fn clean_descriptions(
    mut txns: Vec<Transaction>,
    config: &EngineConfig,
) -> Result<Vec<Transaction>> {
    let short_date = Regex::new(r"^\d{2}/\d{2}$")?;
    let currency_amount = Regex::new(r"^[A-Z]{3}\d+(\.\d{1,2})?$")?;
    let numeric_chunk = Regex::new(r"^\d{4,}$")?;

    for t in &mut txns {
        let mut kept: Vec<&str> = Vec::new();
        let mut removed: Vec<String> = Vec::new();

        for tok in t.description.split_whitespace() {
            let is_noise = short_date.is_match(tok)
                || currency_amount.is_match(tok)
                || numeric_chunk.is_match(tok)
                || config
                    .description_noise_prefixes
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(tok));
            if is_noise {
                removed.push(tok.to_string());
            } else {
                kept.push(tok);
            }
        }

        if !removed.is_empty() {
            t.raw.description_tokens_removed = removed;
        }
        let cleaned = kept.join(" ");
        if !cleaned.is_empty() {
            t.description = cleaned;
        }
    }

    Ok(txns)
}

/// Final invariant check: if a transaction still carries both debit and
/// credit (cleanup stages can reintroduce the pair), keep the larger
/// magnitude and null the other. Ties keep debit.
pub fn resolve_conflicts(mut txns: Vec<Transaction>) -> Vec<Transaction> {
    for t in &mut txns {
        if let (Some(debit), Some(credit)) = (t.debit, t.credit) {
            if debit.abs() >= credit.abs() {
                t.credit = None;
                t.direction = Direction::Debit;
            } else {
                t.debit = None;
                t.direction = Direction::Credit;
            }
        }
    }
    txns
}
