//! CSV export of extracted transactions, one row per transaction with its
//! idempotency hash for downstream ingestion.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use reckon_core::{Transaction, transaction_hash};

pub fn write_csv(path: &Path, txns: &[Transaction]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_csv_to(file, txns)
}

fn fmt_amount(x: Option<f64>) -> String {
    x.map(|v| format!("{v:.2}")).unwrap_or_default()
}

pub fn write_csv_to<W: Write>(writer: W, txns: &[Transaction]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "date",
        "description",
        "debit",
        "credit",
        "balance_after",
        "currency",
        "direction",
        "confidence",
        "reference_id",
        "is_duplicate",
        "duplicate_of",
        "txn_hash",
    ])?;

    for t in txns {
        csv_writer.write_record([
            t.date.to_string(),
            t.description.clone(),
            fmt_amount(t.debit),
            fmt_amount(t.credit),
            fmt_amount(t.balance_after),
            t.currency.to_string(),
            t.direction.to_string(),
            format!("{:.3}", t.confidence),
            t.reference_id.clone().unwrap_or_default(),
            t.is_duplicate.to_string(),
            t.duplicate_of.map(|i| i.to_string()).unwrap_or_default(),
            transaction_hash(t),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
