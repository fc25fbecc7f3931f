//! Content hashes for idempotent persistence of statements and transactions.
//!
//! The persistence collaborator keys statements by account + period and
//! transactions by their visible fields, so re-ingesting the same document
//! is a no-op downstream.

use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Statement idempotency key: `account_number|period_from|period_to`.
pub fn statement_hash(account_number: &str, period_from: &str, period_to: &str) -> String {
    sha256_hex(&format!("{account_number}|{period_from}|{period_to}"))
}

fn fmt_amount(x: Option<f64>) -> String {
    match x {
        Some(v) => format!("{v:.2}"),
        None => String::new(),
    }
}

/// Transaction idempotency key over the fields that identify a row:
/// `date|debit|credit|balance_after|reference_id`.
pub fn transaction_hash(tx: &Transaction) -> String {
    let raw = format!(
        "{}|{}|{}|{}|{}",
        tx.date,
        fmt_amount(tx.debit),
        fmt_amount(tx.credit),
        fmt_amount(tx.balance_after),
        tx.reference_id.as_deref().unwrap_or(""),
    );
    sha256_hex(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::transaction::{Direction, RowAudit};
    use chrono::NaiveDate;

    fn tx(debit: Option<f64>, reference: Option<&str>) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: "CHEQUE".to_string(),
            debit,
            credit: None,
            balance_after: Some(750.0),
            currency: Currency::Aed,
            direction: Direction::Debit,
            confidence: 1.0,
            reference_id: reference.map(str::to_string),
            is_duplicate: false,
            duplicate_of: None,
            raw: RowAudit::default(),
        }
    }

    #[test]
    fn test_statement_hash_is_deterministic() {
        let a = statement_hash("123", "2024-01-01", "2024-01-31");
        let b = statement_hash("123", "2024-01-01", "2024-01-31");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, statement_hash("124", "2024-01-01", "2024-01-31"));
    }

    #[test]
    fn test_transaction_hash_varies_by_identity_fields() {
        let base = transaction_hash(&tx(Some(250.0), Some("CHK123")));
        assert_eq!(base, transaction_hash(&tx(Some(250.0), Some("CHK123"))));
        assert_ne!(base, transaction_hash(&tx(Some(251.0), Some("CHK123"))));
        assert_ne!(base, transaction_hash(&tx(Some(250.0), None)));
    }
}
