//! Canonical transaction records exported by the extraction pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Flow direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "CREDIT")]
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit trail kept on every transaction: the canonical field guesses made
/// while parsing plus the untouched row text. Field names match the keys
/// the rest of the stack stores and displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    #[serde(rename = "Posting Date")]
    pub posting_date: Option<String>,
    #[serde(rename = "Value Date")]
    pub value_date: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Ref/Cheque No")]
    pub reference_id: Option<String>,
    #[serde(rename = "Debit Amount")]
    pub debit: Option<f64>,
    #[serde(rename = "Credit Amount")]
    pub credit: Option<f64>,
    #[serde(rename = "Balance")]
    pub balance: Option<f64>,
    pub row_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description_tokens_removed: Vec<String>,
}

/// A canonical transaction in final form. After the pipeline completes, at
/// most one of `debit`/`credit` is set; both are unset only when no amount
/// could be determined for the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance_after: Option<f64>,
    pub currency: Currency,
    pub direction: Direction,
    pub confidence: f64,
    pub reference_id: Option<String>,
    pub is_duplicate: bool,
    pub duplicate_of: Option<usize>,
    pub raw: RowAudit,
}

impl Transaction {
    /// The single movement amount: debit when present, else credit.
    pub fn amount(&self) -> Option<f64> {
        self.debit.or(self.credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: "GROCERY".to_string(),
            debit: Some(150.0),
            credit: None,
            balance_after: Some(850.0),
            currency: Currency::Aed,
            direction: Direction::Debit,
            confidence: 0.6,
            reference_id: None,
            is_duplicate: false,
            duplicate_of: None,
            raw: RowAudit {
                row_text: "05/01/2024 GROCERY 150.00 850.00".to_string(),
                ..RowAudit::default()
            },
        }
    }

    #[test]
    fn test_amount_prefers_debit() {
        let tx = sample();
        assert_eq!(tx.amount(), Some(150.0));

        let mut credit_tx = sample();
        credit_tx.debit = None;
        credit_tx.credit = Some(99.0);
        assert_eq!(credit_tx.amount(), Some(99.0));
    }

    #[test]
    fn test_serializes_with_canonical_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["direction"], "DEBIT");
        assert_eq!(json["currency"], "AED");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["raw"]["row_text"], "05/01/2024 GROCERY 150.00 850.00");
        // Audit keys keep the display names downstream consumers expect.
        assert!(json["raw"].get("Posting Date").is_some());
    }
}
