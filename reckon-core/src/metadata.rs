//! Statement-level metadata supplied by the external metadata collaborator.
//!
//! The engine itself only reads `opening_balance`/`closing_balance`; the
//! rest is carried through for persistence and display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::hash::statement_hash;
use crate::money::Currency;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementMetadata {
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub period: StatementPeriod,
    pub opening_balance: Option<f64>,
    pub closing_balance: Option<f64>,
    pub currency: Currency,
}

impl StatementMetadata {
    pub fn new(currency: Currency) -> Self {
        Self {
            bank_name: None,
            account_holder_name: None,
            account_number: None,
            period: StatementPeriod::default(),
            opening_balance: None,
            closing_balance: None,
            currency,
        }
    }

    /// Idempotency key for persisting this statement, available once the
    /// account number and full period are known.
    pub fn content_hash(&self) -> Option<String> {
        let account = self.account_number.as_deref()?;
        let from = self.period.from?;
        let to = self.period.to?;
        Some(statement_hash(
            account,
            &from.to_string(),
            &to.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_requires_account_and_period() {
        let mut meta = StatementMetadata::new(Currency::Aed);
        assert_eq!(meta.content_hash(), None);

        meta.account_number = Some("1234567890".to_string());
        meta.period.from = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(meta.content_hash(), None);

        meta.period.to = NaiveDate::from_ymd_opt(2024, 1, 31);
        let hash = meta.content_hash().unwrap();
        assert_eq!(hash.len(), 64);
        // Stable key for the same account + period.
        assert_eq!(meta.content_hash().unwrap(), hash);
    }
}
