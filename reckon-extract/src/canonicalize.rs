//! Provisional direction and confidence assignment.

use reckon_core::{Currency, Direction, EngineConfig, Transaction, round2};

use crate::row::CandidateRow;

/// Build the provisional transaction for a parsed row. Direction is only
/// trustworthy when exactly one side is present; the weak debit default is
/// what the balance-chain corrector fixes when coverage allows.
pub fn canonicalize(row: CandidateRow, currency: Currency, config: &EngineConfig) -> Transaction {
    let debit = row.debit.map(round2);
    let credit = row.credit.map(round2);

    let direction = match (debit, credit) {
        (Some(_), None) => Direction::Debit,
        (None, Some(_)) => Direction::Credit,
        _ => Direction::Debit,
    };

    let confidence = if debit.is_some() || credit.is_some() {
        config.confidence_with_amount
    } else {
        config.confidence_without_amount
    };

    Transaction {
        date: row.date,
        description: row.description,
        debit,
        credit,
        balance_after: row.balance_after,
        currency,
        direction,
        confidence,
        reference_id: row.reference_id,
        is_duplicate: false,
        duplicate_of: None,
        raw: row.raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::parse_row;
    use crate::token::Tokenizer;

    fn canonical(line: &str) -> Transaction {
        let row = parse_row(line, &Tokenizer::new().unwrap()).unwrap();
        canonicalize(row, Currency::Aed, &EngineConfig::default())
    }

    #[test]
    fn test_credit_only_row() {
        let tx = canonical("05/01/2024 SALARY 0.00 2500.00 3350.00");
        assert_eq!(tx.direction, Direction::Credit);
        assert_eq!(tx.confidence, 0.6);
        assert_eq!(tx.currency, Currency::Aed);
    }

    #[test]
    fn test_lone_amount_defaults_to_debit() {
        let tx = canonical("06/01/2024 GROCERY 150.00 3200.00");
        assert_eq!(tx.direction, Direction::Debit);
        assert_eq!(tx.debit, Some(150.0));
        assert_eq!(tx.confidence, 0.6);
    }

    #[test]
    fn test_amountless_row_gets_low_confidence() {
        let tx = canonical("07/01/2024 NOTE ONLY TEXT");
        assert_eq!(tx.direction, Direction::Debit);
        assert_eq!(tx.debit, None);
        assert_eq!(tx.credit, None);
        assert_eq!(tx.confidence, 0.3);
    }
}
