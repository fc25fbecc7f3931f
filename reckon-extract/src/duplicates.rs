//! Duplicate flagging over the corrected transaction list.

use std::collections::HashMap;

use chrono::NaiveDate;

use reckon_core::Transaction;

/// Flag repeated transactions. Key: (reference id, date, amount in minor
/// units). Rows without a reference never participate; generic rows
/// repeat legitimately. Duplicates are flagged, never removed; the first
/// occurrence stays canonical and later ones point back at its position.
pub fn flag_duplicates(mut txns: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen: HashMap<(String, NaiveDate, Option<i64>), usize> = HashMap::new();

    for i in 0..txns.len() {
        txns[i].is_duplicate = false;
        txns[i].duplicate_of = None;

        let Some(reference) = txns[i].reference_id.clone() else {
            continue;
        };
        let amount_cents = txns[i].amount().map(|a| (a * 100.0).round() as i64);
        let key = (reference, txns[i].date, amount_cents);

        match seen.get(&key) {
            Some(&first) => {
                txns[i].is_duplicate = true;
                txns[i].duplicate_of = Some(first);
            }
            None => {
                seen.insert(key, i);
            }
        }
    }

    txns
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_core::{Currency, Direction, RowAudit};

    fn tx(reference: Option<&str>, day: u32, debit: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: "ROW".to_string(),
            debit: Some(debit),
            credit: None,
            balance_after: None,
            currency: Currency::Aed,
            direction: Direction::Debit,
            confidence: 0.6,
            reference_id: reference.map(str::to_string),
            is_duplicate: false,
            duplicate_of: None,
            raw: RowAudit::default(),
        }
    }

    #[test]
    fn test_repeated_reference_is_flagged_with_position() {
        let txns = vec![
            tx(Some("CHK123"), 5, 250.0),
            tx(None, 5, 250.0),
            tx(Some("CHK123"), 5, 250.0),
        ];
        let flagged = flag_duplicates(txns);
        assert!(!flagged[0].is_duplicate);
        assert!(flagged[2].is_duplicate);
        assert_eq!(flagged[2].duplicate_of, Some(0));
        assert_eq!(flagged.len(), 3); // flagged, not removed
    }

    #[test]
    fn test_rows_without_reference_never_flag() {
        let txns = vec![tx(None, 5, 250.0), tx(None, 5, 250.0)];
        let flagged = flag_duplicates(txns);
        assert!(flagged.iter().all(|t| !t.is_duplicate));
    }

    #[test]
    fn test_key_includes_date_and_amount() {
        let txns = vec![
            tx(Some("CHK123"), 5, 250.0),
            tx(Some("CHK123"), 6, 250.0),
            tx(Some("CHK123"), 5, 251.0),
        ];
        let flagged = flag_duplicates(txns);
        assert!(flagged.iter().all(|t| !t.is_duplicate));
    }
}
