//! Monthly aggregation over extracted transactions, for the presentation
//! collaborators (dashboards, monthly expense views).

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::round2;
use crate::transaction::Transaction;

/// One calendar day's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub debit: f64,
    pub credit: f64,
    pub net: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_debit: f64,
    pub total_credit: f64,
    pub net: f64,
    pub txn_count: usize,
    pub daily: Vec<DailyFlow>,
}

/// Aggregate transactions falling inside (year, month) into daily totals.
/// Duplicated rows are excluded so re-printed rows don't double-count.
pub fn monthly_summary(txns: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let mut days: BTreeMap<NaiveDate, (f64, f64, usize)> = BTreeMap::new();

    for t in txns {
        if t.date.year() != year || t.date.month() != month || t.is_duplicate {
            continue;
        }
        let entry = days.entry(t.date).or_insert((0.0, 0.0, 0));
        entry.0 += t.debit.unwrap_or(0.0);
        entry.1 += t.credit.unwrap_or(0.0);
        entry.2 += 1;
    }

    let daily: Vec<DailyFlow> = days
        .into_iter()
        .map(|(date, (debit, credit, count))| DailyFlow {
            date,
            debit: round2(debit),
            credit: round2(credit),
            net: round2(credit - debit),
            count,
        })
        .collect();

    let total_debit = round2(daily.iter().map(|d| d.debit).sum());
    let total_credit = round2(daily.iter().map(|d| d.credit).sum());

    MonthlySummary {
        total_debit,
        total_credit,
        net: round2(total_credit - total_debit),
        txn_count: daily.iter().map(|d| d.count).sum(),
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::transaction::{Direction, RowAudit};

    fn tx(day: u32, debit: Option<f64>, credit: Option<f64>) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            description: "ROW".to_string(),
            debit,
            credit,
            balance_after: None,
            currency: Currency::Aed,
            direction: Direction::Debit,
            confidence: 0.6,
            reference_id: None,
            is_duplicate: false,
            duplicate_of: None,
            raw: RowAudit::default(),
        }
    }

    #[test]
    fn test_groups_by_day_in_order() {
        let txns = vec![
            tx(10, Some(100.0), None),
            tx(2, None, Some(2500.0)),
            tx(10, Some(50.0), None),
        ];
        let summary = monthly_summary(&txns, 2024, 3);
        assert_eq!(summary.txn_count, 3);
        assert_eq!(summary.total_debit, 150.0);
        assert_eq!(summary.total_credit, 2500.0);
        assert_eq!(summary.net, 2350.0);
        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.daily[0].date.day(), 2);
        assert_eq!(summary.daily[1].debit, 150.0);
        assert_eq!(summary.daily[1].count, 2);
    }

    #[test]
    fn test_filters_other_months_and_duplicates() {
        let mut other_month = tx(5, Some(10.0), None);
        other_month.date = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        let mut dup = tx(5, Some(10.0), None);
        dup.is_duplicate = true;

        let summary = monthly_summary(&[other_month, dup, tx(5, Some(30.0), None)], 2024, 3);
        assert_eq!(summary.txn_count, 1);
        assert_eq!(summary.total_debit, 30.0);
    }
}
