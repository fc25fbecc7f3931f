//! Statement-level reconciliation: opening + credits − debits vs closing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::{round2, round3};
use crate::transaction::{Direction, Transaction};

/// Verdict of comparing stated balances against the extracted transactions.
///
/// `diff: None` means the statement could not be assessed (an opening or
/// closing balance is missing), which is distinct from failing to
/// reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub is_reconciled: bool,
    pub diff: Option<f64>,
    pub statement_confidence: Option<f64>,
}

/// Check `opening + Σcredit − Σdebit` against the stated closing balance.
pub fn reconcile(
    opening: Option<f64>,
    closing: Option<f64>,
    txns: &[Transaction],
    tolerance: f64,
) -> ReconciliationResult {
    let statement_confidence = statement_confidence(txns);

    let (Some(opening), Some(closing)) = (opening, closing) else {
        return ReconciliationResult {
            is_reconciled: false,
            diff: None,
            statement_confidence,
        };
    };

    let total_debit: f64 = txns.iter().filter_map(|t| t.debit).sum();
    let total_credit: f64 = txns.iter().filter_map(|t| t.credit).sum();
    let expected_closing = opening + total_credit - total_debit;
    let diff = round2(expected_closing - closing);

    ReconciliationResult {
        is_reconciled: diff.abs() <= tolerance,
        diff: Some(diff),
        statement_confidence,
    }
}

/// Mean transaction confidence, 3 decimals. `None` when there are no rows.
pub fn statement_confidence(txns: &[Transaction]) -> Option<f64> {
    if txns.is_empty() {
        return None;
    }
    let mean = txns.iter().map(|t| t.confidence).sum::<f64>() / txns.len() as f64;
    Some(round3(mean))
}

/// A caller-entered correction applied on top of the stated opening
/// balance before reconciling (e.g. a charge the statement page cut off).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualAdjustment {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub direction: Direction,
    pub reason: Option<String>,
}

/// Fold manual adjustments into an opening balance.
pub fn apply_manual_adjustments(opening_balance: f64, adjustments: &[ManualAdjustment]) -> f64 {
    let debit: f64 = adjustments
        .iter()
        .filter(|a| a.direction == Direction::Debit)
        .map(|a| a.amount)
        .sum();
    let credit: f64 = adjustments
        .iter()
        .filter(|a| a.direction == Direction::Credit)
        .map(|a| a.amount)
        .sum();
    opening_balance + credit - debit
}
