//! Balance-chain orientation and debit/credit correction.
//!
//! The running balance is the one cross-row signal a bank-agnostic parser
//! has. Each row must satisfy `balance[i] = balance[i-1] − debit + credit`;
//! deviations tell us both which way the statement is ordered and which
//! side a tentatively-assigned amount belongs on.

use tracing::debug;

use reckon_core::{Direction, EngineConfig, Transaction, round2, round3};

/// Fraction of rows carrying a known running balance.
pub fn balance_coverage(txns: &[Transaction]) -> f64 {
    if txns.is_empty() {
        return 0.0;
    }
    let have = txns.iter().filter(|t| t.balance_after.is_some()).count();
    have as f64 / txns.len() as f64
}

/// Mean absolute error of the balance equation over adjacent rows where
/// both balances are known. Infinite when no pair is usable.
pub fn chain_error(txns: &[Transaction]) -> f64 {
    let mut errors = Vec::new();
    for pair in txns.windows(2) {
        let (Some(prev), Some(cur)) = (pair[0].balance_after, pair[1].balance_after) else {
            continue;
        };
        let debit = pair[1].debit.unwrap_or(0.0);
        let credit = pair[1].credit.unwrap_or(0.0);
        errors.push((prev - debit + credit - cur).abs());
    }
    if errors.is_empty() {
        return f64::INFINITY;
    }
    errors.iter().sum::<f64>() / errors.len() as f64
}

/// Statements list rows oldest-first or newest-first. Keep whichever
/// orientation the balance chain fits better; with too few usable
/// balances the given order stands.
pub fn select_orientation(txns: Vec<Transaction>, config: &EngineConfig) -> Vec<Transaction> {
    let usable = txns.iter().filter(|t| t.balance_after.is_some()).count();
    if usable < config.min_orientation_rows {
        return txns;
    }

    let forward = chain_error(&txns);
    let reversed: Vec<Transaction> = txns.iter().rev().cloned().collect();
    let backward = chain_error(&reversed);

    if backward < forward {
        debug!(forward, backward, "reversed row order for lower chain error");
        reversed
    } else {
        txns
    }
}

/// Pick the (debit, credit) assignment minimizing the balance-equation
/// error. The swap must win strictly, beyond epsilon.
fn best_fit(
    prev_balance: f64,
    cur_balance: f64,
    debit: Option<f64>,
    credit: Option<f64>,
    epsilon: f64,
) -> (Option<f64>, Option<f64>, f64) {
    let d = debit.unwrap_or(0.0);
    let c = credit.unwrap_or(0.0);

    let keep_error = (prev_balance - d + c - cur_balance).abs();
    let swap_error = (prev_balance - c + d - cur_balance).abs();

    if swap_error + epsilon < keep_error {
        (credit, debit, swap_error)
    } else {
        (debit, credit, keep_error)
    }
}

/// Walk the ordered rows and correct each debit/credit assignment from
/// the running balance. A no-op when balance coverage is below the
/// configured threshold; rows then keep their provisional direction and
/// confidence.
pub fn correct_with_balance_chain(
    mut txns: Vec<Transaction>,
    config: &EngineConfig,
) -> Vec<Transaction> {
    let coverage = balance_coverage(&txns);
    if coverage < config.balance_coverage_min {
        debug!(coverage, "balance coverage below threshold; skipping correction");
        return txns;
    }

    for i in 1..txns.len() {
        let (Some(prev), Some(cur)) = (txns[i - 1].balance_after, txns[i].balance_after) else {
            continue;
        };
        let (debit, credit) = (txns[i].debit, txns[i].credit);
        if debit.is_none() && credit.is_none() {
            continue;
        }

        let (best_debit, best_credit, error) =
            best_fit(prev, cur, debit, credit, config.swap_epsilon);

        txns[i].debit = best_debit.filter(|v| *v != 0.0).map(round2);
        txns[i].credit = best_credit.filter(|v| *v != 0.0).map(round2);

        match (txns[i].debit, txns[i].credit) {
            (Some(_), None) => txns[i].direction = Direction::Debit,
            (None, Some(_)) => txns[i].direction = Direction::Credit,
            (Some(d), Some(c)) => {
                // Both survived the fit (rare): keep the larger magnitude.
                if d.abs() >= c.abs() {
                    txns[i].credit = None;
                    txns[i].direction = Direction::Debit;
                } else {
                    txns[i].debit = None;
                    txns[i].direction = Direction::Credit;
                }
            }
            (None, None) => {}
        }

        let confidence = (1.0 - error / config.chain_error_scale)
            .clamp(config.corrected_confidence_floor, 1.0);
        txns[i].confidence = round3(confidence);
    }

    for t in &mut txns {
        t.balance_after = t.balance_after.map(round2);
    }

    txns
}
