//! Engine calibration.
//!
//! The confidence constants are tuning knobs observed in production, not
//! derived probabilities. Defaults match the shipped calibration; callers
//! that need different behavior override fields rather than fork formulas.

use serde::{Deserialize, Serialize};

use crate::money::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum fraction of rows that must carry a known running balance
    /// before balance-chain correction runs at all.
    pub balance_coverage_min: f64,
    /// A swap hypothesis must beat the keep hypothesis by more than this.
    pub swap_epsilon: f64,
    /// Provisional confidence for a row that carried at least one amount.
    pub confidence_with_amount: f64,
    /// Provisional confidence for a row with no determinable amount.
    pub confidence_without_amount: f64,
    /// Confidence floor for rows that went through balance correction.
    pub corrected_confidence_floor: f64,
    /// Chain error (currency units) at which confidence reaches the floor.
    pub chain_error_scale: f64,
    /// |expected − stated| closing tolerance for reconciliation.
    pub reconcile_tolerance: f64,
    /// Orientation stays as given when fewer rows than this carry balances.
    pub min_orientation_rows: usize,
    /// Transaction-type prefixes stripped from descriptions.
    pub description_noise_prefixes: Vec<String>,
    /// Currency used when the caller hint is missing or unknown.
    pub default_currency: Currency,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            balance_coverage_min: 0.55,
            swap_epsilon: 1e-9,
            confidence_with_amount: 0.6,
            confidence_without_amount: 0.3,
            corrected_confidence_floor: 0.4,
            chain_error_scale: 5.0,
            reconcile_tolerance: 0.05,
            min_orientation_rows: 3,
            description_noise_prefixes: ["PUR", "POS", "MBTRF", "B/F", "TRF", "ATM"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            default_currency: Currency::Aed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_calibration() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.balance_coverage_min, 0.55);
        assert_eq!(cfg.confidence_with_amount, 0.6);
        assert_eq!(cfg.confidence_without_amount, 0.3);
        assert_eq!(cfg.corrected_confidence_floor, 0.4);
        assert_eq!(cfg.chain_error_scale, 5.0);
        assert_eq!(cfg.reconcile_tolerance, 0.05);
        assert!(cfg.description_noise_prefixes.iter().any(|p| p == "B/F"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{ "reconcile_tolerance": 0.5 }"#).unwrap();
        assert_eq!(cfg.reconcile_tolerance, 0.5);
        assert_eq!(cfg.balance_coverage_min, 0.55);
    }
}
