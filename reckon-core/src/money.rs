//! Amount parsing and currency handling.

use serde::{Deserialize, Serialize};

/// Statement currency. One currency per statement; the caller resolves a
/// user hint before invoking the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "AED")]
    Aed,
    #[serde(rename = "INR")]
    Inr,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Inr => "INR",
        }
    }

    /// Resolve a caller-supplied hint. Unknown or missing hints fall back
    /// to `default`.
    pub fn resolve(hint: Option<&str>, default: Currency) -> Currency {
        match hint.map(|h| h.trim().to_uppercase()) {
            Some(h) if h == "AED" => Currency::Aed,
            Some(h) if h == "INR" => Currency::Inr,
            _ => default,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an amount out of free text: tolerates comma grouping and stray
/// currency symbols, keeps sign and decimal point.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Round to 2 decimal places (money precision for exported fields).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 3 decimal places (confidence scores).
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
