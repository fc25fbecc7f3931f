//! Typed tokens over a statement line.
//!
//! Rows are parsed by matching over token kinds (date / amount / word)
//! rather than one regex per bank format, so the grammar stays
//! bank-agnostic.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

use reckon_core::parse_amount;

/// One whitespace-separated token of a normalized line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// `DD/MM/YYYY`-shaped. Conversion can still reject an impossible
    /// calendar date.
    Date,
    /// Optional sign, digits with optional comma grouping, optional 1–2
    /// decimal digits. Carries the parsed value.
    Amount(f64),
    Word,
}

impl Token {
    pub fn is_date(&self) -> bool {
        self.kind == TokenKind::Date
    }

    pub fn is_amount(&self) -> bool {
        matches!(self.kind, TokenKind::Amount(_))
    }
}

/// Compiled token classifier. Built once per pipeline run and shared by
/// the scanner and the row parser.
pub struct Tokenizer {
    date_re: Regex,
    amount_re: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date_re: Regex::new(r"^\d{2}/\d{2}/\d{4}$")?,
            amount_re: Regex::new(r"^-?\d+(\.\d{1,2})?$")?,
        })
    }

    pub fn classify(&self, text: &str) -> Token {
        if self.date_re.is_match(text) {
            return Token {
                text: text.to_string(),
                kind: TokenKind::Date,
            };
        }
        let ungrouped = text.replace(',', "");
        if self.amount_re.is_match(&ungrouped) {
            if let Some(value) = parse_amount(text) {
                return Token {
                    text: text.to_string(),
                    kind: TokenKind::Amount(value),
                };
            }
        }
        Token {
            text: text.to_string(),
            kind: TokenKind::Word,
        }
    }

    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        line.split_whitespace().map(|t| self.classify(t)).collect()
    }
}

/// Convert a `DD/MM/YYYY` token into a calendar date. Shape alone is not
/// enough: `31/02/2024` tokenizes as a date but fails here.
pub fn parse_ddmmyyyy(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('/');
    let dd: u32 = parts.next()?.parse().ok()?;
    let mm: u32 = parts.next()?.parse().ok()?;
    let yyyy: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(yyyy, mm, dd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tk() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn test_classifies_dates() {
        assert!(tk().classify("14/03/2024").is_date());
        // Shape match only; validity is the converter's job.
        assert!(tk().classify("31/02/2024").is_date());
        assert!(!tk().classify("02/11").is_date());
        assert!(!tk().classify("2024-03-14").is_date());
    }

    #[test]
    fn test_classifies_amounts() {
        assert_eq!(tk().classify("1,050.00").kind, TokenKind::Amount(1050.0));
        assert_eq!(tk().classify("-15.5").kind, TokenKind::Amount(-15.5));
        assert_eq!(tk().classify("778899").kind, TokenKind::Amount(778899.0));
        assert_eq!(tk().classify("10.123").kind, TokenKind::Word);
        assert_eq!(tk().classify("AED1050.00").kind, TokenKind::Word);
    }

    #[test]
    fn test_words_keep_text() {
        let t = tk().classify("GROCERY");
        assert_eq!(t.kind, TokenKind::Word);
        assert_eq!(t.text, "GROCERY");
    }

    #[test]
    fn test_date_roundtrip() {
        let d = parse_ddmmyyyy("05/01/2024").unwrap();
        assert_eq!(d.to_string(), "2024-01-05");
        assert_eq!(parse_ddmmyyyy("31/02/2024"), None);
        assert_eq!(parse_ddmmyyyy("00/01/2024"), None);
    }
}
