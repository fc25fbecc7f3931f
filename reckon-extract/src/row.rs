//! Row parsing: one candidate line into a structured row.
//!
//! Grammar over token kinds:
//!   DATE [DATE] (WORD | AMOUNT)* AMOUNT{0,3}
//! The trailing amounts are debit/credit/balance columns; everything in
//! the middle is description text, possibly ending in a reference number.

use chrono::NaiveDate;

use reckon_core::{RowAudit, round2};

use crate::token::{TokenKind, Tokenizer, parse_ddmmyyyy};

/// One parsed statement row prior to canonicalization. Transient: owned by
/// the pipeline and discarded once transactions are built.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    /// Resolved row date (posting date, falling back to value date).
    pub date: NaiveDate,
    /// Posting date as printed (`DD/MM/YYYY`).
    pub posting_date: String,
    /// Value date as printed, when the row carries two leading dates.
    pub value_date: Option<String>,
    pub description: String,
    pub reference_id: Option<String>,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance_after: Option<f64>,
    pub raw: RowAudit,
}

/// Up to this many trailing numeric columns are read off a row.
const MAX_TRAILING_AMOUNTS: usize = 3;

/// Minimum length for a reference token; keeps pure words and short
/// codes out.
const MIN_REFERENCE_LEN: usize = 5;

fn is_reference_like(tok: &str) -> bool {
    tok.len() >= MIN_REFERENCE_LEN
        && tok.chars().any(|c| c.is_ascii_digit())
        && tok.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_zero(x: f64) -> bool {
    x.abs() < 1e-9
}

/// Parse a normalized candidate line. `None` is a filtering decision, not
/// an error: no leading date, or no parseable date at all.
pub fn parse_row(line: &str, tokenizer: &Tokenizer) -> Option<CandidateRow> {
    let tokens = tokenizer.tokenize(line);

    let first = tokens.first()?;
    if first.kind != TokenKind::Date {
        return None;
    }
    let posting = first.text.clone();
    let value = tokens
        .get(1)
        .filter(|t| t.kind == TokenKind::Date)
        .map(|t| t.text.clone());
    let body_start = if value.is_some() { 2 } else { 1 };

    // Posting date wins; an impossible posting date falls back to the
    // value date; neither parseable rejects the row.
    let date = parse_ddmmyyyy(&posting)
        .or_else(|| value.as_deref().and_then(parse_ddmmyyyy))?;

    let body = &tokens[body_start..];

    // Collect trailing amount columns from the end until a non-amount.
    let mut tail: Vec<f64> = Vec::new();
    let mut middle_end = body.len();
    while middle_end > 0 && tail.len() < MAX_TRAILING_AMOUNTS {
        match body[middle_end - 1].kind {
            TokenKind::Amount(v) => {
                tail.push(v);
                middle_end -= 1;
            }
            _ => break,
        }
    }
    tail.reverse();

    // 3 columns: debit/credit/balance. 2: amount+balance, amount held as
    // debit until the balance chain can correct it. 1: balance only.
    let (mut debit, mut credit, balance_after) = match tail.as_slice() {
        [d, c, b] => (Some(*d), Some(*c), Some(*b)),
        [amount, b] => (Some(*amount), None, Some(*b)),
        [b] => (None, None, Some(*b)),
        _ => (None, None, None),
    };

    // A printed 0.00 column means "not applicable".
    debit = debit.filter(|d| !is_zero(*d));
    credit = credit.filter(|c| !is_zero(*c));

    let mut desc_end = middle_end;
    let reference_id = match body[..middle_end].last() {
        Some(last) if is_reference_like(&last.text) => {
            desc_end -= 1;
            Some(last.text.clone())
        }
        _ => None,
    };

    let description = body[..desc_end]
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let raw = RowAudit {
        posting_date: Some(posting.clone()),
        value_date: value.clone(),
        description: (!description.is_empty()).then(|| description.clone()),
        reference_id: reference_id.clone(),
        debit: debit.map(round2),
        credit: credit.map(round2),
        balance: balance_after.map(round2),
        row_text: line.to_string(),
        description_tokens_removed: Vec::new(),
    };

    Some(CandidateRow {
        date,
        posting_date: posting,
        value_date: value,
        description: if description.is_empty() {
            "UNKNOWN".to_string()
        } else {
            description
        },
        reference_id,
        debit,
        credit,
        balance_after,
        raw,
    })
}
