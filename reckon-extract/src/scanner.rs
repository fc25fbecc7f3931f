//! Line scanning: normalize raw statement text and keep the lines that
//! plausibly are transaction rows.

use std::collections::HashSet;

use crate::token::{Token, Tokenizer};

/// Collapse internal whitespace runs to single spaces.
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A line is a candidate iff it carries at least one full date token and
/// at least two amount tokens elsewhere in the line. Headers, footers and
/// narrative text rarely satisfy both.
pub fn is_candidate(tokens: &[Token]) -> bool {
    let dates = tokens.iter().filter(|t| t.is_date()).count();
    let amounts = tokens.iter().filter(|t| t.is_amount()).count();
    dates >= 1 && amounts >= 2
}

/// Scan raw text into normalized, deduplicated candidate lines. Repeated
/// headers and table redraws in multi-page documents collapse to one copy.
pub fn scan_candidates(text: &str, tokenizer: &Tokenizer) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for raw in text.lines() {
        let line = normalize_spaces(raw);
        if line.is_empty() {
            continue;
        }
        if !is_candidate(&tokenizer.tokenize(&line)) {
            continue;
        }
        if !seen.insert(line.clone()) {
            continue;
        }
        out.push(line);
    }

    out
}
