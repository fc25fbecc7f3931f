//! Statement metadata via an Ollama-compatible endpoint (the LLM
//! metadata collaborator).
//!
//! The model only sees a header/footer snippet (period and balances live
//! there) and runs at temperature 0. A failed fetch is a hard error for
//! the whole request; the engine never guesses metadata.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use reckon_core::{Currency, StatementMetadata, StatementPeriod, parse_amount};

const HEAD_CHARS: usize = 25_000;
const TAIL_CHARS: usize = 15_000;

pub async fn fetch_metadata(
    base_url: &str,
    model: &str,
    text: &str,
    currency: Currency,
    bank_hint: Option<&str>,
    holder_hint: Option<&str>,
) -> Result<StatementMetadata> {
    #[derive(Serialize)]
    struct Options {
        temperature: f64,
    }

    #[derive(Serialize)]
    struct Request<'a> {
        model: &'a str,
        prompt: String,
        stream: bool,
        options: Options,
    }

    #[derive(Deserialize)]
    struct Response {
        response: String,
    }

    let prompt = build_prompt(text, currency, bank_hint, holder_hint);
    let url = format!("{}/api/generate", base_url.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .json(&Request {
            model,
            prompt,
            stream: false,
            options: Options { temperature: 0.0 },
        })
        .send()
        .await
        .with_context(|| format!("metadata request to {url}"))?
        .error_for_status()
        .context("metadata endpoint returned an error")?;

    let body: Response = response.json().await.context("decode metadata response")?;
    parse_metadata(&body.response, currency, bank_hint)
}

fn build_prompt(
    text: &str,
    currency: Currency,
    bank_hint: Option<&str>,
    holder_hint: Option<&str>,
) -> String {
    format!(
        r#"You are a bank statement metadata extractor.
Return VALID JSON ONLY.
No markdown. No explanations.
Do not invent values.
If missing, return null.

Extract ONLY statement metadata from the statement text snippet.

Output JSON schema:
{{
  "bank_name": string|null,
  "account_holder_name": string|null,
  "account_number": string|null,
  "statement_period": {{ "from": "YYYY-MM-DD"|null, "to": "YYYY-MM-DD"|null }},
  "opening_balance": {{ "amount": number|null, "currency": "{currency}" }},
  "closing_balance": {{ "amount": number|null, "currency": "{currency}" }}
}}

Rules:
- Account number MUST be FULL as printed (do NOT mask).
- bank_name/account_holder_name must be exact if present, else null.
- statement_period from/to as YYYY-MM-DD if present.
- opening/closing balances if present, else null.
- Use currency "{currency}" unless clearly different.

Hints (optional):
- bank_hint: {bank}
- account_holder_hint: {holder}

STATEMENT_SNIPPET:
{snippet}"#,
        bank = bank_hint.unwrap_or("null"),
        holder = holder_hint.unwrap_or("null"),
        snippet = snippet(text),
    )
}

/// Head + tail of the document: statement period and balances live in the
/// header and footer, and the model should not read the whole table.
fn snippet(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= HEAD_CHARS {
        return text.to_string();
    }
    let head: String = chars[..HEAD_CHARS].iter().collect();
    let tail: String = chars[chars.len() - TAIL_CHARS..].iter().collect();
    format!("{head}\n\n---\n\n{tail}")
}

fn extract_json_block(text: &str) -> Result<&str> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        bail!("no JSON object in metadata output");
    };
    if end < start {
        bail!("no JSON object in metadata output");
    }
    Ok(&text[start..=end])
}

fn parse_metadata(
    raw_output: &str,
    currency: Currency,
    bank_hint: Option<&str>,
) -> Result<StatementMetadata> {
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct PeriodJson {
        from: Option<String>,
        to: Option<String>,
    }

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct BalanceJson {
        amount: Option<serde_json::Value>,
    }

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct MetaJson {
        bank_name: Option<String>,
        account_holder_name: Option<String>,
        account_number: Option<String>,
        statement_period: Option<PeriodJson>,
        opening_balance: Option<BalanceJson>,
        closing_balance: Option<BalanceJson>,
    }

    fn amount_of(balance: Option<&BalanceJson>) -> Option<f64> {
        match balance?.amount.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => parse_amount(s),
            _ => None,
        }
    }

    fn date_of(s: Option<&String>) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s?, "%Y-%m-%d").ok()
    }

    let block = extract_json_block(raw_output)?;
    let meta: MetaJson = serde_json::from_str(block).context("parse metadata JSON")?;

    let period = meta.statement_period.unwrap_or_default();
    let bank_name = meta
        .bank_name
        .filter(|b| !b.trim().is_empty())
        .or_else(|| {
            bank_hint
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
        });

    Ok(StatementMetadata {
        bank_name,
        account_holder_name: meta.account_holder_name,
        account_number: meta.account_number,
        period: StatementPeriod {
            from: date_of(period.from.as_ref()),
            to: date_of(period.to.as_ref()),
        },
        opening_balance: amount_of(meta.opening_balance.as_ref()),
        closing_balance: amount_of(meta.closing_balance.as_ref()),
        currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_block_ignores_prose() {
        let raw = "Sure, here is the data: {\"bank_name\": \"ACME\"} hope that helps";
        assert_eq!(extract_json_block(raw).unwrap(), "{\"bank_name\": \"ACME\"}");
        assert!(extract_json_block("no json here").is_err());
    }

    #[test]
    fn test_parse_metadata_with_mixed_amount_forms() {
        let raw = r#"{
            "bank_name": "ACME NATIONAL BANK",
            "account_holder_name": null,
            "account_number": "1099228833",
            "statement_period": { "from": "2024-01-01", "to": "2024-01-31" },
            "opening_balance": { "amount": 1000.0, "currency": "AED" },
            "closing_balance": { "amount": "AED 630.00", "currency": "AED" }
        }"#;
        let meta = parse_metadata(raw, Currency::Aed, None).unwrap();
        assert_eq!(meta.bank_name.as_deref(), Some("ACME NATIONAL BANK"));
        assert_eq!(meta.opening_balance, Some(1000.0));
        assert_eq!(meta.closing_balance, Some(630.0));
        assert_eq!(
            meta.period.from,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_bank_name_falls_back_to_hint() {
        let raw = r#"{ "bank_name": null }"#;
        let meta = parse_metadata(raw, Currency::Aed, Some(" First Bank ")).unwrap();
        assert_eq!(meta.bank_name.as_deref(), Some("First Bank"));
        assert_eq!(meta.opening_balance, None);
    }

    #[test]
    fn test_snippet_keeps_short_text_whole() {
        assert_eq!(snippet("short statement"), "short statement");
        let long: String = "x".repeat(HEAD_CHARS + TAIL_CHARS);
        let s = snippet(&long);
        assert!(s.contains("---"));
        assert_eq!(s.len(), HEAD_CHARS + TAIL_CHARS + "\n\n---\n\n".len());
    }

    #[test]
    fn test_prompt_carries_hints_and_schema() {
        let prompt = build_prompt("BODY", Currency::Inr, Some("HDFC"), None);
        assert!(prompt.contains("bank_hint: HDFC"));
        assert!(prompt.contains("account_holder_hint: null"));
        assert!(prompt.contains("\"INR\""));
        assert!(prompt.contains("STATEMENT_SNIPPET:\nBODY"));
    }
}
