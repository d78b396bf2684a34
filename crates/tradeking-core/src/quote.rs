//! Typed coercion of quote payload fields.
//!
//! Quote responses arrive as flat string maps. Field names determine the
//! real type: a fixed set of keys carry dates, another set integers, another
//! decimals, with `$`, `,`, and `%` adornment on the numeric ones. Anything
//! that fails to parse stays a string rather than failing the whole record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys whose values are dates or datetimes.
const DATE_KEYS: &[&str] = &[
    "date",
    "datetime",
    "divexdate",
    "divpaydt",
    "timestamp",
    "pr_date",
    "wk52hidate",
    "wk52lodate",
    "xdate",
];

/// Keys whose values are decimal quantities.
const FLOAT_KEYS: &[&str] = &[
    "ask",
    "bid",
    "chg",
    "cl",
    "div",
    "dollar_value",
    "eps",
    "hi",
    "iad",
    "idelta",
    "igamma",
    "imp_volatility",
    "irho",
    "itheta",
    "ivega",
    "last",
    "lo",
    "opn",
    "opt_val",
    "pchg",
    "pcls",
    "pe",
    "phi",
    "plo",
    "popn",
    "pr_adp_100",
    "pr_adp_200",
    "pr_adp_50",
    "prbook",
    "prchg",
    "strikeprice",
    "volatility12",
    "vwap",
    "wk52hi",
    "wk52lo",
    "yield",
];

/// Keys whose values are integer counts.
const INT_KEYS: &[&str] = &[
    "asksz",
    "basis",
    "bidsz",
    "bidtick",
    "days_to_expiration",
    "incr_vl",
    "openinterest",
    "pr_openinterest",
    "prem_mult",
    "pvol",
    "sho",
    "tr_num",
    "vl",
    "xday",
    "xmonth",
    "xyear",
];

/// A quote field after coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuoteValue {
    DateTime(DateTime<Utc>),
    Decimal(Decimal),
    Int(i64),
    Text(String),
}

/// Coerce one field by key.
pub fn coerce_field(key: &str, raw: &Value) -> QuoteValue {
    let text = match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if DATE_KEYS.contains(&key) {
        if let Some(dt) = parse_date(key, &text) {
            return QuoteValue::DateTime(dt);
        }
    } else if INT_KEYS.contains(&key) {
        if let Ok(n) = clean_numeric(&text).parse::<i64>() {
            return QuoteValue::Int(n);
        }
    } else if FLOAT_KEYS.contains(&key) {
        if let Ok(d) = clean_numeric(&text).parse::<Decimal>() {
            return QuoteValue::Decimal(d);
        }
    }

    QuoteValue::Text(text)
}

/// Coerce every field of a quote record.
pub fn typed_quote(quote: &serde_json::Map<String, Value>) -> BTreeMap<String, QuoteValue> {
    quote
        .iter()
        .map(|(key, value)| (key.clone(), coerce_field(key, value)))
        .collect()
}

/// Coerce a quote payload, accepting either one record or an array of them.
pub fn typed_quotes(value: &Value) -> Vec<BTreeMap<String, QuoteValue>> {
    match value {
        Value::Array(records) => records
            .iter()
            .filter_map(Value::as_object)
            .map(typed_quote)
            .collect(),
        Value::Object(record) => vec![typed_quote(record)],
        _ => Vec::new(),
    }
}

fn clean_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect()
}

fn parse_date(key: &str, text: &str) -> Option<DateTime<Utc>> {
    if key == "timestamp" {
        // unix seconds
        let secs: i64 = text.trim().parse().ok()?;
        return DateTime::from_timestamp(secs, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d", "%Y%m%d", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    None
}
