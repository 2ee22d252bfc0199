//! Cell text for document tables
//!
//! Unlike CSV, documents translate status tokens and append the currency
//! symbol to amounts. Only raw numbers get a symbol: strings such as
//! `"9 999 FCFA"` were formatted by the caller and are shown untouched.

use serde_json::Value;

use crate::models::record::value_text;
use crate::models::status_label;

/// Field name fragments that mark a column as holding money
const CURRENCY_KEY_HINTS: &[&str] = &[
    "price", "total", "amount", "revenue", "cost", "budget", "spent", "sales", "montant", "prix",
];

/// Whether a field holds money, judged by its name
pub fn is_currency_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    CURRENCY_KEY_HINTS.iter().any(|hint| key.contains(hint))
}

/// Group thousands with spaces and keep at most two decimals (`1 234,50`)
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut out = String::with_capacity(whole.len() + 6);
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    if fraction != 0 {
        out.push_str(&format!(",{:02}", fraction));
    }
    out
}

/// Amount followed by the currency symbol
pub fn format_money(value: f64, symbol: &str) -> String {
    format!("{} {}", format_amount(value), symbol)
}

/// Text shown in a document table cell
pub fn cell_text(key: &str, value: &Value, currency_symbol: &str) -> String {
    match value {
        Value::String(s) if key == "status" => status_label(s).into_owned(),
        Value::Number(n) if is_currency_key(key) => match n.as_f64() {
            Some(f) => format_money(f, currency_symbol),
            None => value_text(value),
        },
        Value::Array(items) => format!("{} élément(s)", items.len()),
        _ => value_text(value),
    }
}
