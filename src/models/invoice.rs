//! Invoice-shaped payloads
//!
//! A single order exported on its own carries an `items` array of line items.
//! Documents render it as an invoice instead of a plain table.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use super::record::ExportRecord;
use crate::error::{ExportError, ExportResult};

/// Key holding line items in order records
pub const ITEMS_KEY: &str = "items";

/// One line of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "name", alias = "product", alias = "designation")]
    pub description: String,

    #[serde(
        default = "default_quantity",
        alias = "qty",
        deserialize_with = "lenient_number"
    )]
    pub quantity: f64,

    #[serde(alias = "price", alias = "unit_price", deserialize_with = "lenient_number")]
    pub unit_price: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl LineItem {
    /// Quantity times unit price
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Accept `12`, `12.5` or numeric strings such as `"1 500"` and `"12,5"`
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => parse_amount(&s)
            .ok_or_else(|| de::Error::custom(format!("expected a number, got \"{}\"", s))),
    }
}

/// Parse a loosely formatted amount, ignoring group separators and a trailing unit
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic() || c == '€' || c == '$' || c == '£')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// An order exported as an invoice
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Every field of the order except the line items
    pub fields: ExportRecord,
    pub items: Vec<LineItem>,
}

/// Total shown under the line items
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceTotal {
    /// A `total` field present on the order, shown as given
    Declared(Value),
    /// Sum of line totals
    Computed(f64),
}

impl Invoice {
    /// Split an order object into its fields and parsed line items
    pub fn from_object(mut object: ExportRecord) -> ExportResult<Self> {
        let items = match object.remove(ITEMS_KEY) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ExportError::malformed(
                    "invoice \"items\" must be an array of line items",
                ))
            }
            None => return Err(ExportError::malformed("invoice has no \"items\" array")),
        };

        let items = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                if !item.is_object() {
                    return Err(ExportError::malformed(format!(
                        "line item {} is not an object",
                        idx + 1
                    )));
                }
                serde_json::from_value::<LineItem>(item).map_err(|e| {
                    ExportError::malformed(format!("line item {}: {}", idx + 1, e))
                })
            })
            .collect::<ExportResult<Vec<_>>>()?;

        Ok(Self {
            fields: object,
            items,
        })
    }

    /// Sum of all line totals
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The declared `total` field, falling back to the computed sum
    pub fn total(&self) -> InvoiceTotal {
        match self.fields.get("total") {
            Some(value) if !value.is_null() => InvoiceTotal::Declared(value.clone()),
            _ => InvoiceTotal::Computed(self.computed_total()),
        }
    }

    /// Read a non-empty string field
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Line items as flat records (`description`, `quantity`, `unitPrice`, `total`)
    pub fn item_records(&self) -> Vec<ExportRecord> {
        self.items
            .iter()
            .map(|item| {
                let mut record = ExportRecord::new();
                record.insert("description".into(), Value::String(item.description.clone()));
                record.insert("quantity".into(), float_value(item.quantity));
                record.insert("unitPrice".into(), float_value(item.unit_price));
                record.insert("total".into(), float_value(item.line_total()));
                record
            })
            .collect()
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(value: Value) -> ExportRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_line_items_with_aliases() {
        let invoice = Invoice::from_object(order(json!({
            "id": "CMD-001",
            "customer": "Awa Diop",
            "items": [
                {"name": "Savon", "quantity": 2, "price": 1500},
                {"description": "Huile", "qty": "3", "unitPrice": "2 000"},
                {"product": "Sac", "unit_price": 500}
            ]
        })))
        .unwrap();

        assert_eq!(invoice.items.len(), 3);
        assert_eq!(invoice.items[0].description, "Savon");
        assert_eq!(invoice.items[1].unit_price, 2000.0);
        assert_eq!(invoice.items[2].quantity, 1.0);
        assert_eq!(invoice.computed_total(), 3000.0 + 6000.0 + 500.0);
        assert!(!invoice.fields.contains_key("items"));
        assert_eq!(invoice.field_str("customer"), Some("Awa Diop"));
    }

    #[test]
    fn test_declared_total_wins() {
        let invoice = Invoice::from_object(order(json!({
            "total": "9 999 FCFA",
            "items": [{"name": "A", "price": 1}]
        })))
        .unwrap();
        assert_eq!(invoice.total(), InvoiceTotal::Declared(json!("9 999 FCFA")));
    }

    #[test]
    fn test_missing_price_is_malformed() {
        let err = Invoice::from_object(order(json!({"items": [{"name": "A"}]}))).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_non_object_item_is_malformed() {
        let err = Invoice::from_object(order(json!({"items": ["A"]}))).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1 500"), Some(1500.0));
        assert_eq!(parse_amount("12,5"), Some(12.5));
        assert_eq!(parse_amount("9 999 FCFA"), Some(9999.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_item_records() {
        let invoice = Invoice::from_object(order(json!({
            "items": [{"name": "Savon", "quantity": 2, "price": 1500}]
        })))
        .unwrap();
        let records = invoice.item_records();
        let keys: Vec<_> = records[0].keys().cloned().collect();
        assert_eq!(keys, vec!["description", "quantity", "unitPrice", "total"]);
        assert_eq!(records[0]["total"], json!(3000.0));
    }
}
