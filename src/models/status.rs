//! Order and stock status vocabularies
//!
//! Records carry status tokens (`pending`, `instock`...); documents show
//! the French labels instead.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    /// Waiting for manual validation
    OnHold,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
        Self::OnHold,
    ];

    /// Token stored in records
    pub fn token(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::OnHold => "onhold",
        }
    }

    /// Label shown in documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Processing => "En traitement",
            Self::Completed => "Terminé",
            Self::Cancelled => "Annulé",
            Self::OnHold => "En attente de validation",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.token() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Stock level of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];

    /// Token stored in records
    pub fn token(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::LowStock => "lowstock",
            Self::OutOfStock => "outofstock",
        }
    }

    /// Label shown in documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "En stock",
            Self::LowStock => "Stock faible",
            Self::OutOfStock => "Rupture de stock",
        }
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.token() == s)
            .ok_or_else(|| format!("Unknown stock status: {}", s))
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label for a raw status token, or the token itself when unknown
pub fn status_label(raw: &str) -> Cow<'_, str> {
    if let Ok(status) = raw.parse::<OrderStatus>() {
        return Cow::Borrowed(status.label());
    }
    if let Ok(status) = raw.parse::<StockStatus>() {
        return Cow::Borrowed(status.label());
    }
    Cow::Borrowed(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_labels() {
        let expected = [
            ("pending", "En attente"),
            ("processing", "En traitement"),
            ("completed", "Terminé"),
            ("cancelled", "Annulé"),
            ("onhold", "En attente de validation"),
        ];
        for (token, label) in expected {
            assert_eq!(status_label(token), label);
            assert_eq!(token.parse::<OrderStatus>().unwrap().label(), label);
        }
    }

    #[test]
    fn test_stock_labels() {
        assert_eq!(status_label("instock"), "En stock");
        assert_eq!(status_label("lowstock"), "Stock faible");
        assert_eq!(status_label("outofstock"), "Rupture de stock");
    }

    #[test]
    fn test_unknown_status_falls_back_to_raw() {
        assert_eq!(status_label("shipped"), "shipped");
        assert_eq!(status_label(""), "");
        assert!("PENDING".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_tokens() {
        let status: OrderStatus = serde_json::from_str("\"onhold\"").unwrap();
        assert_eq!(status, OrderStatus::OnHold);
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"outofstock\""
        );
    }
}
