//! # Receipt Service Protocol
//!
//! JSON bodies exchanged with the receipt service.
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Issuing                                    │
//! │                                                                         │
//! │  CLIENT ───► POST /api/receipts                                         │
//! │              { "customer_name": "Budi" | null,                          │
//! │                "items": [{ "name", "quantity", "price" }],              │
//! │                "notes": "..." | null }                                  │
//! │                                                                         │
//! │  SERVICE ◄── 2xx                                                        │
//! │              { "number": 7,                                             │
//! │                "items": [{ "name", "quantity", "price" }],              │
//! │                "total": 35000  (or "subtotal"),                         │
//! │                "customer_name"?, "notes"? }                             │
//! │                                                                         │
//! │  SERVICE ◄── non-2xx: body is the error detail                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are JSON numbers in rupiah; whole amounts are sent as integers.

use serde::{Deserialize, Serialize};
use struk_core::{ConfirmedReceipt, Draft, LineItem, Money};

use crate::error::{IssueError, IssueResult};

// =============================================================================
// Line Items
// =============================================================================

/// A line item as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireItem {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rupiah")]
    pub price: Money,
}

impl From<&LineItem> for WireItem {
    fn from(item: &LineItem) -> Self {
        WireItem {
            name: item.name().to_string(),
            quantity: item.quantity(),
            price: item.unit_price(),
        }
    }
}

impl From<WireItem> for LineItem {
    fn from(item: WireItem) -> Self {
        LineItem::new(item.name, item.quantity, item.price)
    }
}

// =============================================================================
// Request
// =============================================================================

/// Body of `POST /api/receipts`.
///
/// Absent optional strings are serialized as `null`, not omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRequest {
    pub customer_name: Option<String>,
    pub items: Vec<WireItem>,
    pub notes: Option<String>,
}

impl IssueRequest {
    /// Snapshots a draft for submission.
    pub fn from_draft(draft: &Draft) -> Self {
        IssueRequest {
            customer_name: draft.customer_name.clone(),
            items: draft.items.iter().map(WireItem::from).collect(),
            notes: draft.notes.clone(),
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Successful response of the receipt service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueResponse {
    pub number: i64,
    pub items: Vec<WireItem>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl IssueResponse {
    /// Converts the response into the authoritative receipt.
    ///
    /// `total` wins over `subtotal`; neither is checked against the lines.
    pub fn into_receipt(self) -> IssueResult<ConfirmedReceipt> {
        let number = u64::try_from(self.number)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| IssueError::failed(format!("invalid receipt number {}", self.number)))?;

        let total = self
            .total
            .or(self.subtotal)
            .ok_or_else(|| IssueError::failed("response has neither total nor subtotal"))?;
        let total = Money::try_from_rupiah(total)
            .ok_or_else(|| IssueError::failed(format!("total out of range: {total}")))?;

        Ok(ConfirmedReceipt {
            number,
            customer_name: self.customer_name,
            notes: self.notes,
            items: self.items.into_iter().map(LineItem::from).collect(),
            total,
        })
    }
}

// =============================================================================
// Rupiah Serde
// =============================================================================

/// `Money` ⇄ JSON number of rupiah.
mod rupiah {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use struk_core::Money;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.is_whole_rupiah() {
            serializer.serialize_i64(money.sen() / struk_core::money::SEN_PER_RUPIAH)
        } else {
            serializer.serialize_f64(money.as_rupiah_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from_rupiah(value)
            .ok_or_else(|| de::Error::custom(format!("price out of range: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let draft = Draft {
            customer_name: None,
            notes: Some("Lunas".to_string()),
            items: vec![
                LineItem::new("Produk A", 2, Money::from_rupiah(15_000)),
                LineItem::new("Produk B", 1, Money::from_sen(150_050)),
            ],
        };

        let body = serde_json::to_value(IssueRequest::from_draft(&draft)).unwrap();
        assert_eq!(
            body,
            json!({
                "customer_name": null,
                "items": [
                    { "name": "Produk A", "quantity": 2, "price": 15000 },
                    { "name": "Produk B", "quantity": 1, "price": 1500.5 }
                ],
                "notes": "Lunas"
            })
        );
    }

    #[test]
    fn test_response_with_total() {
        let response: IssueResponse = serde_json::from_value(json!({
            "number": 7,
            "items": [{ "name": "Produk A", "quantity": 2, "price": 15000 }],
            "total": 35000,
            "customer_name": "Budi"
        }))
        .unwrap();

        let receipt = response.into_receipt().unwrap();
        assert_eq!(receipt.number, 7);
        assert_eq!(receipt.total, Money::from_rupiah(35_000));
        assert_eq!(receipt.customer_name.as_deref(), Some("Budi"));
        assert_eq!(receipt.notes, None);
        assert_eq!(receipt.items[0].line_total(), Money::from_rupiah(30_000));
    }

    #[test]
    fn test_response_with_subtotal_only() {
        let response: IssueResponse = serde_json::from_value(json!({
            "number": 12,
            "items": [],
            "subtotal": 1000.5
        }))
        .unwrap();
        assert_eq!(response.into_receipt().unwrap().total, Money::from_sen(100_050));
    }

    #[test]
    fn test_response_total_wins_over_subtotal() {
        let response: IssueResponse = serde_json::from_value(json!({
            "number": 1, "items": [], "total": 10, "subtotal": 20
        }))
        .unwrap();
        assert_eq!(response.into_receipt().unwrap().total, Money::from_rupiah(10));
    }

    #[test]
    fn test_response_without_totals_is_invalid() {
        let response: IssueResponse =
            serde_json::from_value(json!({ "number": 1, "items": [] })).unwrap();
        assert!(matches!(response.into_receipt(), Err(IssueError::Failed(_))));
    }

    #[test]
    fn test_response_non_positive_number_is_invalid() {
        for number in [0, -3] {
            let response: IssueResponse = serde_json::from_value(json!({
                "number": number, "items": [], "total": 1
            }))
            .unwrap();
            assert!(matches!(response.into_receipt(), Err(IssueError::Failed(_))));
        }
    }

    #[test]
    fn test_response_missing_items_fails_to_decode() {
        let result = serde_json::from_value::<IssueResponse>(json!({ "number": 1, "total": 1 }));
        assert!(result.is_err());
    }
}
