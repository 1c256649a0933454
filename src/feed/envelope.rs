//! Text JSON envelope parser for order-update frames.
//!
//! The order feed sends one `OrderAlert` envelope per status change. The
//! envelope and its nested `Data` object use PascalCase field names
//! matching the upstream wire format, mirrored directly from the shape the
//! REST order types already use elsewhere in this crate.

use serde::Deserialize;

use crate::error::{BrokerError, Result};

const EXPECTED_TYPE: &str = "order_alert";

/// Order status vocabulary carried in `OrderAlertData::Status`.
pub mod status {
    pub const TRANSIT: &str = "TRANSIT";
    pub const PENDING: &str = "PENDING";
    pub const REJECTED: &str = "REJECTED";
    pub const CANCELLED: &str = "CANCELLED";
    pub const TRADED: &str = "TRADED";
    pub const EXPIRED: &str = "EXPIRED";
}

/// The top-level order-update envelope.
#[derive(Debug, Clone, Deserialize)]
#[allow(non_snake_case)]
pub struct OrderAlert {
    /// Message type; must equal `"order_alert"`.
    pub Type: String,
    /// The order update payload.
    pub Data: OrderAlertData,
}

/// Detailed order status data nested under `OrderAlert::Data`.
#[derive(Debug, Clone, Deserialize, Default)]
#[allow(non_snake_case)]
pub struct OrderAlertData {
    #[serde(default)]
    pub OrderNo: Option<String>,
    #[serde(default)]
    pub ExchOrderNo: Option<String>,
    #[serde(default)]
    pub ClientId: Option<String>,
    #[serde(default)]
    pub Symbol: Option<String>,
    #[serde(default)]
    pub SecurityId: Option<String>,
    #[serde(default)]
    pub Exchange: Option<String>,
    #[serde(default)]
    pub Segment: Option<String>,
    #[serde(default)]
    pub Product: Option<String>,
    #[serde(default)]
    pub OrderType: Option<String>,
    #[serde(default)]
    pub Validity: Option<String>,
    #[serde(default)]
    pub TxnType: Option<String>,
    #[serde(default)]
    pub Quantity: Option<i64>,
    #[serde(default)]
    pub DiscQuantity: Option<i64>,
    #[serde(default)]
    pub Price: Option<f64>,
    #[serde(default)]
    pub TriggerPrice: Option<f64>,
    #[serde(default)]
    pub TradedQty: Option<i64>,
    #[serde(default)]
    pub TradedPrice: Option<f64>,
    #[serde(default)]
    pub AvgTradedPrice: Option<f64>,
    #[serde(default)]
    pub RemainingQuantity: Option<i64>,
    /// Order status — see the [`status`] module for the recognized vocabulary.
    #[serde(default)]
    pub Status: Option<String>,
    #[serde(default)]
    pub ReasonDescription: Option<String>,
    #[serde(default)]
    pub Instrument: Option<String>,
    #[serde(default)]
    pub ExpiryDate: Option<String>,
    #[serde(default)]
    pub OptType: Option<String>,
    #[serde(default)]
    pub OrderDateTime: Option<String>,
    #[serde(default)]
    pub ExchOrderTime: Option<String>,
    #[serde(default)]
    pub LastUpdatedTime: Option<String>,
}

impl OrderAlertData {
    /// Quantity actually executed so far.
    pub fn traded_quantity(&self) -> i64 {
        self.TradedQty.unwrap_or(0)
    }

    /// Quantity still pending execution.
    pub fn remaining_quantity(&self) -> i64 {
        self.RemainingQuantity.unwrap_or(0)
    }

    /// True when the order is fully filled: status is `TRADED` and nothing
    /// remains pending.
    pub fn is_filled(&self) -> bool {
        self.Status.as_deref() == Some(status::TRADED) && self.remaining_quantity() == 0
    }

    /// True when some, but not all, of the order has executed.
    pub fn is_partial(&self) -> bool {
        self.traded_quantity() > 0 && self.remaining_quantity() > 0
    }

    /// True when the exchange or risk checks rejected the order.
    pub fn is_rejected(&self) -> bool {
        self.Status.as_deref() == Some(status::REJECTED)
    }

    /// True when the order was cancelled before full execution.
    pub fn is_cancelled(&self) -> bool {
        self.Status.as_deref() == Some(status::CANCELLED)
    }

    /// Parse `OrderDateTime` as an ISO-8601 timestamp, if present and valid.
    pub fn order_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.OrderDateTime
            .as_deref()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }

    /// Parse `LastUpdatedTime` as an ISO-8601 timestamp, if present and valid.
    pub fn last_updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.LastUpdatedTime
            .as_deref()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }
}

/// Parse a text frame into an [`OrderAlert`], rejecting envelopes whose
/// `Type` field doesn't match the expected constant.
pub fn parse_order_alert(text: &str) -> Result<OrderAlert> {
    let alert: OrderAlert = serde_json::from_str(text)
        .map_err(|e| BrokerError::InvalidEnvelope(format!("malformed order alert JSON: {e}")))?;
    if alert.Type != EXPECTED_TYPE {
        return Err(BrokerError::InvalidEnvelope(format!(
            "unexpected envelope type: {:?}",
            alert.Type
        )));
    }
    Ok(alert)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A fully traded order with nothing remaining.
    #[test]
    fn order_alert_is_filled_when_remaining_quantity_is_zero() {
        let text = r#"{
            "Type": "order_alert",
            "Data": {
                "OrderNo": "ABC123",
                "Status": "TRADED",
                "RemainingQuantity": 0,
                "TradedQty": 5,
                "AvgTradedPrice": 123.45
            }
        }"#;
        let alert = parse_order_alert(text).unwrap();
        assert!(alert.Data.is_filled());
        assert_eq!(alert.Data.traded_quantity(), 5);
        assert_eq!(alert.Data.AvgTradedPrice, Some(123.45));
    }

    #[test]
    fn partial_fill_is_detected() {
        let text = r#"{"Type":"order_alert","Data":{"Status":"PENDING","TradedQty":3,"RemainingQuantity":7}}"#;
        let alert = parse_order_alert(text).unwrap();
        assert!(alert.Data.is_partial());
        assert!(!alert.Data.is_filled());
    }

    #[test]
    fn rejected_and_cancelled_flags() {
        let rejected: OrderAlert =
            serde_json::from_str(r#"{"Type":"order_alert","Data":{"Status":"REJECTED"}}"#).unwrap();
        assert!(rejected.Data.is_rejected());

        let cancelled: OrderAlert =
            serde_json::from_str(r#"{"Type":"order_alert","Data":{"Status":"CANCELLED"}}"#).unwrap();
        assert!(cancelled.Data.is_cancelled());
    }

    #[test]
    fn wrong_envelope_type_is_rejected() {
        let text = r#"{"Type":"heartbeat","Data":{}}"#;
        let err = parse_order_alert(text).unwrap_err();
        assert!(matches!(err, BrokerError::InvalidEnvelope(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_order_alert("not json").unwrap_err();
        assert!(matches!(err, BrokerError::InvalidEnvelope(_)));
    }
}
