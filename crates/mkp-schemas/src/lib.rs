//! Wire types for the marketplace REST backend.
//!
//! Entity views are the client's display-bound copies; the backend owns and
//! persists the real records. Monetary amounts stay as decimal strings.
//! No business logic lives here.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use mkp_status::{ContractStatus, OrderStatus, PaymentSlipStatus, Resolution, VerificationStatus};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// `{ success | status: bool, message?: string, data?: T }`
///
/// The backend flags the outcome under `success`, `status`, or both. When
/// both are present they must agree; a missing flag on either side defers to
/// the other.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "none")]
    data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;
        let success = match (raw.success, raw.status) {
            (Some(a), Some(b)) if a != b => {
                return Err(de::Error::custom(
                    "envelope flags disagree: success and status differ",
                ))
            }
            (Some(flag), _) | (None, Some(flag)) => flag,
            (None, None) => return Err(de::Error::missing_field("success")),
        };
        Ok(ApiEnvelope {
            success,
            message: raw.message,
            data: raw.data,
        })
    }
}

impl<T> ApiEnvelope<T> {
    /// Message text, or `"unknown"` when the backend sent none.
    pub fn message_or_unknown(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// Mutation acknowledgement: whatever message the backend attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Entity views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub machinery_name: Option<String>,
    #[serde(default)]
    pub total_amount: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An auction line item whose bid was accepted; carries the sale contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WonBid {
    pub id: String,
    pub contract_status: ContractStatus,
    #[serde(default)]
    pub machinery_name: Option<String>,
    #[serde(default)]
    pub bid_amount: Option<String>,
    #[serde(default)]
    pub contract_url: Option<String>,
    #[serde(default)]
    pub signature_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSlip {
    pub id: String,
    pub status: PaymentSlipStatus,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub slip_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLicense {
    pub user_id: String,
    pub license_status: VerificationStatus,
    #[serde(default)]
    pub license_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Mutation bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub order_id: String,
    /// Serialized as the numeric rank.
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSlipUpdate {
    pub slip_id: String,
    /// Always a terminal value: 1 approve, 2 decline.
    pub status: PaymentSlipStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractAction {
    Approve,
    Reject,
}

impl From<Resolution> for ContractAction {
    fn from(r: Resolution) -> Self {
        match r {
            Resolution::Approve => ContractAction::Approve,
            Resolution::Reject => ContractAction::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractActionRequest {
    pub won_bid_id: String,
    pub action: ContractAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseAction {
    Approve,
    Decline,
}

impl From<Resolution> for LicenseAction {
    fn from(r: Resolution) -> Self {
        match r {
            Resolution::Approve => LicenseAction::Approve,
            Resolution::Reject => LicenseAction::Decline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseActionRequest {
    pub user_id: String,
    pub action: LicenseAction,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accepts_status_alias() {
        let env: ApiEnvelope<Order> = serde_json::from_value(json!({
            "status": true,
            "data": { "id": "o-1", "order_status": 3 }
        }))
        .unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().order_status, OrderStatus::Shipped);
    }

    #[test]
    fn envelope_with_both_outcome_keys() {
        let env: ApiEnvelope<Order> = serde_json::from_value(json!({
            "success": true,
            "status": true,
            "data": { "id": "o-2", "order_status": 1 }
        }))
        .unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().id, "o-2");
    }

    #[test]
    fn envelope_with_conflicting_or_missing_outcome_is_rejected() {
        let conflicting =
            serde_json::from_value::<ApiEnvelope<Order>>(json!({ "success": true, "status": false }));
        assert!(conflicting.is_err());

        let missing = serde_json::from_value::<ApiEnvelope<Order>>(json!({ "message": "hi" }))
            .unwrap_err();
        assert!(missing.to_string().contains("success"), "got: {missing}");
    }

    #[test]
    fn envelope_without_data_or_message() {
        let env: ApiEnvelope<Order> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message_or_unknown(), "unknown");
    }

    #[test]
    fn order_status_update_sends_numeric_code() {
        let body = serde_json::to_value(OrderStatusUpdate {
            order_id: "o-9".to_string(),
            status: OrderStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(body, json!({ "order_id": "o-9", "status": 6 }));
    }

    #[test]
    fn license_reject_is_sent_as_decline() {
        let body = serde_json::to_value(LicenseActionRequest {
            user_id: "u-1".to_string(),
            action: Resolution::Reject.into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "user_id": "u-1", "action": "decline" }));
    }

    #[test]
    fn won_bid_with_unrecognised_contract_status() {
        let bid: WonBid = serde_json::from_value(json!({
            "id": "wb-1",
            "contract_status": "archived"
        }))
        .unwrap();
        assert_eq!(bid.contract_status, ContractStatus::Unknown);
    }
}
