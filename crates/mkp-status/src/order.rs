//! Order delivery status.
//!
//! Ranked vocabulary; the wire code is the rank.
//!
//! ```text
//!   Pending(0) → Confirmed(1) → Process(2) → Shipped(3) → InTransit(4) → Delivered(5) (term.)
//!      │             │              │             │              │
//!      └─────────────┴──────────────┴─────────────┴──────────────┴──► Cancelled(6) (term.)
//! ```
//!
//! Forward jumps are allowed (an order may go straight from `Pending` to
//! `Shipped`); moving backward is not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{check_transition, Lifecycle, RefusalReason, StatusCodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Process,
    Shipped,
    InTransit,
    /// **Terminal.** Cannot be cancelled.
    Delivered,
    /// **Terminal.**
    Cancelled,
}

impl OrderStatus {
    /// Every status in rank order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Process,
        OrderStatus::Shipped,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Rank used for forward/backward comparison. Also the wire code.
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Process => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::InTransit => 4,
            OrderStatus::Delivered => 5,
            OrderStatus::Cancelled => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.rank() == code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Process => "process",
            OrderStatus::Shipped => "shipped",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Status picker model: every status with its selected/enabled flags.
    pub fn options(self) -> Vec<StatusOption> {
        Self::ALL
            .into_iter()
            .map(|status| {
                let refusal = check_transition(self, status).err().map(|r| r.reason);
                StatusOption {
                    status,
                    selected: status == self,
                    enabled: refusal.is_none(),
                    refusal,
                }
            })
            .collect()
    }
}

impl Lifecycle for OrderStatus {
    // Initial state. Orders have no one-shot action; progress is ranked.
    const ACTIONABLE: Self = OrderStatus::Pending;

    fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    fn advances_to(self, target: Self) -> bool {
        match (self, target) {
            // Cancellation has its own guard path: never after delivery.
            (OrderStatus::Delivered, OrderStatus::Cancelled) => false,
            _ => target.rank() > self.rank(),
        }
    }
}

/// One row of a status picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub status: OrderStatus,
    pub selected: bool,
    pub enabled: bool,
    /// Why the row is disabled, if it is.
    pub refusal: Option<RefusalReason>,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for u8 {
    fn from(s: OrderStatus) -> u8 {
        s.rank()
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = StatusCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OrderStatus::from_code(code).ok_or(StatusCodeError {
            vocabulary: "order",
            code,
        })
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// Accepts the snake_case name, the display label without separators,
    /// or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        if let Ok(code) = norm.parse::<u8>() {
            return OrderStatus::from_code(code)
                .ok_or_else(|| format!("invalid order status code '{code}'"));
        }

        match norm.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "process" | "processing" => Ok(OrderStatus::Process),
            "shipped" => Ok(OrderStatus::Shipped),
            "intransit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!(
                "invalid order status '{}'. expected one of: pending | confirmed | process | \
                 shipped | in_transit | delivered | cancelled",
                s.trim()
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
