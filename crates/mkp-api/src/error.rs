use std::fmt;

use mkp_status::RefusalReason;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The record an action targets. Also the prefix of its in-flight key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Order,
    WonBid,
    PaymentSlip,
    UserLicense,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Order => "order",
            EntityKind::WonBid => "won_bid",
            EntityKind::PaymentSlip => "payment_slip",
            EntityKind::UserLicense => "user_license",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// A failed backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// Non-2xx response.
    Http { status: u16, message: String },
    /// 2xx response carrying `success: false`.
    Rejected { message: String },
    /// Body could not be decoded, or a fetch came back without `data`.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "API_TRANSPORT: {msg}"),
            ApiError::Http { status, message } => {
                write!(f, "API_HTTP_{status}: {message}")
            }
            ApiError::Rejected { message } => write!(f, "API_REJECTED: {message}"),
            ApiError::Decode(msg) => write!(f, "API_DECODE: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

// ---------------------------------------------------------------------------
// ActionError
// ---------------------------------------------------------------------------

/// Why a gateway action did not complete.
///
/// Only [`ActionError::Remote`] means a network call was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The entity copy has a blank id.
    MissingId { entity: EntityKind },
    /// The status guard refused the move.
    Refused {
        entity: EntityKind,
        from: String,
        to: String,
        reason: RefusalReason,
    },
    /// Another action on the same entity is still pending.
    InFlight { key: String },
    /// The backend call failed; the local copy is unchanged.
    Remote(ApiError),
}

impl ActionError {
    /// True when the failure happened before any network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, ActionError::Remote(_))
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MissingId { entity } => {
                write!(f, "ACTION_MISSING_ID: {entity} has no id")
            }
            ActionError::Refused {
                entity,
                from,
                to,
                reason,
            } => write!(f, "ACTION_REFUSED: {entity} {from} -> {to} ({reason})"),
            ActionError::InFlight { key } => {
                write!(f, "ACTION_IN_FLIGHT: {key} already has a pending action")
            }
            ActionError::Remote(e) => write!(f, "ACTION_REMOTE_FAILED: {e}"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for ActionError {
    fn from(e: ApiError) -> Self {
        ActionError::Remote(e)
    }
}
