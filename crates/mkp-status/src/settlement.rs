//! One-shot approval vocabularies: payment slips and user licenses.
//!
//! Both use the default finalize-from-pending rule from
//! [`Lifecycle::advances_to`]: `Pending` may move to either terminal value,
//! and once it leaves `Pending` nothing moves again.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{Lifecycle, Resolution, Resolvable, StatusCodeError};

// ---------------------------------------------------------------------------
// PaymentSlipStatus
// ---------------------------------------------------------------------------

/// Payment slip review status. Wire codes: 0 pending, 1 approve, 2 decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentSlipStatus {
    Pending,
    Approve,
    Decline,
}

impl PaymentSlipStatus {
    pub fn code(self) -> u8 {
        match self {
            PaymentSlipStatus::Pending => 0,
            PaymentSlipStatus::Approve => 1,
            PaymentSlipStatus::Decline => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentSlipStatus::Pending => "pending",
            PaymentSlipStatus::Approve => "approve",
            PaymentSlipStatus::Decline => "decline",
        }
    }
}

impl Lifecycle for PaymentSlipStatus {
    const ACTIONABLE: Self = PaymentSlipStatus::Pending;

    fn is_terminal(self) -> bool {
        self != PaymentSlipStatus::Pending
    }
}

impl Resolvable for PaymentSlipStatus {
    fn resolved(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Approve => PaymentSlipStatus::Approve,
            Resolution::Reject => PaymentSlipStatus::Decline,
        }
    }
}

impl fmt::Display for PaymentSlipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PaymentSlipStatus> for u8 {
    fn from(s: PaymentSlipStatus) -> u8 {
        s.code()
    }
}

impl TryFrom<u8> for PaymentSlipStatus {
    type Error = StatusCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PaymentSlipStatus::Pending),
            1 => Ok(PaymentSlipStatus::Approve),
            2 => Ok(PaymentSlipStatus::Decline),
            _ => Err(StatusCodeError {
                vocabulary: "payment slip",
                code,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// User license verification status. Wire codes: 0 pending, 1 approved, 2 declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Declined,
}

impl VerificationStatus {
    pub fn code(self) -> u8 {
        match self {
            VerificationStatus::Pending => 0,
            VerificationStatus::Approved => 1,
            VerificationStatus::Declined => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Declined => "declined",
        }
    }
}

impl Lifecycle for VerificationStatus {
    const ACTIONABLE: Self = VerificationStatus::Pending;

    fn is_terminal(self) -> bool {
        self != VerificationStatus::Pending
    }
}

impl Resolvable for VerificationStatus {
    fn resolved(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Approve => VerificationStatus::Approved,
            Resolution::Reject => VerificationStatus::Declined,
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VerificationStatus> for u8 {
    fn from(s: VerificationStatus) -> u8 {
        s.code()
    }
}

impl TryFrom<u8> for VerificationStatus {
    type Error = StatusCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VerificationStatus::Pending),
            1 => Ok(VerificationStatus::Approved),
            2 => Ok(VerificationStatus::Declined),
            _ => Err(StatusCodeError {
                vocabulary: "verification",
                code,
            }),
        }
    }
}
