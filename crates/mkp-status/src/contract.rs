//! Won-bid sale contract status.
//!
//! ```text
//!   Pending ──► Send ──► Signed ──┬──► Approved (term.)
//!                                 └──► Rejected (term.)
//!   Unknown: anything the backend sent that we do not recognise; inert.
//! ```
//!
//! Admin approve/reject is live only at `Signed`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{Lifecycle, Resolution, Resolvable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractStatus {
    /// Contract generated, not yet sent to the buyer.
    Pending,
    /// Sent to the buyer for signature.
    Send,
    /// Buyer signed; awaiting admin decision.
    Signed,
    /// **Terminal.**
    Approved,
    /// **Terminal.**
    Rejected,
    /// Catch-all for unrecognised wire values.
    Unknown,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "Pending",
            ContractStatus::Send => "Send",
            ContractStatus::Signed => "Signed",
            ContractStatus::Approved => "Approved",
            ContractStatus::Rejected => "Rejected",
            ContractStatus::Unknown => "Unknown",
        }
    }

    /// Case-insensitive parse; never fails.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => ContractStatus::Pending,
            "send" | "sent" => ContractStatus::Send,
            "signed" => ContractStatus::Signed,
            "approved" => ContractStatus::Approved,
            "rejected" => ContractStatus::Rejected,
            _ => ContractStatus::Unknown,
        }
    }

    /// Approve/reject controls are active.
    pub fn action_allowed(self) -> bool {
        crate::lifecycle::action_allowed(self)
    }

    /// Display-side terminal check (stop polling, hide actions).
    pub fn is_final(self) -> bool {
        self.is_terminal()
    }
}

impl Lifecycle for ContractStatus {
    const ACTIONABLE: Self = ContractStatus::Signed;

    fn is_terminal(self) -> bool {
        matches!(self, ContractStatus::Approved | ContractStatus::Rejected)
    }

    fn advances_to(self, target: Self) -> bool {
        use ContractStatus::*;
        matches!(
            (self, target),
            (Pending, Send) | (Send, Signed) | (Signed, Approved) | (Signed, Rejected)
        )
    }
}

impl Resolvable for ContractStatus {
    fn resolved(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Approve => ContractStatus::Approved,
            Resolution::Reject => ContractStatus::Rejected,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ContractStatus {
    fn from(s: String) -> Self {
        ContractStatus::parse(&s)
    }
}

impl From<ContractStatus> for String {
    fn from(s: ContractStatus) -> String {
        s.as_str().to_string()
    }
}
