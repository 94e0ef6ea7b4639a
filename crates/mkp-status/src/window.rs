//! Time-bounded bidding window.
//!
//! The window is the half-open interval `[opens_at, closes_at)` in UTC.
//! Auction closing happens on the backend; this only classifies an instant so
//! views can show whether bidding is live. The caller supplies `now`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPhase {
    Upcoming,
    Open,
    Closed,
}

impl WindowPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPhase::Upcoming => "upcoming",
            WindowPhase::Open => "open",
            WindowPhase::Closed => "closed",
        }
    }
}

impl fmt::Display for WindowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// `closes_at` is not strictly after `opens_at`.
    Inverted {
        opens_at: DateTime<Utc>,
        closes_at: DateTime<Utc>,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Inverted {
                opens_at,
                closes_at,
            } => write!(
                f,
                "bidding window closes_at {} must be after opens_at {}",
                closes_at.to_rfc3339(),
                opens_at.to_rfc3339()
            ),
        }
    }
}

impl std::error::Error for WindowError {}

/// Only constructible through [`BiddingWindow::new`]; deserialization goes
/// through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct BiddingWindow {
    opens_at: DateTime<Utc>,
    closes_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawWindow {
    opens_at: DateTime<Utc>,
    closes_at: DateTime<Utc>,
}

impl TryFrom<RawWindow> for BiddingWindow {
    type Error = WindowError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        BiddingWindow::new(raw.opens_at, raw.closes_at)
    }
}

impl BiddingWindow {
    pub fn new(opens_at: DateTime<Utc>, closes_at: DateTime<Utc>) -> Result<Self, WindowError> {
        if closes_at <= opens_at {
            return Err(WindowError::Inverted {
                opens_at,
                closes_at,
            });
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    pub fn opens_at(&self) -> DateTime<Utc> {
        self.opens_at
    }

    pub fn closes_at(&self) -> DateTime<Utc> {
        self.closes_at
    }

    pub fn phase(&self, now: DateTime<Utc>) -> WindowPhase {
        if now < self.opens_at {
            WindowPhase::Upcoming
        } else if now < self.closes_at {
            WindowPhase::Open
        } else {
            WindowPhase::Closed
        }
    }

    pub fn accepts_bids(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) == WindowPhase::Open
    }

    /// Time left to bid, `None` unless the window is open.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.phase(now) {
            WindowPhase::Open => Some(self.closes_at - now),
            _ => None,
        }
    }
}
