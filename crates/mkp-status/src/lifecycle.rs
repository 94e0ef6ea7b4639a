//! Generic status lifecycle guard.
//!
//! # Design
//!
//! Every status vocabulary in the marketplace (orders, won-bid contracts,
//! payment slips, user licenses) follows the same shape: a finite set of
//! states, one state from which the admin may act, a terminal predicate, and
//! a forward rule. [`Lifecycle`] captures that shape once; the free functions
//! in this module evaluate any vocabulary that implements it.
//!
//! Evaluation order for [`check_transition`]:
//!
//! 1. `target == current`  → [`RefusalReason::NoOp`]
//! 2. `current` terminal   → [`RefusalReason::FromTerminal`]
//! 3. `!advances_to`       → [`RefusalReason::NotPermitted`]
//!
//! All logic is pure: no IO, no clock, no randomness.

use std::fmt;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// A status vocabulary with a single actionable value, a terminal predicate
/// and a forward rule.
pub trait Lifecycle: Copy + Eq + fmt::Debug + fmt::Display {
    /// The one value from which the admin/user action may be invoked.
    const ACTIONABLE: Self;

    /// Returns `true` if no further transitions are possible.
    fn is_terminal(self) -> bool;

    /// Vocabulary-specific forward rule.
    ///
    /// Only consulted after the no-op and terminal checks have passed, so
    /// implementations never see `self == target` or a terminal `self`.
    ///
    /// The default is the one-shot "finalize-from-pending" shape: the
    /// actionable value may move to any terminal value, nothing else moves.
    fn advances_to(self, target: Self) -> bool {
        self == Self::ACTIONABLE && target.is_terminal()
    }
}

/// A lifecycle that ends in an approve/reject decision.
pub trait Resolvable: Lifecycle {
    /// The terminal value this vocabulary uses for `resolution`.
    fn resolved(resolution: Resolution) -> Self;
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// An admin decision in a one-shot approval flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Approve => "approve",
            Resolution::Reject => "reject",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TransitionRefusal
// ---------------------------------------------------------------------------

/// Why a guard refused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefusalReason {
    /// Target equals the current status (already selected).
    NoOp,
    /// Current status is terminal.
    FromTerminal,
    /// The vocabulary's forward rule does not allow this move.
    NotPermitted,
    /// The one-shot action is only available from the actionable value.
    NotActionable,
}

impl RefusalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefusalReason::NoOp => "no_op",
            RefusalReason::FromTerminal => "from_terminal",
            RefusalReason::NotPermitted => "not_permitted",
            RefusalReason::NotActionable => "not_actionable",
        }
    }
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a guard refuses a transition.
///
/// This is not a fault: callers render it as a disabled control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRefusal<S> {
    pub from: S,
    pub to: S,
    pub reason: RefusalReason,
}

impl<S: fmt::Display> fmt::Display for TransitionRefusal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transition refused: {} -> {} ({})",
            self.from, self.to, self.reason
        )
    }
}

impl<S: fmt::Debug + fmt::Display> std::error::Error for TransitionRefusal<S> {}

// ---------------------------------------------------------------------------
// Guard functions
// ---------------------------------------------------------------------------

/// Decide whether `current -> target` may be attempted.
///
/// # Errors
/// Returns the [`TransitionRefusal`] describing the first rule that failed.
pub fn check_transition<S: Lifecycle>(current: S, target: S) -> Result<(), TransitionRefusal<S>> {
    let refuse = |reason| {
        Err(TransitionRefusal {
            from: current,
            to: target,
            reason,
        })
    };

    if current == target {
        return refuse(RefusalReason::NoOp);
    }
    if current.is_terminal() {
        return refuse(RefusalReason::FromTerminal);
    }
    if !current.advances_to(target) {
        return refuse(RefusalReason::NotPermitted);
    }
    Ok(())
}

/// Boolean form of [`check_transition`].
pub fn transition_allowed<S: Lifecycle>(current: S, target: S) -> bool {
    check_transition(current, target).is_ok()
}

/// Keep only the offered targets reachable from `current`, preserving order.
pub fn allowed_targets<S, I>(current: S, offered: I) -> Vec<S>
where
    S: Lifecycle,
    I: IntoIterator<Item = S>,
{
    offered
        .into_iter()
        .filter(|t| transition_allowed(current, *t))
        .collect()
}

/// Finalize-from-pending check: the action control is live only at the
/// vocabulary's actionable value.
pub fn action_allowed<S: Lifecycle>(status: S) -> bool {
    status == S::ACTIONABLE
}

/// Check an approve/reject decision against the current status.
///
/// # Errors
/// [`RefusalReason::NotActionable`] when `current` is not the actionable
/// value; otherwise whatever [`check_transition`] reports.
pub fn check_resolution<S: Resolvable>(
    current: S,
    resolution: Resolution,
) -> Result<S, TransitionRefusal<S>> {
    let target = S::resolved(resolution);
    if !action_allowed(current) {
        return Err(TransitionRefusal {
            from: current,
            to: target,
            reason: RefusalReason::NotActionable,
        });
    }
    check_transition(current, target)?;
    Ok(target)
}

// ---------------------------------------------------------------------------
// StatusCodeError
// ---------------------------------------------------------------------------

/// A numeric wire code that does not belong to the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodeError {
    pub vocabulary: &'static str,
    pub code: u8,
}

impl fmt::Display for StatusCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} status code: {}", self.vocabulary, self.code)
    }
}

impl std::error::Error for StatusCodeError {}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
