//! mkp-status
//!
//! Status vocabularies and transition guards for marketplace entities:
//! orders, won-bid contracts, payment slips and user licenses, plus the
//! bidding window used by auction views.
//!
//! All guards are pure decision functions built on one generic
//! [`Lifecycle`] trait. Nothing here performs IO; callers decide what to do
//! with a refusal (usually: render the control disabled).

pub mod contract;
pub mod lifecycle;
pub mod order;
pub mod settlement;
pub mod window;

pub use contract::ContractStatus;
pub use lifecycle::{
    action_allowed, allowed_targets, check_resolution, check_transition, transition_allowed,
    Lifecycle, RefusalReason, Resolution, Resolvable, StatusCodeError, TransitionRefusal,
};
pub use order::{OrderStatus, StatusOption};
pub use settlement::{PaymentSlipStatus, VerificationStatus};
pub use window::{BiddingWindow, WindowError, WindowPhase};
