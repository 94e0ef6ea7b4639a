//! Scenario: one-shot approval flows finalize from pending exactly once.
//!
//! # Invariants under test
//! - Payment slip and license actions are live only at `Pending`.
//! - Once a terminal value is reached, every evaluation returns false,
//!   whichever terminal value it is and however often it is asked.
//! - Contract approve/reject is live only at `Signed`.

use mkp_status::{
    action_allowed, check_resolution, ContractStatus, PaymentSlipStatus, RefusalReason,
    Resolution, VerificationStatus,
};

// ---------------------------------------------------------------------------
// Payment slip
// ---------------------------------------------------------------------------

#[test]
fn approved_slip_disables_both_controls() {
    let slip = PaymentSlipStatus::Approve;
    for _ in 0..3 {
        assert!(check_resolution(slip, Resolution::Approve).is_err());
        assert!(check_resolution(slip, Resolution::Reject).is_err());
        assert!(!action_allowed(slip));
    }
}

#[test]
fn pending_slip_resolves_to_either_terminal() {
    assert_eq!(
        check_resolution(PaymentSlipStatus::Pending, Resolution::Approve).unwrap(),
        PaymentSlipStatus::Approve
    );
    assert_eq!(
        check_resolution(PaymentSlipStatus::Pending, Resolution::Reject).unwrap(),
        PaymentSlipStatus::Decline
    );
}

#[test]
fn finalized_slip_reports_not_actionable() {
    let err = check_resolution(PaymentSlipStatus::Decline, Resolution::Approve).unwrap_err();
    assert_eq!(err.reason, RefusalReason::NotActionable);
    assert_eq!(err.from, PaymentSlipStatus::Decline);
}

// ---------------------------------------------------------------------------
// License verification
// ---------------------------------------------------------------------------

#[test]
fn license_action_only_at_pending() {
    assert!(action_allowed(VerificationStatus::Pending));
    assert!(!action_allowed(VerificationStatus::Approved));
    assert!(!action_allowed(VerificationStatus::Declined));
}

#[test]
fn declined_license_stays_declined() {
    let err = check_resolution(VerificationStatus::Declined, Resolution::Approve).unwrap_err();
    assert_eq!(err.reason, RefusalReason::NotActionable);
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[test]
fn contract_action_only_when_signed() {
    assert!(ContractStatus::Signed.action_allowed());
    assert!(!ContractStatus::Pending.action_allowed());
    assert!(!ContractStatus::Approved.action_allowed());
    assert!(!ContractStatus::Rejected.action_allowed());
    assert!(!ContractStatus::Send.action_allowed());
    assert!(!ContractStatus::Unknown.action_allowed());
}

#[test]
fn signed_contract_resolves_to_approved_or_rejected() {
    assert_eq!(
        check_resolution(ContractStatus::Signed, Resolution::Approve).unwrap(),
        ContractStatus::Approved
    );
    assert_eq!(
        check_resolution(ContractStatus::Signed, Resolution::Reject).unwrap(),
        ContractStatus::Rejected
    );
}
