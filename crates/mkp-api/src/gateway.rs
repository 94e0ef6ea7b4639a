//! Action Gateway: the single path from an admin action to the backend.
//!
//! # Steps (every mutation, in order)
//!
//! 1. Precondition: a blank entity id is refused with `MissingId`.
//! 2. Guard: the status lifecycle must allow the move (`Refused`).
//! 3. Latch: one pending action per `entity:id` (`InFlight`).
//! 4. Remote call: failures surface as `Remote` and leave the local copy alone.
//! 5. Patch: on success the local copy takes the target status.
//!
//! Steps 1 to 3 never touch the network. There are no retries.

use std::fmt::Display;

use tracing::{debug, info, warn};

use mkp_schemas::{
    Ack, ContractActionRequest, LicenseActionRequest, Order, OrderStatusUpdate, PaymentSlip,
    PaymentSlipUpdate, UserLicense, WonBid,
};
use mkp_status::{check_resolution, check_transition, OrderStatus, Resolution, TransitionRefusal};

use crate::backend::MarketplaceBackend;
use crate::error::{ActionError, ApiError, EntityKind};
use crate::inflight::{InFlight, InFlightClaim};

pub struct ActionGateway<B> {
    backend: B,
    inflight: InFlight,
}

impl<B: MarketplaceBackend> ActionGateway<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            inflight: InFlight::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn inflight(&self) -> &InFlight {
        &self.inflight
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Move an order to `target` along the forward-only order lifecycle.
    pub async fn set_order_status(
        &self,
        order: &mut Order,
        target: OrderStatus,
    ) -> Result<Ack, ActionError> {
        let entity = EntityKind::Order;
        require_id(entity, &order.id)?;
        check_transition(order.order_status, target).map_err(|r| refused(entity, &order.id, r))?;
        let _claim = self.claim(entity, &order.id)?;

        let req = OrderStatusUpdate {
            order_id: order.id.clone(),
            status: target,
        };
        let ack = settle(entity, &order.id, self.backend.update_order_status(&req).await)?;

        info!(entity = %entity, id = %order.id, from = %order.order_status, to = %target, "status updated");
        order.order_status = target;
        Ok(ack)
    }

    /// Approve or decline a pending payment slip.
    pub async fn resolve_payment_slip(
        &self,
        slip: &mut PaymentSlip,
        resolution: Resolution,
    ) -> Result<Ack, ActionError> {
        let entity = EntityKind::PaymentSlip;
        require_id(entity, &slip.id)?;
        let target =
            check_resolution(slip.status, resolution).map_err(|r| refused(entity, &slip.id, r))?;
        let _claim = self.claim(entity, &slip.id)?;

        let req = PaymentSlipUpdate {
            slip_id: slip.id.clone(),
            status: target,
        };
        let ack = settle(entity, &slip.id, self.backend.update_payment_slip(&req).await)?;

        info!(entity = %entity, id = %slip.id, from = %slip.status, to = %target, "status updated");
        slip.status = target;
        Ok(ack)
    }

    /// Approve or reject the contract of a won bid. Only a signed contract
    /// can be resolved.
    pub async fn resolve_contract(
        &self,
        bid: &mut WonBid,
        resolution: Resolution,
    ) -> Result<Ack, ActionError> {
        let entity = EntityKind::WonBid;
        require_id(entity, &bid.id)?;
        let target = check_resolution(bid.contract_status, resolution)
            .map_err(|r| refused(entity, &bid.id, r))?;
        let _claim = self.claim(entity, &bid.id)?;

        let req = ContractActionRequest {
            won_bid_id: bid.id.clone(),
            action: resolution.into(),
        };
        let ack = settle(entity, &bid.id, self.backend.contract_action(&req).await)?;

        info!(entity = %entity, id = %bid.id, from = %bid.contract_status, to = %target, "status updated");
        bid.contract_status = target;
        Ok(ack)
    }

    /// Approve or decline a user's uploaded license.
    pub async fn resolve_license(
        &self,
        license: &mut UserLicense,
        resolution: Resolution,
    ) -> Result<Ack, ActionError> {
        let entity = EntityKind::UserLicense;
        require_id(entity, &license.user_id)?;
        let target = check_resolution(license.license_status, resolution)
            .map_err(|r| refused(entity, &license.user_id, r))?;
        let _claim = self.claim(entity, &license.user_id)?;

        let req = LicenseActionRequest {
            user_id: license.user_id.clone(),
            action: resolution.into(),
        };
        let ack = settle(entity, &license.user_id, self.backend.license_action(&req).await)?;

        info!(
            entity = %entity,
            id = %license.user_id,
            from = %license.license_status,
            to = %target,
            "status updated"
        );
        license.license_status = target;
        Ok(ack)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn fetch_order(&self, order_id: &str) -> Result<Order, ActionError> {
        require_id(EntityKind::Order, order_id)?;
        Ok(self.backend.fetch_order(order_id).await?)
    }

    pub async fn fetch_won_bid(&self, won_bid_id: &str) -> Result<WonBid, ActionError> {
        require_id(EntityKind::WonBid, won_bid_id)?;
        Ok(self.backend.fetch_won_bid(won_bid_id).await?)
    }

    pub async fn fetch_payment_slip(&self, slip_id: &str) -> Result<PaymentSlip, ActionError> {
        require_id(EntityKind::PaymentSlip, slip_id)?;
        Ok(self.backend.fetch_payment_slip(slip_id).await?)
    }

    pub async fn fetch_user_license(&self, user_id: &str) -> Result<UserLicense, ActionError> {
        require_id(EntityKind::UserLicense, user_id)?;
        Ok(self.backend.fetch_user_license(user_id).await?)
    }

    fn claim(&self, entity: EntityKind, id: &str) -> Result<InFlightClaim, ActionError> {
        let key = InFlight::key(entity, id);
        self.inflight.try_claim(key.clone()).ok_or_else(|| {
            debug!(%key, "action already in flight");
            ActionError::InFlight { key }
        })
    }
}

fn require_id(entity: EntityKind, id: &str) -> Result<(), ActionError> {
    if id.trim().is_empty() {
        return Err(ActionError::MissingId { entity });
    }
    Ok(())
}

fn refused<S: Display>(entity: EntityKind, id: &str, r: TransitionRefusal<S>) -> ActionError {
    debug!(entity = %entity, id = %id, from = %r.from, to = %r.to, reason = %r.reason, "action refused by guard");
    ActionError::Refused {
        entity,
        from: r.from.to_string(),
        to: r.to.to_string(),
        reason: r.reason,
    }
}

fn settle(entity: EntityKind, id: &str, result: Result<Ack, ApiError>) -> Result<Ack, ActionError> {
    result.map_err(|e| {
        warn!(entity = %entity, id = %id, error = %e, "backend call failed");
        ActionError::Remote(e)
    })
}
