//! In-memory marketplace backend.
//!
//! Stores records in maps and re-checks the status lifecycle the way the real
//! backend would, so scenario tests can prove the client never relies on a
//! server-side refusal. No network I/O.
//!
//! Test hooks:
//! - `fail_next(err)`: the next call returns `err` without touching state.
//! - `hold_mutations()` / `release()`: mutations park until released, which
//!   keeps an action pending for in-flight tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Notify;

use mkp_api::{ApiError, EntityKind, MarketplaceBackend};
use mkp_schemas::{
    Ack, ContractActionRequest, LicenseActionRequest, Order, OrderStatusUpdate, PaymentSlip,
    PaymentSlipUpdate, UserLicense, WonBid,
};
use mkp_status::{check_resolution, check_transition, Lifecycle, Resolution, TransitionRefusal};

/// One call the backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub op: CallOp,
    pub entity: EntityKind,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOp {
    Fetch,
    Mutate,
}

#[derive(Default)]
struct State {
    orders: HashMap<String, Order>,
    won_bids: HashMap<String, WonBid>,
    slips: HashMap<String, PaymentSlip>,
    licenses: HashMap<String, UserLicense>,
    calls: Vec<RecordedCall>,
    fail_next: Option<ApiError>,
}

#[derive(Default)]
pub struct MemoryMarketplace {
    state: Mutex<State>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl MemoryMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    pub fn with_order(self, order: Order) -> Self {
        self.lock().orders.insert(order.id.clone(), order);
        self
    }

    pub fn with_won_bid(self, bid: WonBid) -> Self {
        self.lock().won_bids.insert(bid.id.clone(), bid);
        self
    }

    pub fn with_payment_slip(self, slip: PaymentSlip) -> Self {
        self.lock().slips.insert(slip.id.clone(), slip);
        self
    }

    pub fn with_user_license(self, license: UserLicense) -> Self {
        self.lock().licenses.insert(license.user_id.clone(), license);
        self
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op == CallOp::Mutate)
            .count()
    }

    pub fn stored_order(&self, id: &str) -> Option<Order> {
        self.lock().orders.get(id).cloned()
    }

    pub fn stored_won_bid(&self, id: &str) -> Option<WonBid> {
        self.lock().won_bids.get(id).cloned()
    }

    pub fn stored_payment_slip(&self, id: &str) -> Option<PaymentSlip> {
        self.lock().slips.get(id).cloned()
    }

    pub fn stored_user_license(&self, user_id: &str) -> Option<UserLicense> {
        self.lock().licenses.get(user_id).cloned()
    }

    // -----------------------------------------------------------------------
    // Hooks
    // -----------------------------------------------------------------------

    /// The next call (read or mutation) fails with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.lock().fail_next = Some(err);
    }

    /// Park every mutation until [`release`](Self::release) is called.
    pub fn hold_mutations(&self) {
        let mut hold = self.hold.lock().unwrap_or_else(|e| e.into_inner());
        *hold = Some(Arc::new(Notify::new()));
    }

    /// Let held mutations proceed and stop holding new ones.
    pub fn release(&self) {
        let taken = self
            .hold
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(notify) = taken {
            // notify_one stores a permit when nobody is waiting yet.
            notify.notify_one();
            notify.notify_waiters();
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call and consume an injected failure, if any.
    fn enter(&self, op: CallOp, entity: EntityKind, id: &str) -> Result<(), ApiError> {
        let mut st = self.lock();
        st.calls.push(RecordedCall {
            op,
            entity,
            id: id.to_string(),
        });
        match st.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn enter_mutation(&self, entity: EntityKind, id: &str) -> Result<(), ApiError> {
        let held = self
            .hold
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        self.enter(CallOp::Mutate, entity, id)?;
        if let Some(notify) = held {
            notify.notified().await;
        }
        Ok(())
    }
}

fn not_found(entity: EntityKind, id: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("{entity} {id} not found"),
    }
}

fn server_refused<S: Lifecycle>(r: TransitionRefusal<S>) -> ApiError {
    ApiError::Rejected {
        message: r.to_string(),
    }
}

fn updated(entity: EntityKind) -> Ack {
    Ack {
        message: Some(format!("{entity} updated")),
    }
}

#[async_trait]
impl MarketplaceBackend for MemoryMarketplace {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError> {
        self.enter(CallOp::Fetch, EntityKind::Order, order_id)?;
        self.stored_order(order_id)
            .ok_or_else(|| not_found(EntityKind::Order, order_id))
    }

    async fn update_order_status(&self, req: &OrderStatusUpdate) -> Result<Ack, ApiError> {
        let entity = EntityKind::Order;
        self.enter_mutation(entity, &req.order_id).await?;
        let mut st = self.lock();
        let order = st
            .orders
            .get_mut(&req.order_id)
            .ok_or_else(|| not_found(entity, &req.order_id))?;
        check_transition(order.order_status, req.status).map_err(server_refused)?;
        order.order_status = req.status;
        Ok(updated(entity))
    }

    async fn fetch_won_bid(&self, won_bid_id: &str) -> Result<WonBid, ApiError> {
        self.enter(CallOp::Fetch, EntityKind::WonBid, won_bid_id)?;
        self.stored_won_bid(won_bid_id)
            .ok_or_else(|| not_found(EntityKind::WonBid, won_bid_id))
    }

    async fn contract_action(&self, req: &ContractActionRequest) -> Result<Ack, ApiError> {
        let entity = EntityKind::WonBid;
        self.enter_mutation(entity, &req.won_bid_id).await?;
        let resolution = match req.action {
            mkp_schemas::ContractAction::Approve => Resolution::Approve,
            mkp_schemas::ContractAction::Reject => Resolution::Reject,
        };
        let mut st = self.lock();
        let bid = st
            .won_bids
            .get_mut(&req.won_bid_id)
            .ok_or_else(|| not_found(entity, &req.won_bid_id))?;
        bid.contract_status =
            check_resolution(bid.contract_status, resolution).map_err(server_refused)?;
        Ok(updated(entity))
    }

    async fn fetch_payment_slip(&self, slip_id: &str) -> Result<PaymentSlip, ApiError> {
        self.enter(CallOp::Fetch, EntityKind::PaymentSlip, slip_id)?;
        self.stored_payment_slip(slip_id)
            .ok_or_else(|| not_found(EntityKind::PaymentSlip, slip_id))
    }

    async fn update_payment_slip(&self, req: &PaymentSlipUpdate) -> Result<Ack, ApiError> {
        let entity = EntityKind::PaymentSlip;
        self.enter_mutation(entity, &req.slip_id).await?;
        let mut st = self.lock();
        let slip = st
            .slips
            .get_mut(&req.slip_id)
            .ok_or_else(|| not_found(entity, &req.slip_id))?;
        check_transition(slip.status, req.status).map_err(server_refused)?;
        slip.status = req.status;
        Ok(updated(entity))
    }

    async fn fetch_user_license(&self, user_id: &str) -> Result<UserLicense, ApiError> {
        self.enter(CallOp::Fetch, EntityKind::UserLicense, user_id)?;
        self.stored_user_license(user_id)
            .ok_or_else(|| not_found(EntityKind::UserLicense, user_id))
    }

    async fn license_action(&self, req: &LicenseActionRequest) -> Result<Ack, ApiError> {
        let entity = EntityKind::UserLicense;
        self.enter_mutation(entity, &req.user_id).await?;
        let resolution = match req.action {
            mkp_schemas::LicenseAction::Approve => Resolution::Approve,
            mkp_schemas::LicenseAction::Decline => Resolution::Reject,
        };
        let mut st = self.lock();
        let license = st
            .licenses
            .get_mut(&req.user_id)
            .ok_or_else(|| not_found(entity, &req.user_id))?;
        license.license_status =
            check_resolution(license.license_status, resolution).map_err(server_refused)?;
        Ok(updated(entity))
    }
}
