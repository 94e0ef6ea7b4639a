use async_trait::async_trait;

use mkp_schemas::{
    Ack, ContractActionRequest, LicenseActionRequest, Order, OrderStatusUpdate, PaymentSlip,
    PaymentSlipUpdate, UserLicense, WonBid,
};

use crate::error::ApiError;

/// The marketplace REST backend as seen by the admin and portal clients.
///
/// The backend owns every record. Implementations do not cache; each call is
/// one request/response.
#[async_trait]
pub trait MarketplaceBackend: Send + Sync {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError>;
    async fn update_order_status(&self, req: &OrderStatusUpdate) -> Result<Ack, ApiError>;

    async fn fetch_won_bid(&self, won_bid_id: &str) -> Result<WonBid, ApiError>;
    async fn contract_action(&self, req: &ContractActionRequest) -> Result<Ack, ApiError>;

    async fn fetch_payment_slip(&self, slip_id: &str) -> Result<PaymentSlip, ApiError>;
    async fn update_payment_slip(&self, req: &PaymentSlipUpdate) -> Result<Ack, ApiError>;

    async fn fetch_user_license(&self, user_id: &str) -> Result<UserLicense, ApiError>;
    async fn license_action(&self, req: &LicenseActionRequest) -> Result<Ack, ApiError>;
}
