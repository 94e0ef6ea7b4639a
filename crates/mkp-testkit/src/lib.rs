//! Test support for marketplace clients.
//!
//! [`MemoryMarketplace`] is a deterministic in-memory backend; the fixture
//! helpers build minimal entity copies with only the status-relevant fields.

mod memory_marketplace;

pub use memory_marketplace::{CallOp, MemoryMarketplace, RecordedCall};

use mkp_schemas::{Order, PaymentSlip, UserLicense, WonBid};
use mkp_status::{ContractStatus, OrderStatus, PaymentSlipStatus, VerificationStatus};

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        order_status: status,
        machinery_name: Some("Wheel Loader 950".to_string()),
        total_amount: Some("125000.00".to_string()),
        created_at: None,
    }
}

pub fn won_bid(id: &str, status: ContractStatus) -> WonBid {
    WonBid {
        id: id.to_string(),
        contract_status: status,
        machinery_name: Some("Excavator 320".to_string()),
        bid_amount: Some("87000.00".to_string()),
        contract_url: None,
        signature_url: None,
    }
}

pub fn payment_slip(id: &str, status: PaymentSlipStatus) -> PaymentSlip {
    PaymentSlip {
        id: id.to_string(),
        status,
        order_id: None,
        amount: Some("5000.00".to_string()),
        slip_url: None,
    }
}

pub fn user_license(user_id: &str, status: VerificationStatus) -> UserLicense {
    UserLicense {
        user_id: user_id.to_string(),
        license_status: status,
        license_url: None,
    }
}
