//! mkp-api
//!
//! Client side of the marketplace REST backend:
//! - [`MarketplaceBackend`]: async boundary trait, one method per read and mutation.
//! - [`HttpBackend`]: reqwest implementation.
//! - [`ActionGateway`]: guard + in-flight latch in front of every mutation.

mod backend;
mod error;
mod gateway;
mod http;
mod inflight;

pub use backend::MarketplaceBackend;
pub use error::{ActionError, ApiError, EntityKind};
pub use gateway::ActionGateway;
pub use http::{HttpBackend, REQUEST_ID_HEADER};
pub use inflight::{InFlight, InFlightClaim};
