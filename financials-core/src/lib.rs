//! financials-core: Shared infrastructure for the customer-financials workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use tracing;
