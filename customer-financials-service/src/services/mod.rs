//! Services module for customer-financials-service.

pub mod database;
pub mod financials;
pub mod settings;
pub mod settlement;
pub mod store;
pub mod view;

pub use database::Database;
pub use financials::{
    breakdown_rows, calculate_customer_financials, debt_breakdown, friend_rental_total,
    total_payments, BreakdownRow, CustomerFinancials, DebtBreakdown,
};
pub use settings::{InvoiceSettingsSource, SettingsCache};
pub use settlement::total_remaining_debt;
pub use store::{fetch_customer_records, CustomerRecordStore, CustomerRecords};
pub use view::{CustomerFinancialsView, FinancialsState};
