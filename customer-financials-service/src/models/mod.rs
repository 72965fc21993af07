//! Domain models for customer-financials-service.

mod contract;
mod discount;
mod invoice;
mod ledger;
mod settings;
mod task;

pub use contract::{Contract, FriendRental};
pub use discount::{CustomerDiscount, DiscountStatus};
pub use invoice::{PrintInvoice, PurchaseInvoice, SalesInvoice};
pub use ledger::{CustomerLedgerEntry, EntryType};
pub use settings::InvoiceSettings;
pub use task::CompositeTask;
