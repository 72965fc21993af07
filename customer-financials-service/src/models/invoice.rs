//! Invoice models: sales, print, and purchase invoices.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice for billboard or material sales.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SalesInvoice {
    pub invoice_id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub created_utc: DateTime<Utc>,
}

/// Invoice for print work (banners, cutouts).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PrintInvoice {
    pub invoice_id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Option<Decimal>,
    /// Legacy column; rows imported from the old print-shop module carry the
    /// cost here instead of total_amount.
    pub print_cost: Option<Decimal>,
    /// Marks an invoice whose amount is already inside its parent contract's
    /// total. Such invoices never count toward debt on their own.
    pub included_in_contract: bool,
    pub created_utc: DateTime<Utc>,
}

impl PrintInvoice {
    /// Billable amount: total_amount with print_cost as the legacy fallback.
    pub fn amount(&self) -> Decimal {
        self.total_amount
            .or(self.print_cost)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Invoice for goods the company bought *from* the customer. Its unapplied
/// remainder acts as credit the customer can settle debt with.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub invoice_id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Decimal,
    pub used_as_payment: Decimal,
    pub created_utc: DateTime<Utc>,
}

impl PurchaseInvoice {
    /// Credit not yet applied as payment elsewhere.
    pub fn available_credit(&self) -> Decimal {
        (self.total_amount - self.used_as_payment).max(Decimal::ZERO)
    }
}
