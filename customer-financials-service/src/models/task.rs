//! Composite task model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Bundled unit of work (installation + print + cutout) billed to a customer
/// as one combined item.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompositeTask {
    pub task_id: Uuid,
    pub customer_id: Uuid,
    pub customer_total: Decimal,
    /// Set once the task has been folded into a print invoice. From then on
    /// the invoice carries the amount and the task no longer counts as debt.
    pub combined_invoice_id: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}
