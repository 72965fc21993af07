//! Invoice settings model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Company-wide invoice presentation settings (single row).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct InvoiceSettings {
    pub settings_id: Uuid,
    pub company_name: String,
    pub currency: String,
    pub tax_rate: Decimal,
    pub updated_utc: DateTime<Utc>,
}
