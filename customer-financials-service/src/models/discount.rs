//! Customer discount model.

#![allow(clippy::should_implement_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Discount lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountStatus {
    Active,
    Inactive,
}

impl DiscountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Inactive,
        }
    }
}

/// General discount granted to a customer. Only active discounts reduce debt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CustomerDiscount {
    pub discount_id: Uuid,
    pub customer_id: Uuid,
    pub discount_value: Decimal,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

impl CustomerDiscount {
    pub fn is_active(&self) -> bool {
        DiscountStatus::from_str(&self.status) == DiscountStatus::Active
    }
}
