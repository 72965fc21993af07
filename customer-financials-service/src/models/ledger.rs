//! Customer ledger entry model.
//!
//! The ledger is append-only and written elsewhere; this service only
//! classifies and sums entries.

#![allow(clippy::should_implement_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Classification tag on a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Invoice,
    Debt,
    GeneralDebit,
    Receipt,
    AccountPayment,
    Payment,
    GeneralCredit,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Debt => "debt",
            Self::GeneralDebit => "general_debit",
            Self::Receipt => "receipt",
            Self::AccountPayment => "account_payment",
            Self::Payment => "payment",
            Self::GeneralCredit => "general_credit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "invoice" => Some(Self::Invoice),
            "debt" => Some(Self::Debt),
            "general_debit" => Some(Self::GeneralDebit),
            "receipt" => Some(Self::Receipt),
            "account_payment" => Some(Self::AccountPayment),
            "payment" => Some(Self::Payment),
            "general_credit" => Some(Self::GeneralCredit),
            _ => None,
        }
    }

    /// Debit-like movement: increases what the customer owes.
    pub fn is_debit(&self) -> bool {
        matches!(self, Self::Invoice | Self::Debt | Self::GeneralDebit)
    }

    /// Credit-like movement: counts toward the customer's payments.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            Self::Receipt | Self::AccountPayment | Self::Payment | Self::GeneralCredit
        )
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single row of a customer's ledger.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CustomerLedgerEntry {
    pub entry_id: Uuid,
    pub customer_id: Uuid,
    pub amount: Decimal,
    pub entry_type: String,
    pub contract_id: Option<Uuid>,
    pub sales_invoice_id: Option<Uuid>,
    pub print_invoice_id: Option<Uuid>,
    pub purchase_invoice_id: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}

impl CustomerLedgerEntry {
    /// Get parsed entry type. Unknown tags classify as neither debit nor
    /// credit and are ignored by the aggregators.
    pub fn parsed_entry_type(&self) -> Option<EntryType> {
        EntryType::from_str(&self.entry_type)
    }

    /// True when the entry references any invoice row. Linked debits already
    /// back an invoice amount and must not be counted a second time.
    pub fn has_invoice_link(&self) -> bool {
        self.sales_invoice_id.is_some()
            || self.print_invoice_id.is_some()
            || self.purchase_invoice_id.is_some()
    }
}
