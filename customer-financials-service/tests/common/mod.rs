//! Common test utilities for customer-financials-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use customer_financials_service::models::{
    CompositeTask, Contract, CustomerDiscount, CustomerLedgerEntry, EntryType, InvoiceSettings,
    PrintInvoice, PurchaseInvoice, SalesInvoice,
};
use customer_financials_service::services::{
    CustomerRecordStore, CustomerRecords, InvoiceSettingsSource,
};
use financials_core::error::AppError;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use tokio::time::{sleep, Duration};
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,customer_financials_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

// ============================================================================
// Record builders
// ============================================================================

pub fn contract(customer_id: Uuid, total: i64) -> Contract {
    contract_with_rentals(customer_id, total, None)
}

pub fn contract_with_rentals(
    customer_id: Uuid,
    total: i64,
    friend_rental_data: Option<serde_json::Value>,
) -> Contract {
    Contract {
        contract_id: Uuid::new_v4(),
        customer_id,
        contract_number: format!("C-{}", &Uuid::new_v4().to_string()[..8]),
        total: Decimal::from(total),
        friend_rental_data,
        created_utc: Utc::now(),
    }
}

pub fn ledger_entry(customer_id: Uuid, entry_type: EntryType, amount: i64) -> CustomerLedgerEntry {
    ledger_entry_raw(customer_id, entry_type.as_str(), amount)
}

pub fn ledger_entry_raw(customer_id: Uuid, entry_type: &str, amount: i64) -> CustomerLedgerEntry {
    CustomerLedgerEntry {
        entry_id: Uuid::new_v4(),
        customer_id,
        amount: Decimal::from(amount),
        entry_type: entry_type.to_string(),
        contract_id: None,
        sales_invoice_id: None,
        print_invoice_id: None,
        purchase_invoice_id: None,
        created_utc: Utc::now(),
    }
}

pub fn sales_invoice(customer_id: Uuid, total: i64, paid: i64) -> SalesInvoice {
    SalesInvoice {
        invoice_id: Uuid::new_v4(),
        customer_id,
        total_amount: Decimal::from(total),
        paid_amount: Decimal::from(paid),
        created_utc: Utc::now(),
    }
}

pub fn print_invoice(customer_id: Uuid, total: i64, included_in_contract: bool) -> PrintInvoice {
    PrintInvoice {
        invoice_id: Uuid::new_v4(),
        customer_id,
        total_amount: Some(Decimal::from(total)),
        print_cost: None,
        included_in_contract,
        created_utc: Utc::now(),
    }
}

pub fn purchase_invoice(customer_id: Uuid, total: i64, used_as_payment: i64) -> PurchaseInvoice {
    PurchaseInvoice {
        invoice_id: Uuid::new_v4(),
        customer_id,
        total_amount: Decimal::from(total),
        used_as_payment: Decimal::from(used_as_payment),
        created_utc: Utc::now(),
    }
}

pub fn discount(customer_id: Uuid, value: i64) -> CustomerDiscount {
    CustomerDiscount {
        discount_id: Uuid::new_v4(),
        customer_id,
        discount_value: Decimal::from(value),
        status: "active".to_string(),
        created_utc: Utc::now(),
    }
}

pub fn composite_task(
    customer_id: Uuid,
    customer_total: i64,
    combined_invoice_id: Option<Uuid>,
) -> CompositeTask {
    CompositeTask {
        task_id: Uuid::new_v4(),
        customer_id,
        customer_total: Decimal::from(customer_total),
        combined_invoice_id,
        created_utc: Utc::now(),
    }
}

pub fn invoice_settings(currency: &str) -> InvoiceSettings {
    InvoiceSettings {
        settings_id: Uuid::new_v4(),
        company_name: "Roadside Media Co".to_string(),
        currency: currency.to_string(),
        tax_rate: Decimal::ZERO,
        updated_utc: Utc::now(),
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory record store with per-category failure injection and an optional
/// per-customer response delay for testing stale-fetch handling.
#[derive(Default)]
pub struct InMemoryStore {
    pub contracts: Vec<Contract>,
    pub ledger_entries: Vec<CustomerLedgerEntry>,
    pub sales_invoices: Vec<SalesInvoice>,
    pub print_invoices: Vec<PrintInvoice>,
    pub purchase_invoices: Vec<PurchaseInvoice>,
    pub discounts: Vec<CustomerDiscount>,
    pub composite_tasks: Vec<CompositeTask>,
    pub settings: Option<InvoiceSettings>,
    failing: HashSet<&'static str>,
    delay: Option<(Uuid, u64)>,
    record_fetches: AtomicUsize,
    settings_fetches: AtomicUsize,
}

impl InMemoryStore {
    pub fn with_records(records: CustomerRecords) -> Self {
        Self {
            contracts: records.contracts,
            ledger_entries: records.ledger_entries,
            sales_invoices: records.sales_invoices,
            print_invoices: records.print_invoices,
            purchase_invoices: records.purchase_invoices,
            discounts: records.discounts,
            composite_tasks: records.composite_tasks,
            ..Self::default()
        }
    }

    /// Make one record category fail with a database error.
    pub fn fail(mut self, category: &'static str) -> Self {
        self.failing.insert(category);
        self
    }

    /// Delay every read for one customer by the given number of milliseconds.
    pub fn delay_customer(mut self, customer_id: Uuid, millis: u64) -> Self {
        self.delay = Some((customer_id, millis));
        self
    }

    pub fn with_settings(mut self, settings: InvoiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Number of record-read calls issued against the store.
    pub fn record_fetches(&self) -> usize {
        self.record_fetches.load(Ordering::SeqCst)
    }

    /// Number of settings fetches issued against the store.
    pub fn settings_fetches(&self) -> usize {
        self.settings_fetches.load(Ordering::SeqCst)
    }

    async fn simulate(&self, customer_id: Uuid, category: &'static str) -> Result<(), AppError> {
        self.record_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some((delayed_customer, millis)) = self.delay {
            if delayed_customer == customer_id {
                sleep(Duration::from_millis(millis)).await;
            }
        }
        if self.failing.contains(category) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "injected {} failure",
                category
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerRecordStore for InMemoryStore {
    async fn contracts_for_customer(&self, customer_id: Uuid) -> Result<Vec<Contract>, AppError> {
        self.simulate(customer_id, "contracts").await?;
        Ok(filtered(&self.contracts, |c| c.customer_id == customer_id))
    }

    async fn ledger_entries_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerLedgerEntry>, AppError> {
        self.simulate(customer_id, "ledger_entries").await?;
        Ok(filtered(&self.ledger_entries, |e| {
            e.customer_id == customer_id
        }))
    }

    async fn sales_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<SalesInvoice>, AppError> {
        self.simulate(customer_id, "sales_invoices").await?;
        Ok(filtered(&self.sales_invoices, |i| {
            i.customer_id == customer_id
        }))
    }

    async fn print_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PrintInvoice>, AppError> {
        self.simulate(customer_id, "print_invoices").await?;
        Ok(filtered(&self.print_invoices, |i| {
            i.customer_id == customer_id
        }))
    }

    async fn purchase_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PurchaseInvoice>, AppError> {
        self.simulate(customer_id, "purchase_invoices").await?;
        Ok(filtered(&self.purchase_invoices, |i| {
            i.customer_id == customer_id
        }))
    }

    async fn active_discounts_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerDiscount>, AppError> {
        self.simulate(customer_id, "discounts").await?;
        Ok(filtered(&self.discounts, |d| {
            d.customer_id == customer_id && d.is_active()
        }))
    }

    async fn composite_tasks_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CompositeTask>, AppError> {
        self.simulate(customer_id, "composite_tasks").await?;
        Ok(filtered(&self.composite_tasks, |t| {
            t.customer_id == customer_id
        }))
    }
}

#[async_trait]
impl InvoiceSettingsSource for InMemoryStore {
    async fn fetch_invoice_settings(&self) -> Result<InvoiceSettings, AppError> {
        self.settings_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains("settings") {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "injected settings failure"
            )));
        }
        self.settings
            .clone()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice settings not configured")))
    }
}

fn filtered<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().filter(|row| keep(row)).cloned().collect()
}
