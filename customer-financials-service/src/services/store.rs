//! Storage abstraction for per-customer record reads.

use crate::models::{
    CompositeTask, Contract, CustomerDiscount, CustomerLedgerEntry, PrintInvoice, PurchaseInvoice,
    SalesInvoice,
};
use async_trait::async_trait;
use financials_core::error::AppError;
use tracing::warn;
use uuid::Uuid;

/// Read-only access to the record collections backing a customer's financial
/// view. Production uses the Postgres [`Database`](crate::services::Database);
/// tests use an in-memory store.
#[async_trait]
pub trait CustomerRecordStore: Send + Sync {
    async fn contracts_for_customer(&self, customer_id: Uuid) -> Result<Vec<Contract>, AppError>;

    async fn ledger_entries_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerLedgerEntry>, AppError>;

    async fn sales_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<SalesInvoice>, AppError>;

    async fn print_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PrintInvoice>, AppError>;

    async fn purchase_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PurchaseInvoice>, AppError>;

    async fn active_discounts_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerDiscount>, AppError>;

    async fn composite_tasks_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CompositeTask>, AppError>;
}

/// All records backing one customer's financial view, fetched fresh per
/// computation. The engine holds no state beyond this bundle.
#[derive(Debug, Clone, Default)]
pub struct CustomerRecords {
    pub contracts: Vec<Contract>,
    pub ledger_entries: Vec<CustomerLedgerEntry>,
    pub sales_invoices: Vec<SalesInvoice>,
    pub print_invoices: Vec<PrintInvoice>,
    pub purchase_invoices: Vec<PurchaseInvoice>,
    pub discounts: Vec<CustomerDiscount>,
    pub composite_tasks: Vec<CompositeTask>,
}

/// Fetch the seven record collections for one customer concurrently.
///
/// Contracts and ledger entries are required: an error on either aborts the
/// whole fetch. The other five categories degrade to an empty collection with
/// a warning, so one unavailable table under-counts its category instead of
/// blocking the view.
pub async fn fetch_customer_records<S>(
    store: &S,
    customer_id: Uuid,
) -> Result<CustomerRecords, AppError>
where
    S: CustomerRecordStore + ?Sized,
{
    let (contracts, ledger_entries, sales_invoices, print_invoices, purchase_invoices, discounts, composite_tasks) = tokio::join!(
        store.contracts_for_customer(customer_id),
        store.ledger_entries_for_customer(customer_id),
        store.sales_invoices_for_customer(customer_id),
        store.print_invoices_for_customer(customer_id),
        store.purchase_invoices_for_customer(customer_id),
        store.active_discounts_for_customer(customer_id),
        store.composite_tasks_for_customer(customer_id),
    );

    Ok(CustomerRecords {
        contracts: contracts?,
        ledger_entries: ledger_entries?,
        sales_invoices: tolerate(sales_invoices, "sales_invoices", customer_id),
        print_invoices: tolerate(print_invoices, "print_invoices", customer_id),
        purchase_invoices: tolerate(purchase_invoices, "purchase_invoices", customer_id),
        discounts: tolerate(discounts, "discounts", customer_id),
        composite_tasks: tolerate(composite_tasks, "composite_tasks", customer_id),
    })
}

fn tolerate<T>(result: Result<Vec<T>, AppError>, category: &'static str, customer_id: Uuid) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                category,
                customer_id = %customer_id,
                error = %e,
                "Record fetch failed, substituting empty collection"
            );
            Vec::new()
        }
    }
}
