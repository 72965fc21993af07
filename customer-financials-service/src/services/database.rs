//! Database service for customer-financials-service.

use crate::models::{
    CompositeTask, Contract, CustomerDiscount, CustomerLedgerEntry, InvoiceSettings, PrintInvoice,
    PurchaseInvoice, SalesInvoice,
};
use crate::services::settings::InvoiceSettingsSource;
use crate::services::store::CustomerRecordStore;
use async_trait::async_trait;
use financials_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "customer-financials-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Create a pool from service configuration.
    pub async fn from_config(config: &crate::config::DatabaseConfig) -> Result<Self, AppError> {
        Self::new(&config.url, config.max_connections, config.min_connections).await
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl CustomerRecordStore for Database {
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn contracts_for_customer(&self, customer_id: Uuid) -> Result<Vec<Contract>, AppError> {
        sqlx::query_as::<_, Contract>(
            r#"
            SELECT contract_id, customer_id, contract_number, total, friend_rental_data, created_utc
            FROM contracts
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list contracts: {}", e)))
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn ledger_entries_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerLedgerEntry>, AppError> {
        sqlx::query_as::<_, CustomerLedgerEntry>(
            r#"
            SELECT entry_id, customer_id, amount, entry_type, contract_id, sales_invoice_id, print_invoice_id, purchase_invoice_id, created_utc
            FROM customer_ledger_entries
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list ledger entries: {}", e))
        })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn sales_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<SalesInvoice>, AppError> {
        sqlx::query_as::<_, SalesInvoice>(
            r#"
            SELECT invoice_id, customer_id, total_amount, paid_amount, created_utc
            FROM sales_invoices
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list sales invoices: {}", e))
        })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn print_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PrintInvoice>, AppError> {
        sqlx::query_as::<_, PrintInvoice>(
            r#"
            SELECT invoice_id, customer_id, total_amount, print_cost, included_in_contract, created_utc
            FROM print_invoices
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list print invoices: {}", e))
        })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn purchase_invoices_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<PurchaseInvoice>, AppError> {
        sqlx::query_as::<_, PurchaseInvoice>(
            r#"
            SELECT invoice_id, customer_id, total_amount, used_as_payment, created_utc
            FROM purchase_invoices
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list purchase invoices: {}", e))
        })
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn active_discounts_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerDiscount>, AppError> {
        sqlx::query_as::<_, CustomerDiscount>(
            r#"
            SELECT discount_id, customer_id, discount_value, status, created_utc
            FROM customer_discounts
            WHERE customer_id = $1 AND status = 'active'
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list discounts: {}", e)))
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn composite_tasks_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CompositeTask>, AppError> {
        sqlx::query_as::<_, CompositeTask>(
            r#"
            SELECT task_id, customer_id, customer_total, combined_invoice_id, created_utc
            FROM composite_tasks
            WHERE customer_id = $1
            ORDER BY created_utc
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list composite tasks: {}", e))
        })
    }
}

#[async_trait]
impl InvoiceSettingsSource for Database {
    #[instrument(skip(self))]
    async fn fetch_invoice_settings(&self) -> Result<InvoiceSettings, AppError> {
        sqlx::query_as::<_, InvoiceSettings>(
            r#"
            SELECT settings_id, company_name, currency, tax_rate, updated_utc
            FROM invoice_settings
            ORDER BY updated_utc DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch invoice settings: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice settings not configured")))
    }
}
