//! Invoice settings lookup with an explicit TTL cache.

use crate::models::InvoiceSettings;
use async_trait::async_trait;
use financials_core::error::AppError;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Source of the company-wide invoice settings row.
#[async_trait]
pub trait InvoiceSettingsSource: Send + Sync {
    async fn fetch_invoice_settings(&self) -> Result<InvoiceSettings, AppError>;
}

/// Cached settings value with an explicit age bound.
///
/// The cache is owned by whoever constructs it and carries its own fetch
/// timestamp; there is no module-level shared state.
#[derive(Debug)]
pub struct SettingsCache {
    cached: Option<(InvoiceSettings, Instant)>,
    max_age: Duration,
}

impl SettingsCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            cached: None,
            max_age,
        }
    }

    /// Return the cached settings while younger than `max_age`, otherwise
    /// refetch through the source and replace the cached value.
    pub async fn get<S>(&mut self, source: &S) -> Result<InvoiceSettings, AppError>
    where
        S: InvoiceSettingsSource + ?Sized,
    {
        if let Some((value, fetched_at)) = &self.cached {
            if fetched_at.elapsed() < self.max_age {
                return Ok(value.clone());
            }
            debug!("Invoice settings cache expired, refetching");
        }

        let value = source.fetch_invoice_settings().await?;
        self.cached = Some((value.clone(), Instant::now()));
        Ok(value)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
