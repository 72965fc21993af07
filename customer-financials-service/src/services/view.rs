//! Stateful per-customer financial view.

use crate::services::financials::{calculate_customer_financials, CustomerFinancials};
use crate::services::store::{fetch_customer_records, CustomerRecordStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

/// Snapshot of the view's published state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialsState {
    pub financials: CustomerFinancials,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Per-customer financial view over a record store.
///
/// Every customer switch recomputes the whole pipeline from a fresh fetch;
/// there is no partial invalidation and no cross-customer memoization. Each
/// fetch is tagged with a generation number, and a fetch that finishes after
/// a newer switch has started is discarded instead of overwriting newer
/// state.
pub struct CustomerFinancialsView<S: CustomerRecordStore + ?Sized> {
    store: Arc<S>,
    generation: AtomicU64,
    state: RwLock<FinancialsState>,
}

impl<S: CustomerRecordStore + ?Sized> CustomerFinancialsView<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            state: RwLock::new(FinancialsState::default()),
        }
    }

    /// Current published snapshot.
    pub async fn state(&self) -> FinancialsState {
        self.state.read().await.clone()
    }

    /// Switch the view to another customer and recompute, or reset it when no
    /// customer is selected. Returns the published state after the switch.
    ///
    /// A required-read failure publishes the error message and leaves every
    /// monetary field at the initial zero state.
    #[instrument(skip(self), fields(customer_id = ?customer_id))]
    pub async fn set_customer(&self, customer_id: Option<Uuid>) -> FinancialsState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(customer_id) = customer_id else {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = FinancialsState::default();
            }
            return state.clone();
        };

        {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) == generation {
                state.is_loading = true;
                state.error = None;
            }
        }

        let next = match fetch_customer_records(self.store.as_ref(), customer_id).await {
            Ok(records) => FinancialsState {
                financials: calculate_customer_financials(&records),
                is_loading: false,
                error: None,
            },
            Err(e) => {
                tracing::error!(
                    customer_id = %customer_id,
                    error = %e,
                    "Customer financials fetch failed"
                );
                FinancialsState {
                    financials: CustomerFinancials::default(),
                    is_loading: false,
                    error: Some(e.to_string()),
                }
            }
        };

        {
            // Publish only if no newer switch started while we were fetching.
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = next;
            }
        }

        self.state().await
    }
}
