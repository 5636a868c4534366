//! Live, re-emitting shopping-list views.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use shelfwise_core::DomainResult;
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, ChangeStream, LocationRepository, ProductRepository,
};

use crate::compose::{compose, Snapshot};
use crate::item::{Grouping, ListFilter, ListItem};

/// Shopping-list composition over live repository state.
///
/// `compose_once` gives a one-shot view; `observe` returns a subscription
/// that re-emits a freshly composed view whenever any underlying repository
/// row changes. Each emission is a full replacement of the previous view,
/// never a delta, and a new subscriber immediately sees the latest view
/// (replay-latest).
#[derive(Clone)]
pub struct ShoppingList {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
    products: Arc<dyn ProductRepository>,
    changes: Arc<dyn ChangeStream>,
}

impl ShoppingList {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
        products: Arc<dyn ProductRepository>,
        changes: Arc<dyn ChangeStream>,
    ) -> Self {
        Self {
            locations,
            aisles,
            aisle_products,
            products,
            changes,
        }
    }

    async fn snapshot(&self) -> DomainResult<Snapshot> {
        // Aisles across all locations; grouping narrows later.
        let locations = self.locations.get_all().await?;
        let mut aisles = Vec::new();
        for location in &locations {
            aisles.extend(self.aisles.get_for_location(location.id).await?);
        }
        Ok(Snapshot {
            locations,
            aisles,
            aisle_products: self.aisle_products.get_all().await?,
            products: self.products.get_all().await?,
        })
    }

    /// One-shot composition of the current state.
    pub async fn compose_once(
        &self,
        grouping: &Grouping,
        filter: &ListFilter,
    ) -> DomainResult<Vec<ListItem>> {
        let snapshot = self.snapshot().await?;
        Ok(compose(&snapshot, grouping, filter))
    }

    /// Subscribe to a continuously updated view.
    ///
    /// Spawns a background task that recomputes on every repository
    /// revision; the task exits once every receiver is dropped. Must be
    /// called from within a tokio runtime. A recompute that fails keeps the
    /// previous emission and logs the failure; it never tears the
    /// subscription down.
    pub async fn observe(
        &self,
        grouping: Grouping,
        filter: ListFilter,
    ) -> DomainResult<watch::Receiver<Vec<ListItem>>> {
        let initial = self.compose_once(&grouping, &filter).await?;
        let (tx, rx) = watch::channel(initial);

        let mut revisions = self.changes.subscribe();
        let list = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = revisions.changed() => {
                        if changed.is_err() {
                            break; // store dropped
                        }
                    }
                    () = tx.closed() => break,
                }
                match list.compose_once(&grouping, &filter).await {
                    Ok(items) => {
                        if tx.send(items).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!(%error, "shopping list recompute failed; keeping previous view");
                    }
                }
            }
        });

        Ok(rx)
    }
}
