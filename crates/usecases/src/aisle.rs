//! Aisle lifecycle use cases.

use std::sync::Arc;

use tracing::debug;

use shelfwise_core::{rank, Aisle, AisleId, DomainError, DomainResult, LocationId};
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, LocationRepository, TransactionRunner,
};

/// Create an aisle. The caller supplies the rank; nothing is auto-assigned.
#[derive(Clone)]
pub struct AddAisle {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
}

impl AddAisle {
    pub fn new(locations: Arc<dyn LocationRepository>, aisles: Arc<dyn AisleRepository>) -> Self {
        Self { locations, aisles }
    }

    pub async fn execute(&self, aisle: Aisle) -> DomainResult<Aisle> {
        if self.locations.get(aisle.location_id).await?.is_none() {
            return Err(DomainError::invalid_location(aisle.location_id));
        }
        self.aisles.add(aisle).await
    }
}

/// Rename or reconfigure an aisle. Aisle names are not unique; only the
/// location reference is validated.
pub struct UpdateAisle {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
}

impl UpdateAisle {
    pub fn new(locations: Arc<dyn LocationRepository>, aisles: Arc<dyn AisleRepository>) -> Self {
        Self { locations, aisles }
    }

    pub async fn execute(&self, aisle: Aisle) -> DomainResult<()> {
        if self.locations.get(aisle.location_id).await?.is_none() {
            return Err(DomainError::invalid_location(aisle.location_id));
        }
        self.aisles.update(aisle).await
    }
}

/// Remove a non-default aisle, draining its products into the location's
/// default aisle.
///
/// Products keep their identity but not their old rank: they are appended to
/// the end of the default aisle. When no default aisle exists (reachable
/// only while the owning location is being torn down) the mapping rows are
/// detached instead. Removing the default aisle directly always fails.
#[derive(Clone)]
pub struct RemoveAisle {
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
}

impl RemoveAisle {
    pub fn new(
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
    ) -> Self {
        Self {
            aisles,
            aisle_products,
        }
    }

    pub async fn execute(&self, id: AisleId) -> DomainResult<()> {
        let Some(with_products) = self.aisles.get_with_products(id).await? else {
            return Ok(());
        };
        if with_products.aisle.is_default {
            return Err(DomainError::DeleteDefaultAisle {
                location_id: with_products.aisle.location_id,
            });
        }

        match self
            .aisles
            .get_default_for(with_products.aisle.location_id)
            .await?
        {
            Some(default) => {
                let landing = self
                    .aisles
                    .get_with_products(default.id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(format!("default aisle {}", default.id))
                    })?;
                let mut next_rank = landing.next_rank();
                for mut item in with_products.products {
                    item.aisle_id = default.id;
                    item.rank = next_rank;
                    next_rank += 1;
                    self.aisle_products.update(item).await?;
                }
            }
            None => {
                for item in &with_products.products {
                    self.aisle_products.remove(item.id).await?;
                }
            }
        }

        debug!(aisle = %id, "aisle removed");
        self.aisles.remove(id).await
    }
}

/// Move an aisle to a new rank among its location's aisles.
pub struct MoveAisle {
    aisles: Arc<dyn AisleRepository>,
    tx: Arc<dyn TransactionRunner>,
}

impl MoveAisle {
    pub fn new(aisles: Arc<dyn AisleRepository>, tx: Arc<dyn TransactionRunner>) -> Self {
        Self { aisles, tx }
    }

    pub async fn execute(&self, id: AisleId, new_rank: i64) -> DomainResult<()> {
        self.tx
            .run(Box::pin(async move {
                let Some(with_products) = self.aisles.get_with_products(id).await? else {
                    return Err(DomainError::not_found(format!("aisle {id}")));
                };
                let siblings = self
                    .aisles
                    .get_for_location(with_products.aisle.location_id)
                    .await?;
                for changed in rank::reorder(&siblings, id, new_rank) {
                    self.aisles.update_rank(&changed).await?;
                }
                Ok(())
            }))
            .await
    }
}

/// Expand or collapse every aisle of one location, mirroring
/// [`ToggleLocationsExpanded`](crate::ToggleLocationsExpanded).
pub struct ToggleAislesExpanded {
    aisles: Arc<dyn AisleRepository>,
}

impl ToggleAislesExpanded {
    pub fn new(aisles: Arc<dyn AisleRepository>) -> Self {
        Self { aisles }
    }

    pub async fn execute(&self, location_id: LocationId) -> DomainResult<()> {
        let all = self.aisles.get_for_location(location_id).await?;
        let target = !all.iter().any(|a| a.expanded);
        for mut aisle in all {
            if aisle.expanded != target {
                aisle.expanded = target;
                self.aisles.update(aisle).await?;
            }
        }
        Ok(())
    }
}
