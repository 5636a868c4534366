use async_trait::async_trait;

use shelfwise_core::{Aisle, AisleId, AisleWithProducts, DomainResult, LocationId};

/// Data access for [`Aisle`] rows.
#[async_trait]
pub trait AisleRepository: Send + Sync {
    /// Aisles of one location, in rank order.
    async fn get_for_location(&self, location_id: LocationId) -> DomainResult<Vec<Aisle>>;

    /// The location's default aisle, if present. Absence is only observable
    /// mid-teardown of the location itself.
    async fn get_default_for(&self, location_id: LocationId) -> DomainResult<Option<Aisle>>;

    /// The aisle plus its product mappings, in rank order.
    async fn get_with_products(&self, id: AisleId) -> DomainResult<Option<AisleWithProducts>>;

    async fn add(&self, aisle: Aisle) -> DomainResult<Aisle>;

    async fn update(&self, aisle: Aisle) -> DomainResult<()>;

    /// Persist only the rank of an aisle (the rank engine's write path).
    async fn update_rank(&self, aisle: &Aisle) -> DomainResult<()>;

    async fn remove(&self, id: AisleId) -> DomainResult<()>;
}
