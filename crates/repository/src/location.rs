use async_trait::async_trait;

use shelfwise_core::{DomainResult, Location, LocationId, LocationType, LocationWithAisles};

/// Data access for [`Location`] rows.
///
/// `add` assigns an id when the entity carries `LocationId::UNASSIGNED` and
/// returns the stored row. `remove` cascades to the location's aisles and
/// their product mappings (the storage layer's responsibility, mirroring
/// foreign-key cascades); the lifecycle use cases still perform the
/// reassignment dance *before* calling it so invariants hold mid-flight.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn get(&self, id: LocationId) -> DomainResult<Option<Location>>;

    async fn get_all(&self) -> DomainResult<Vec<Location>>;

    async fn get_by_type(&self, location_type: LocationType) -> DomainResult<Vec<Location>>;

    /// All locations with this exact name, across types. Callers filter by
    /// type for the per-type uniqueness rule.
    async fn get_by_name(&self, name: &str) -> DomainResult<Vec<Location>>;

    /// The location plus its aisles (rank order) and their mappings.
    async fn get_with_aisles(&self, id: LocationId) -> DomainResult<Option<LocationWithAisles>>;

    async fn add(&self, location: Location) -> DomainResult<Location>;

    async fn update(&self, location: Location) -> DomainResult<()>;

    async fn remove(&self, id: LocationId) -> DomainResult<()>;
}
