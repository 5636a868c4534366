//! Location lifecycle use cases.

use std::sync::Arc;

use tracing::debug;

use shelfwise_core::{
    rank, Aisle, AisleProduct, DomainError, DomainResult, Location, LocationId, LocationType,
};
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, LocationRepository, NoteRepository,
    ProductRepository, TransactionRunner,
};

use crate::aisle::RemoveAisle;

/// Names are unique per location type; `exclude` skips the entity itself on
/// rename.
async fn ensure_unique_name(
    locations: &dyn LocationRepository,
    name: &str,
    location_type: LocationType,
    exclude: Option<LocationId>,
) -> DomainResult<()> {
    let clash = locations
        .get_by_name(name)
        .await?
        .into_iter()
        .any(|l| l.location_type == location_type && Some(l.id) != exclude);
    if clash {
        return Err(DomainError::duplicate_location_name(name));
    }
    Ok(())
}

/// Create a location, its default aisle, and map every existing product into
/// that aisle so it shows up, unassigned, in the new location's list.
#[derive(Clone)]
pub struct AddLocation {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
    products: Arc<dyn ProductRepository>,
}

impl AddLocation {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            locations,
            aisles,
            aisle_products,
            products,
        }
    }

    pub async fn execute(&self, location: Location) -> DomainResult<Location> {
        ensure_unique_name(
            &*self.locations,
            &location.name,
            location.location_type,
            None,
        )
        .await?;

        let stored = self.locations.add(location).await?;
        let default_aisle = self.aisles.add(Aisle::default_for(stored.id)).await?;

        // Sequential ranks keep sibling ranks distinct inside the landing zone.
        let existing = self.products.get_all().await?;
        for (rank, product) in existing.into_iter().enumerate() {
            self.aisle_products
                .add(AisleProduct::new(default_aisle.id, product.id, rank as i64))
                .await?;
        }

        debug!(location = %stored.id, "location added with default aisle");
        Ok(stored)
    }
}

/// Rename or reconfigure a location, re-validating name uniqueness.
pub struct UpdateLocation {
    locations: Arc<dyn LocationRepository>,
}

impl UpdateLocation {
    pub fn new(locations: Arc<dyn LocationRepository>) -> Self {
        Self { locations }
    }

    pub async fn execute(&self, location: Location) -> DomainResult<()> {
        if self.locations.get(location.id).await?.is_none() {
            return Err(DomainError::invalid_location(location.id));
        }
        ensure_unique_name(
            &*self.locations,
            &location.name,
            location.location_type,
            Some(location.id),
        )
        .await?;
        self.locations.update(location).await
    }
}

/// Remove a location and everything under it.
///
/// Two-phase teardown: non-default aisles go through [`RemoveAisle`] first,
/// so their products drain into the default aisle (the landing zone stays
/// present throughout); only then is the default aisle stripped of its
/// mappings and deleted along with the location. Removing an unknown id is a
/// benign no-op.
pub struct RemoveLocation {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    aisle_products: Arc<dyn AisleProductRepository>,
    notes: Arc<dyn NoteRepository>,
    remove_aisle: RemoveAisle,
}

impl RemoveLocation {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        aisle_products: Arc<dyn AisleProductRepository>,
        notes: Arc<dyn NoteRepository>,
        remove_aisle: RemoveAisle,
    ) -> Self {
        Self {
            locations,
            aisles,
            aisle_products,
            notes,
            remove_aisle,
        }
    }

    pub async fn execute(&self, id: LocationId) -> DomainResult<()> {
        let Some(with_aisles) = self.locations.get_with_aisles(id).await? else {
            return Ok(());
        };

        for aisle in with_aisles.non_default_aisles() {
            self.remove_aisle.execute(aisle.aisle.id).await?;
        }

        // The default aisle is now the sole remaining aisle; there is no
        // further reassignment target, so its mappings are dropped directly.
        if let Some(default) = with_aisles.default_aisle() {
            self.aisle_products
                .remove_products_from_aisle(default.aisle.id)
                .await?;
            self.aisles.remove(default.aisle.id).await?;
        }

        if let Some(note_id) = with_aisles.location.note_id {
            self.notes.remove(note_id).await?;
        }

        debug!(location = %id, "location removed");
        self.locations.remove(id).await
    }
}

/// Re-rank all locations of a type alphabetically, optionally cascading into
/// each location's aisles, as a single transaction.
pub struct SortLocationsByName {
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    tx: Arc<dyn TransactionRunner>,
}

impl SortLocationsByName {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        tx: Arc<dyn TransactionRunner>,
    ) -> Self {
        Self {
            locations,
            aisles,
            tx,
        }
    }

    pub async fn execute(
        &self,
        location_type: LocationType,
        include_aisles: bool,
    ) -> DomainResult<()> {
        self.tx
            .run(Box::pin(async move {
                let all = self.locations.get_by_type(location_type).await?;
                for changed in rank::rerank_by_name(&all, |l| l.name.as_str()) {
                    self.locations.update(changed).await?;
                }

                if include_aisles {
                    for location in &all {
                        let aisles = self.aisles.get_for_location(location.id).await?;
                        // The default aisle keeps its high rank and stays last.
                        let user_aisles: Vec<Aisle> =
                            aisles.into_iter().filter(|a| !a.is_default).collect();
                        for changed in rank::rerank_by_name(&user_aisles, |a| a.name.as_str()) {
                            self.aisles.update_rank(&changed).await?;
                        }
                    }
                }
                Ok(())
            }))
            .await
    }
}

/// Expand or collapse every location of a type in one go: if none are
/// expanded, expand all; otherwise collapse all. Locations already in the
/// target state are not written.
pub struct ToggleLocationsExpanded {
    locations: Arc<dyn LocationRepository>,
}

impl ToggleLocationsExpanded {
    pub fn new(locations: Arc<dyn LocationRepository>) -> Self {
        Self { locations }
    }

    pub async fn execute(&self, location_type: LocationType) -> DomainResult<()> {
        let all = self.locations.get_by_type(location_type).await?;
        let target = !all.iter().any(|l| l.expanded);
        for mut location in all {
            if location.expanded != target {
                location.expanded = target;
                self.locations.update(location).await?;
            }
        }
        Ok(())
    }
}

/// Move a location to a new rank among locations of its type.
pub struct MoveLocation {
    locations: Arc<dyn LocationRepository>,
    tx: Arc<dyn TransactionRunner>,
}

impl MoveLocation {
    pub fn new(locations: Arc<dyn LocationRepository>, tx: Arc<dyn TransactionRunner>) -> Self {
        Self { locations, tx }
    }

    pub async fn execute(&self, id: LocationId, new_rank: i64) -> DomainResult<()> {
        self.tx
            .run(Box::pin(async move {
                let Some(location) = self.locations.get(id).await? else {
                    return Err(DomainError::not_found(format!("location {id}")));
                };
                let siblings = self.locations.get_by_type(location.location_type).await?;
                for changed in rank::reorder(&siblings, id, new_rank) {
                    self.locations.update(changed).await?;
                }
                Ok(())
            }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use shelfwise_core::LocationWithAisles;

    use super::*;

    /// Read-only stand-in; only the lookup paths of the uniqueness check are
    /// exercised.
    struct FixedLocations(Vec<Location>);

    #[async_trait]
    impl LocationRepository for FixedLocations {
        async fn get(&self, id: LocationId) -> DomainResult<Option<Location>> {
            Ok(self.0.iter().find(|l| l.id == id).cloned())
        }

        async fn get_all(&self) -> DomainResult<Vec<Location>> {
            Ok(self.0.clone())
        }

        async fn get_by_type(&self, location_type: LocationType) -> DomainResult<Vec<Location>> {
            Ok(self
                .0
                .iter()
                .filter(|l| l.location_type == location_type)
                .cloned()
                .collect())
        }

        async fn get_by_name(&self, name: &str) -> DomainResult<Vec<Location>> {
            Ok(self.0.iter().filter(|l| l.name == name).cloned().collect())
        }

        async fn get_with_aisles(
            &self,
            _id: LocationId,
        ) -> DomainResult<Option<LocationWithAisles>> {
            unimplemented!()
        }

        async fn add(&self, _location: Location) -> DomainResult<Location> {
            unimplemented!()
        }

        async fn update(&self, _location: Location) -> DomainResult<()> {
            unimplemented!()
        }

        async fn remove(&self, _id: LocationId) -> DomainResult<()> {
            unimplemented!()
        }
    }

    fn named(id: i64, location_type: LocationType, name: &str) -> Location {
        let mut location = Location::new(location_type, name);
        location.id = LocationId::new(id);
        location
    }

    #[tokio::test]
    async fn names_clash_only_within_the_same_type() {
        let repo = FixedLocations(vec![
            named(1, LocationType::Shop, "Spar"),
            named(2, LocationType::Home, "Home"),
        ]);

        assert!(matches!(
            ensure_unique_name(&repo, "Spar", LocationType::Shop, None).await,
            Err(DomainError::DuplicateLocationName { .. })
        ));

        // Same name, other type: fine.
        ensure_unique_name(&repo, "Spar", LocationType::Home, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn renames_skip_the_entity_itself() {
        let repo = FixedLocations(vec![named(1, LocationType::Shop, "Spar")]);

        ensure_unique_name(&repo, "Spar", LocationType::Shop, Some(LocationId::new(1)))
            .await
            .unwrap();

        assert!(matches!(
            ensure_unique_name(&repo, "Spar", LocationType::Shop, Some(LocationId::new(9))).await,
            Err(DomainError::DuplicateLocationName { .. })
        ));
    }
}
