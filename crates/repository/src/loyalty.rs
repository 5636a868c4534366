use async_trait::async_trait;

use shelfwise_core::{DomainResult, LocationId, LoyaltyCard, LoyaltyCardId};

/// Data access for [`LoyaltyCard`] rows and their card↔location association.
#[async_trait]
pub trait LoyaltyCardRepository: Send + Sync {
    async fn get(&self, id: LoyaltyCardId) -> DomainResult<Option<LoyaltyCard>>;

    /// Cards linked to one location.
    async fn get_for_location(&self, location_id: LocationId) -> DomainResult<Vec<LoyaltyCard>>;

    async fn add(&self, card: LoyaltyCard) -> DomainResult<LoyaltyCard>;

    async fn remove(&self, id: LoyaltyCardId) -> DomainResult<()>;

    async fn add_to_location(
        &self,
        card_id: LoyaltyCardId,
        location_id: LocationId,
    ) -> DomainResult<()>;

    async fn remove_from_location(
        &self,
        card_id: LoyaltyCardId,
        location_id: LocationId,
    ) -> DomainResult<()>;
}
