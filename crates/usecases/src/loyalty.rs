//! Loyalty card attachment use cases.

use std::sync::Arc;

use shelfwise_core::{DomainError, DomainResult, LocationId, LoyaltyCard, LoyaltyCardId};
use shelfwise_repository::{LocationRepository, LoyaltyCardRepository};

/// Store a card (if new) and link it to a location.
pub struct AddLoyaltyCardToLocation {
    locations: Arc<dyn LocationRepository>,
    cards: Arc<dyn LoyaltyCardRepository>,
}

impl AddLoyaltyCardToLocation {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        cards: Arc<dyn LoyaltyCardRepository>,
    ) -> Self {
        Self { locations, cards }
    }

    pub async fn execute(
        &self,
        card: LoyaltyCard,
        location_id: LocationId,
    ) -> DomainResult<LoyaltyCard> {
        if self.locations.get(location_id).await?.is_none() {
            return Err(DomainError::invalid_location(location_id));
        }

        let stored = if card.id.is_assigned() {
            let id = card.id;
            self.cards
                .get(id)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("loyalty card {id}")))?
        } else {
            self.cards.add(card).await?
        };

        self.cards.add_to_location(stored.id, location_id).await?;
        Ok(stored)
    }
}

/// Unlink a card from its location and delete the card row. A card belongs
/// to at most one location; detached cards are unreachable, so they are not
/// kept around.
pub struct RemoveLoyaltyCardFromLocation {
    cards: Arc<dyn LoyaltyCardRepository>,
}

impl RemoveLoyaltyCardFromLocation {
    pub fn new(cards: Arc<dyn LoyaltyCardRepository>) -> Self {
        Self { cards }
    }

    pub async fn execute(
        &self,
        card_id: LoyaltyCardId,
        location_id: LocationId,
    ) -> DomainResult<()> {
        self.cards.remove_from_location(card_id, location_id).await?;
        self.cards.remove(card_id).await
    }
}
