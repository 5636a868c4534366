//! Aisle entity: the middle level of the hierarchy.

use serde::{Deserialize, Serialize};

use crate::id::{AisleId, LocationId};
use crate::product::AisleProduct;
use crate::rank::Ranked;

/// Rank assigned to every default aisle. High so the default aisle sorts
/// after user-created aisles without further bookkeeping.
pub const DEFAULT_AISLE_RANK: i64 = 1000;

/// Display name given to default aisles on creation.
pub const DEFAULT_AISLE_NAME: &str = "Default";

/// One aisle within a location.
///
/// Ranks are unique among the aisles of a location. Exactly one aisle per
/// location has `is_default` set; it is created together with its location
/// and acts as the landing zone for unassigned products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: AisleId,
    pub location_id: LocationId,
    pub name: String,
    pub rank: i64,
    pub is_default: bool,
    pub expanded: bool,
}

impl Aisle {
    pub fn new(location_id: LocationId, name: impl Into<String>, rank: i64) -> Self {
        Self {
            id: AisleId::UNASSIGNED,
            location_id,
            name: name.into(),
            rank,
            is_default: false,
            expanded: true,
        }
    }

    /// The default aisle created alongside a new location.
    pub fn default_for(location_id: LocationId) -> Self {
        Self {
            id: AisleId::UNASSIGNED,
            location_id,
            name: DEFAULT_AISLE_NAME.to_string(),
            rank: DEFAULT_AISLE_RANK,
            is_default: true,
            expanded: true,
        }
    }
}

impl Ranked for Aisle {
    type Key = AisleId;

    fn ranked_key(&self) -> AisleId {
        self.id
    }

    fn rank(&self) -> i64 {
        self.rank
    }

    fn set_rank(&mut self, rank: i64) {
        self.rank = rank;
    }
}

/// An aisle together with its product mappings, in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AisleWithProducts {
    pub aisle: Aisle,
    pub products: Vec<AisleProduct>,
}

impl AisleWithProducts {
    /// Rank for appending a product to the end of this aisle.
    pub fn next_rank(&self) -> i64 {
        self.products
            .iter()
            .map(|p| p.rank)
            .max()
            .map_or(0, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_rank_appends_after_the_highest_rank() {
        let aisle = Aisle::new(LocationId::new(1), "Dairy", 0);
        let mut with_products = AisleWithProducts {
            aisle,
            products: vec![],
        };
        assert_eq!(with_products.next_rank(), 0);

        with_products.products = vec![
            AisleProduct::new(AisleId::new(1), crate::ProductId::new(1), 0),
            AisleProduct::new(AisleId::new(1), crate::ProductId::new(2), 4),
        ];
        assert_eq!(with_products.next_rank(), 5);
    }

    #[test]
    fn default_aisle_sorts_after_user_aisles() {
        let default = Aisle::default_for(LocationId::new(1));
        let user = Aisle::new(LocationId::new(1), "Bakery", 12);
        assert!(default.is_default);
        assert!(default.rank > user.rank);
    }
}
