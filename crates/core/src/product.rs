//! Product entity and its aisle mapping row.

use serde::{Deserialize, Serialize};

use crate::id::{AisleId, AisleProductId, NoteId, ProductId};
use crate::rank::Ranked;

/// A product on the shopping list. Names are globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub in_stock: bool,
    /// Free-form quantity needed ("2", "500 g", ...), if any.
    pub quantity: Option<String>,
    pub note_id: Option<NoteId>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProductId::UNASSIGNED,
            name: name.into(),
            in_stock: false,
            quantity: None,
            note_id: None,
        }
    }

    /// Case-insensitive substring match used by the free-text list filter.
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Join row: "this product appears in this aisle at this position".
///
/// A product appears in at most one aisle per location; ranks are unique
/// among the rows of one aisle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AisleProduct {
    pub id: AisleProductId,
    pub aisle_id: AisleId,
    pub product_id: ProductId,
    pub rank: i64,
}

impl AisleProduct {
    pub fn new(aisle_id: AisleId, product_id: ProductId, rank: i64) -> Self {
        Self {
            id: AisleProductId::UNASSIGNED,
            aisle_id,
            product_id,
            rank,
        }
    }
}

impl Ranked for AisleProduct {
    type Key = AisleProductId;

    fn ranked_key(&self) -> AisleProductId {
        self.id
    }

    fn rank(&self) -> i64 {
        self.rank
    }

    fn set_rank(&mut self, rank: i64) {
        self.rank = rank;
    }
}
