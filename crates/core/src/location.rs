//! Location entity: the root level of the hierarchy.

use serde::{Deserialize, Serialize};

use crate::aisle::AisleWithProducts;
use crate::filter::ProductFilter;
use crate::id::{LocationId, NoteId};
use crate::rank::Ranked;

/// Kind of location.
///
/// Exactly one `Home` exists; it is created at system initialization and is
/// never deleted by normal flows. Any number of `Shop` locations may exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Home,
    Shop,
}

/// A place products are kept or bought (home, or one shop).
///
/// Names are unique within a [`LocationType`]; a shop and the home may share
/// a name. `rank` orders locations of the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub location_type: LocationType,
    pub name: String,
    /// Pinned locations sort before unpinned ones in grouped views.
    pub pinned: bool,
    pub rank: i64,
    /// Stock-status filter this location's view starts with.
    pub default_filter: ProductFilter,
    pub expanded: bool,
    /// Whether the default aisle is visible in this location's list view.
    pub show_default_aisle: bool,
    pub note_id: Option<NoteId>,
}

impl Location {
    pub fn new(location_type: LocationType, name: impl Into<String>) -> Self {
        Self {
            id: LocationId::UNASSIGNED,
            location_type,
            name: name.into(),
            pinned: false,
            rank: 0,
            default_filter: ProductFilter::All,
            expanded: true,
            show_default_aisle: true,
            note_id: None,
        }
    }
}

impl Ranked for Location {
    type Key = LocationId;

    fn ranked_key(&self) -> LocationId {
        self.id
    }

    fn rank(&self) -> i64 {
        self.rank
    }

    fn set_rank(&mut self, rank: i64) {
        self.rank = rank;
    }
}

/// A location together with its aisles and their product mappings, as
/// returned by `LocationRepository::get_with_aisles`. Aisles arrive in rank
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationWithAisles {
    pub location: Location,
    pub aisles: Vec<AisleWithProducts>,
}

impl LocationWithAisles {
    pub fn default_aisle(&self) -> Option<&AisleWithProducts> {
        self.aisles.iter().find(|a| a.aisle.is_default)
    }

    pub fn non_default_aisles(&self) -> impl Iterator<Item = &AisleWithProducts> {
        self.aisles.iter().filter(|a| !a.aisle.is_default)
    }
}
