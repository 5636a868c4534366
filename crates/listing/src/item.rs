//! View-level types for the shopping list.

use serde::{Deserialize, Serialize};

use shelfwise_core::{Aisle, Location, LocationId, LocationType, Product, ProductFilter};

/// How the list is organized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One location's aisles, each followed by its products.
    ByAisle { location_id: LocationId },
    /// All locations of a type, each followed by its flattened products.
    ByLocationType { location_type: LocationType },
}

/// Orthogonal filters applied to the composed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub product_filter: ProductFilter,
    /// Case-insensitive substring match on product names, applied after the
    /// stock-status filter. Empty matches everything.
    pub name_query: String,
    /// Keep branches (aisles, collapsed-out locations) with no matching
    /// products visible.
    pub show_empty: bool,
}

impl ListFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.product_filter.matches(product) && product.matches_query(&self.name_query)
    }
}

/// One renderable row of the composed list.
///
/// A composed list is never empty: when no row survives filtering, a single
/// [`ListItem::Empty`] sentinel is emitted so the consuming view always has
/// something to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListItem {
    LocationHeader(Location),
    AisleHeader(Aisle),
    Entry(Product),
    Empty,
}
