//! Pure list composition over a state snapshot.

use serde::{Deserialize, Serialize};

use shelfwise_core::{Aisle, AisleProduct, Location, LocationType, Product};

use crate::item::{Grouping, ListFilter, ListItem};

/// Immutable copy of all rows the composition reads. Ordering inside the
/// snapshot does not matter; [`compose`] sorts by rank itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub locations: Vec<Location>,
    pub aisles: Vec<Aisle>,
    pub aisle_products: Vec<AisleProduct>,
    pub products: Vec<Product>,
}

impl Snapshot {
    /// Products of one aisle in rank order, with the filter applied.
    fn filtered_aisle_products(&self, aisle: &Aisle, filter: &ListFilter) -> Vec<&Product> {
        let mut mappings: Vec<&AisleProduct> = self
            .aisle_products
            .iter()
            .filter(|ap| ap.aisle_id == aisle.id)
            .collect();
        mappings.sort_by_key(|ap| ap.rank);

        mappings
            .iter()
            .filter_map(|ap| self.products.iter().find(|p| p.id == ap.product_id))
            .filter(|p| filter.matches(p))
            .collect()
    }
}

/// Build the ordered, grouped, filtered view.
///
/// The result is never an empty sequence: when nothing survives filtering a
/// single [`ListItem::Empty`] sentinel is returned.
pub fn compose(snapshot: &Snapshot, grouping: &Grouping, filter: &ListFilter) -> Vec<ListItem> {
    let items = match grouping {
        Grouping::ByAisle { location_id } => {
            let Some(location) = snapshot.locations.iter().find(|l| l.id == *location_id) else {
                return vec![ListItem::Empty];
            };
            by_aisle(snapshot, location, filter)
        }
        Grouping::ByLocationType { location_type } => {
            by_location_type(snapshot, *location_type, filter)
        }
    };

    if items.is_empty() {
        vec![ListItem::Empty]
    } else {
        items
    }
}

fn by_aisle(snapshot: &Snapshot, location: &Location, filter: &ListFilter) -> Vec<ListItem> {
    let mut aisles: Vec<&Aisle> = snapshot
        .aisles
        .iter()
        .filter(|a| a.location_id == location.id)
        .collect();
    aisles.sort_by_key(|a| a.rank);

    let mut items = Vec::new();
    for aisle in aisles {
        if aisle.is_default && !location.show_default_aisle {
            continue;
        }
        let products = snapshot.filtered_aisle_products(aisle, filter);
        if products.is_empty() && !filter.show_empty {
            continue;
        }
        items.push(ListItem::AisleHeader(aisle.clone()));
        items.extend(products.into_iter().map(|p| ListItem::Entry(p.clone())));
    }
    items
}

fn by_location_type(
    snapshot: &Snapshot,
    location_type: LocationType,
    filter: &ListFilter,
) -> Vec<ListItem> {
    let mut locations: Vec<&Location> = snapshot
        .locations
        .iter()
        .filter(|l| l.location_type == location_type)
        .collect();
    // Pinned locations first, then rank order.
    locations.sort_by_key(|l| (!l.pinned, l.rank));

    let mut items = Vec::new();
    for location in locations {
        let mut aisles: Vec<&Aisle> = snapshot
            .aisles
            .iter()
            .filter(|a| a.location_id == location.id)
            .collect();
        aisles.sort_by_key(|a| a.rank);

        let products: Vec<&Product> = aisles
            .iter()
            .flat_map(|aisle| snapshot.filtered_aisle_products(aisle, filter))
            .collect();

        if products.is_empty() && !filter.show_empty {
            continue;
        }
        items.push(ListItem::LocationHeader(location.clone()));
        if location.expanded {
            items.extend(products.into_iter().map(|p| ListItem::Entry(p.clone())));
        }
    }
    items
}
