//! One-shot sample data seeding.

use std::sync::Arc;

use tracing::info;

use shelfwise_core::{
    Aisle, DomainError, DomainResult, Location, LocationId, LocationType, Product,
};
use shelfwise_repository::{AisleRepository, LocationRepository, ProductRepository};

use crate::aisle::AddAisle;
use crate::location::AddLocation;
use crate::product::{AddProduct, ChangeProductAisle};

/// Canonical seed products and the aisle each one belongs in.
const SAMPLE_PRODUCTS: &[(&str, &str)] = &[
    ("Milk", "Dairy"),
    ("Butter", "Dairy"),
    ("Cheese", "Dairy"),
    ("Yoghurt", "Dairy"),
    ("Bread", "Bakery"),
    ("Bagels", "Bakery"),
    ("Apples", "Produce"),
    ("Bananas", "Produce"),
    ("Tomatoes", "Produce"),
    ("Spinach", "Produce"),
    ("Rice", "Pantry"),
    ("Pasta", "Pantry"),
    ("Olive oil", "Pantry"),
    ("Coffee", "Beverages"),
    ("Tea", "Beverages"),
    ("Orange juice", "Beverages"),
    ("Chicken", "Meat"),
    ("Bacon", "Meat"),
];

const SAMPLE_AISLES: &[&str] = &["Dairy", "Bakery", "Produce", "Pantry", "Beverages", "Meat"];

const SAMPLE_SHOP_NAME: &str = "Corner Market";

/// Populate an empty system with a canonical product list, aisles on the
/// home location and one canonical shop, and products sorted into their
/// aisles.
///
/// The generator is built entirely out of the add/move use cases, never a
/// bespoke bulk-insert path, so it cannot desynchronize from the invariants
/// those use cases enforce. The guard is all-or-nothing: any pre-existing
/// product aborts the run before anything is written.
pub struct GenerateSampleData {
    products: Arc<dyn ProductRepository>,
    locations: Arc<dyn LocationRepository>,
    aisles: Arc<dyn AisleRepository>,
    add_product: AddProduct,
    add_location: AddLocation,
    add_aisle: AddAisle,
    change_aisle: ChangeProductAisle,
}

impl GenerateSampleData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        products: Arc<dyn ProductRepository>,
        locations: Arc<dyn LocationRepository>,
        aisles: Arc<dyn AisleRepository>,
        add_product: AddProduct,
        add_location: AddLocation,
        add_aisle: AddAisle,
        change_aisle: ChangeProductAisle,
    ) -> Self {
        Self {
            products,
            locations,
            aisles,
            add_product,
            add_location,
            add_aisle,
            change_aisle,
        }
    }

    pub async fn execute(&self) -> DomainResult<()> {
        if !self.products.get_all().await?.is_empty() {
            return Err(DomainError::SampleDataCreation);
        }

        for (name, _) in SAMPLE_PRODUCTS {
            self.add_product.execute(Product::new(*name)).await?;
        }

        let home = self
            .locations
            .get_by_type(LocationType::Home)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("home location"))?;
        let shop = self
            .add_location
            .execute(Location::new(LocationType::Shop, SAMPLE_SHOP_NAME))
            .await?;

        for target in [home.id, shop.id] {
            for (rank, name) in SAMPLE_AISLES.iter().enumerate() {
                self.add_aisle
                    .execute(Aisle::new(target, *name, rank as i64))
                    .await?;
            }
            self.sort_into_aisles(target).await?;
        }

        info!(
            products = SAMPLE_PRODUCTS.len(),
            "sample data generated"
        );
        Ok(())
    }

    /// Relocate every seeded product from the location's default aisle into
    /// its canonical aisle, by name lookup.
    async fn sort_into_aisles(&self, location_id: LocationId) -> DomainResult<()> {
        let with_aisles = self
            .locations
            .get_with_aisles(location_id)
            .await?
            .ok_or_else(|| DomainError::invalid_location(location_id))?;
        let default_id = with_aisles
            .default_aisle()
            .ok_or_else(|| DomainError::not_found(format!("default aisle of {location_id}")))?
            .aisle
            .id;

        for (product_name, aisle_name) in SAMPLE_PRODUCTS {
            let product = self
                .products
                .get_by_name(product_name)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("product '{product_name}'")))?;
            let target = with_aisles
                .aisles
                .iter()
                .find(|a| a.aisle.name == *aisle_name)
                .ok_or_else(|| DomainError::not_found(format!("aisle '{aisle_name}'")))?
                .aisle
                .id;
            self.change_aisle.execute(product.id, default_id, target).await?;
        }
        Ok(())
    }
}
