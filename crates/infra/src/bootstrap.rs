//! Composition root.
//!
//! Wires the in-memory backend into every use case with plain constructor
//! injection and guarantees the standing home location exists before the app
//! is handed out.

use std::sync::Arc;

use tracing::info;

use shelfwise_core::{DomainResult, Location, LocationType};
use shelfwise_listing::ShoppingList;
use shelfwise_repository::{
    AisleProductRepository, AisleRepository, ChangeStream, LocationRepository,
    LoyaltyCardRepository, NoteRepository, ProductRepository, TransactionRunner,
};
use shelfwise_usecases::{
    AddAisle, AddLocation, AddLoyaltyCardToLocation, AddProduct, ChangeProductAisle,
    GenerateSampleData, MoveAisle, MoveAisleProduct, MoveLocation, RemoveAisle, RemoveLocation,
    RemoveLoyaltyCardFromLocation, RemoveNote, RemoveProduct, SaveNote, SortLocationsByName,
    ToggleAislesExpanded, ToggleLocationsExpanded, UpdateAisle, UpdateLocation, UpdateProduct,
    UpdateProductStatus,
};

use crate::memory::InMemoryStore;
use crate::transaction::InMemoryTransactionRunner;

/// Fully wired application: every use case plus the live list view.
pub struct App {
    pub add_location: AddLocation,
    pub update_location: UpdateLocation,
    pub remove_location: RemoveLocation,
    pub move_location: MoveLocation,
    pub sort_locations_by_name: SortLocationsByName,
    pub toggle_locations_expanded: ToggleLocationsExpanded,

    pub add_aisle: AddAisle,
    pub update_aisle: UpdateAisle,
    pub remove_aisle: RemoveAisle,
    pub move_aisle: MoveAisle,
    pub toggle_aisles_expanded: ToggleAislesExpanded,

    pub add_product: AddProduct,
    pub update_product: UpdateProduct,
    pub update_product_status: UpdateProductStatus,
    pub remove_product: RemoveProduct,
    pub change_product_aisle: ChangeProductAisle,
    pub move_aisle_product: MoveAisleProduct,

    pub save_note: SaveNote,
    pub remove_note: RemoveNote,

    pub add_loyalty_card: AddLoyaltyCardToLocation,
    pub remove_loyalty_card: RemoveLoyaltyCardFromLocation,

    pub generate_sample_data: GenerateSampleData,

    pub shopping_list: ShoppingList,

    pub store: Arc<InMemoryStore>,
}

/// Build an [`App`] over a fresh in-memory store.
///
/// Idempotent with respect to the home location: one is created only when no
/// location of type `Home` exists yet.
pub async fn bootstrap() -> DomainResult<App> {
    let store = Arc::new(InMemoryStore::new());

    let locations: Arc<dyn LocationRepository> = store.clone();
    let aisles: Arc<dyn AisleRepository> = store.clone();
    let aisle_products: Arc<dyn AisleProductRepository> = store.clone();
    let products: Arc<dyn ProductRepository> = store.clone();
    let notes: Arc<dyn NoteRepository> = store.clone();
    let cards: Arc<dyn LoyaltyCardRepository> = store.clone();
    let changes: Arc<dyn ChangeStream> = store.clone();
    let tx: Arc<dyn TransactionRunner> = Arc::new(InMemoryTransactionRunner::new(store.clone()));

    let add_location = AddLocation::new(
        locations.clone(),
        aisles.clone(),
        aisle_products.clone(),
        products.clone(),
    );
    let add_aisle = AddAisle::new(locations.clone(), aisles.clone());
    let add_product = AddProduct::new(
        products.clone(),
        locations.clone(),
        aisles.clone(),
        aisle_products.clone(),
    );
    let remove_aisle = RemoveAisle::new(aisles.clone(), aisle_products.clone());
    let change_product_aisle = ChangeProductAisle::new(aisles.clone(), aisle_products.clone());

    let generate_sample_data = GenerateSampleData::new(
        products.clone(),
        locations.clone(),
        aisles.clone(),
        add_product.clone(),
        add_location.clone(),
        add_aisle.clone(),
        change_product_aisle.clone(),
    );

    let app = App {
        remove_location: RemoveLocation::new(
            locations.clone(),
            aisles.clone(),
            aisle_products.clone(),
            notes.clone(),
            remove_aisle.clone(),
        ),
        update_location: UpdateLocation::new(locations.clone()),
        move_location: MoveLocation::new(locations.clone(), tx.clone()),
        sort_locations_by_name: SortLocationsByName::new(
            locations.clone(),
            aisles.clone(),
            tx.clone(),
        ),
        toggle_locations_expanded: ToggleLocationsExpanded::new(locations.clone()),

        update_aisle: UpdateAisle::new(locations.clone(), aisles.clone()),
        move_aisle: MoveAisle::new(aisles.clone(), tx.clone()),
        toggle_aisles_expanded: ToggleAislesExpanded::new(aisles.clone()),

        update_product: UpdateProduct::new(products.clone()),
        update_product_status: UpdateProductStatus::new(products.clone()),
        remove_product: RemoveProduct::new(products.clone(), notes.clone()),
        move_aisle_product: MoveAisleProduct::new(
            aisles.clone(),
            aisle_products.clone(),
            tx.clone(),
        ),

        save_note: SaveNote::new(notes.clone(), products.clone(), locations.clone()),
        remove_note: RemoveNote::new(notes.clone(), products.clone(), locations.clone()),

        add_loyalty_card: AddLoyaltyCardToLocation::new(locations.clone(), cards.clone()),
        remove_loyalty_card: RemoveLoyaltyCardFromLocation::new(cards.clone()),

        shopping_list: ShoppingList::new(
            locations.clone(),
            aisles.clone(),
            aisle_products.clone(),
            products.clone(),
            changes,
        ),

        add_location,
        add_aisle,
        add_product,
        remove_aisle,
        change_product_aisle,
        generate_sample_data,
        store,
    };

    if app.store.get_by_type(LocationType::Home).await?.is_empty() {
        let home = app
            .add_location
            .execute(Location::new(LocationType::Home, "Home"))
            .await?;
        info!(location = %home.id, "home location created");
    }

    Ok(app)
}
