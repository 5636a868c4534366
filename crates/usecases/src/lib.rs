//! `shelfwise-usecases`: the business-rule layer.
//!
//! Every state transition in the hierarchy goes through one of these use
//! cases; entities are never created or destroyed through a repository
//! directly. Each use case is a small struct holding its collaborators as
//! `Arc<dyn …>` (constructor injection, no global state) and exposing a
//! single async `execute` operation that validates *before* mutating: a
//! returned error means nothing was persisted.

pub mod aisle;
pub mod location;
pub mod loyalty;
pub mod note;
pub mod product;
pub mod sample_data;

pub use aisle::{AddAisle, MoveAisle, RemoveAisle, ToggleAislesExpanded, UpdateAisle};
pub use location::{
    AddLocation, MoveLocation, RemoveLocation, SortLocationsByName, ToggleLocationsExpanded,
    UpdateLocation,
};
pub use loyalty::{AddLoyaltyCardToLocation, RemoveLoyaltyCardFromLocation};
pub use note::{RemoveNote, SaveNote};
pub use product::{
    AddProduct, ChangeProductAisle, MoveAisleProduct, RemoveProduct, UpdateProduct,
    UpdateProductStatus,
};
pub use sample_data::GenerateSampleData;
