//! `shelfwise-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): typed identifiers, the closed error model, entity structs for
//! the Location → Aisle → Product hierarchy, and the shared rank engine.

pub mod aisle;
pub mod error;
pub mod filter;
pub mod id;
pub mod location;
pub mod loyalty;
pub mod note;
pub mod product;
pub mod rank;

pub use aisle::{Aisle, AisleWithProducts, DEFAULT_AISLE_NAME, DEFAULT_AISLE_RANK};
pub use error::{DomainError, DomainResult, ErrorCode};
pub use filter::ProductFilter;
pub use id::{AisleId, AisleProductId, LocationId, LoyaltyCardId, NoteId, ProductId};
pub use location::{Location, LocationType, LocationWithAisles};
pub use loyalty::{CardProvider, LoyaltyCard};
pub use note::{Note, NoteParent};
pub use product::{AisleProduct, Product};
pub use rank::Ranked;
