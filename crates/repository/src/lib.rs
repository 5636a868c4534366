//! `shelfwise-repository`: data-access contracts consumed by the use-case
//! layer.
//!
//! These traits carry **no business rules**; they are typed CRUD plus the
//! specialized queries each use case needs. Concrete backends (the in-memory
//! arena store in `shelfwise-infra`, or a future SQL layer) implement them.
//! Use cases receive them as `Arc<dyn …>` through constructor injection.

pub mod aisle;
pub mod aisle_product;
pub mod changes;
pub mod location;
pub mod loyalty;
pub mod note;
pub mod product;
pub mod transaction;

pub use aisle::AisleRepository;
pub use aisle_product::AisleProductRepository;
pub use changes::ChangeStream;
pub use location::LocationRepository;
pub use loyalty::LoyaltyCardRepository;
pub use note::NoteRepository;
pub use product::ProductRepository;
pub use transaction::{TransactionRunner, TxFuture};
