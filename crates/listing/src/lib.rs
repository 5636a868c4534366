//! `shelfwise-listing`: shopping-list view composition.
//!
//! Builds the filtered, ordered, grouped view of the hierarchy. The actual
//! composition is a pure function over an immutable [`Snapshot`]
//! ([`compose`]); [`ShoppingList`] layers the repository reads and the live
//! re-emitting stream on top.

pub mod compose;
pub mod item;
pub mod stream;

pub use compose::{compose, Snapshot};
pub use item::{Grouping, ListFilter, ListItem};
pub use stream::ShoppingList;
