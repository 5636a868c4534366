//! `shelfwise-infra`: concrete backends and the composition root.
//!
//! The in-memory arena store doubles as the reference implementation for
//! tests and a prototyping backend; `bootstrap` wires every use case against
//! it with plain constructor injection (no service locator).

pub mod bootstrap;
pub mod memory;
pub mod transaction;

mod integration_tests;

pub use bootstrap::{bootstrap, App};
pub use memory::InMemoryStore;
pub use transaction::InMemoryTransactionRunner;
