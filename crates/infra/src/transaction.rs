//! Staged transactions over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;

use shelfwise_core::DomainResult;
use shelfwise_repository::{TransactionRunner, TxFuture};

use crate::memory::{InMemoryStore, TX_SCOPE};

/// Runs a block with its writes staged on a private copy of the tables.
///
/// On entry the committed tables are cloned into a staging area and the
/// block runs under a task-local marker, so its reads and writes go to
/// that copy while every other task keeps seeing the committed state. On
/// success the copy replaces the committed tables in one step with a
/// single revision bump; if the block errors, or the caller drops the
/// suspended future before it completes, the copy is discarded and none
/// of its writes were ever visible. The write gate serializes
/// transactional blocks against each other. Plain single-row repository
/// calls outside a transaction do not take the gate.
pub struct InMemoryTransactionRunner {
    store: Arc<InMemoryStore>,
}

impl InMemoryTransactionRunner {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TransactionRunner for InMemoryTransactionRunner {
    async fn run(&self, block: TxFuture<'_>) -> DomainResult<()> {
        let _gate = self.store.write_gate().lock().await;
        self.store.begin_transaction()?;
        let mut guard = DiscardGuard {
            store: &self.store,
            armed: true,
        };
        TX_SCOPE.scope((), block).await?;
        guard.armed = false;
        self.store.commit_transaction()
    }
}

/// Throws the staging copy away unless defused by commit.
///
/// Running on drop covers both the error path and cancellation of the
/// suspended `run` future.
struct DiscardGuard<'a> {
    store: &'a InMemoryStore,
    armed: bool,
}

impl Drop for DiscardGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.store.discard_transaction();
        }
    }
}
