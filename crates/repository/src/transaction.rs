use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use shelfwise_core::DomainResult;

/// Boxed unit of transactional work.
pub type TxFuture<'a> = Pin<Box<dyn Future<Output = DomainResult<()>> + Send + 'a>>;

/// Atomic execution wrapper for multi-step mutations.
///
/// `run` guarantees the block either fully commits or fully rolls back, and
/// that no partial rank state is observable by a concurrent reader. Rank
/// shifts are read-then-write sequences over shared sibling sets; the
/// transaction boundary is what keeps two interleaved inserts at the same
/// rank from corrupting the ordering (single-writer discipline, no per-row
/// locking).
///
/// Implementations must also discard uncommitted work when the caller
/// cancels the suspended block.
#[async_trait]
pub trait TransactionRunner: Send + Sync {
    async fn run(&self, block: TxFuture<'_>) -> DomainResult<()>;
}
