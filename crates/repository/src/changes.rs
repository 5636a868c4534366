use std::sync::Arc;

use tokio::sync::watch;

/// Push-based notification that repository state changed.
///
/// Backends bump a revision counter after every committed mutation.
/// Subscribers hold a `watch::Receiver`: they always observe the latest
/// revision on subscribe (replay-latest) and intermediate revisions may be
/// coalesced; consumers recompute from current state rather than applying
/// deltas.
pub trait ChangeStream: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<u64>;
}

impl<S> ChangeStream for Arc<S>
where
    S: ChangeStream + ?Sized,
{
    fn subscribe(&self) -> watch::Receiver<u64> {
        (**self).subscribe()
    }
}
