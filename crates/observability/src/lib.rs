//! Logging setup shared by the binary and integration tests.

/// Wire up structured logging for the whole process. Idempotent, so both
/// `main` and individual tests may call it.
pub fn init() {
    tracing::init();
}

/// Subscriber and filter plumbing.
pub mod tracing;
