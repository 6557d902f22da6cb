use std::fmt;

use async_trait::async_trait;

use crate::error::StoreResult;

/// Byte-level backend holding one collection document.
///
/// All implementations must satisfy these invariants:
/// - `load` returns `Ok(None)` only when the document has never been
///   written; every other failure is an error.
/// - `replace` is all-or-nothing: a concurrent `load` observes either the
///   previous complete content or the new complete content.
/// - I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait DocumentStorage: Send + Sync + fmt::Debug {
    /// Human-readable location, used in logs and corruption errors.
    fn location(&self) -> String;

    /// Read the whole document.
    async fn load(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically replace the whole document.
    async fn replace(&self, bytes: &[u8]) -> StoreResult<()>;
}
