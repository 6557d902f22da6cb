use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::traits::DocumentStorage;

/// In-memory document storage.
///
/// Intended for tests and embedding. The document bytes live behind a
/// `RwLock`; replacement swaps the whole buffer, so it is trivially atomic.
#[derive(Default)]
pub struct InMemoryStorage {
    bytes: RwLock<Option<Vec<u8>>>,
    read_only: AtomicBool,
}

impl InMemoryStorage {
    /// Create storage with no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-loaded with raw document content.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: RwLock::new(Some(bytes.into())),
            read_only: AtomicBool::new(false),
        }
    }

    /// Current raw content, if any.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.bytes.read().ok().and_then(|guard| guard.clone())
    }

    /// Make every subsequent `replace` fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::other(format!("lock poisoned: {e}"))
}

#[async_trait]
impl DocumentStorage for InMemoryStorage {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        let guard = self.bytes.read().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn replace(&self, bytes: &[u8]) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only").into());
        }
        let mut guard = self.bytes.write().map_err(poisoned)?;
        *guard = Some(bytes.to_vec());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.contents().map(|b| b.len());
        f.debug_struct("InMemoryStorage")
            .field("document_len", &len)
            .field("read_only", &self.read_only.load(Ordering::SeqCst))
            .finish()
    }
}
