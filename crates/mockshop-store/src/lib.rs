//! JSON-document entity store for Mockshop.
//!
//! Each entity collection (users, orders, carts, products) lives in one JSON
//! document on disk. A [`JsonStore`] reads the whole document, applies one
//! query or mutation to an owned copy, and writes the whole document back.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStorage`] trait:
//!
//! - [`FsStorage`] -- temp file + atomic rename on the local file system
//! - [`InMemoryStorage`] -- byte buffer for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store is the only writer of its document.
//! 2. Replacement is atomic: readers see the old or the new document, never a mix.
//! 3. An absent document is created on first access; a corrupt one is reported.
//! 4. Validation runs before any write; a rejected mutation writes nothing.
//! 5. "Not found" is data (`Option`/`bool`), not an error.
//! 6. All I/O errors are propagated, never silently ignored.
//! 7. No in-process locking: concurrent mutations of one collection can lose updates.

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod fs;
pub mod memory;
pub mod models;
pub mod query;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use catalog::{Catalog, CollectionCounts};
pub use config::StoreConfig;
pub use document::{Document, DEFAULT_SCHEMA_VERSION};
pub use error::{StoreError, StoreResult};
pub use fs::{FsStorage, StagedWrite};
pub use memory::InMemoryStorage;
pub use models::{
    CartModel, EntityModel, OrderModel, OrderSearch, ProductModel, ProductSearch, UserModel,
};
pub use query::SearchCriteria;
pub use store::JsonStore;
pub use traits::DocumentStorage;
