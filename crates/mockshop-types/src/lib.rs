//! Foundation types for Mockshop.
//!
//! This crate provides the record identity, timestamp, and entity types used
//! by the store and the REST layer. Every other Mockshop crate depends on
//! `mockshop-types`.
//!
//! # Key Types
//!
//! - [`RecordId`] -- Collection-unique record identifier (UUID v7 for new records)
//! - [`RecordMeta`] -- `id`, `createdAt`, `updatedAt` shared by every record
//! - [`Record`] -- Entity hook trait (collection name, draft validation, patch merge)
//! - [`User`], [`Order`], [`Cart`], [`Product`] -- The four entity records
//! - [`ValidationError`] -- Domain invariant violations, naming the field

pub mod address;
pub mod cart;
pub mod error;
pub mod order;
pub mod product;
pub mod record;
pub mod status;
pub mod user;
mod validate;

pub use address::Address;
pub use cart::{Cart, CartDraft, CartItem, CartPatch};
pub use error::{TypeError, ValidationError, ValidationResult};
pub use order::{Order, OrderDraft, OrderItem, OrderPatch};
pub use product::{Product, ProductDraft, ProductPatch};
pub use record::{parse_timestamp, Record, RecordId, RecordMeta, StatusRecord};
pub use status::{CartStatus, EnumeratedStatus, OrderStatus, UserRole};
pub use user::{User, UserDraft, UserPatch};
