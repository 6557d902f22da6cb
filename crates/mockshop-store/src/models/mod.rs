//! Entity models: one [`JsonStore`] per collection plus the entity-specific
//! lookups controllers need.

use mockshop_types::Record;

use crate::store::JsonStore;

/// A model wrapping the store of one entity type.
pub trait EntityModel: Send + Sync + 'static {
    type Record: Record;

    fn store(&self) -> &JsonStore<Self::Record>;
}

/// Implements construction, [`EntityModel`] and the uniform CRUD contract
/// for a model struct with a single `store` field.
macro_rules! entity_model {
    ($model:ident, $record:ty) => {
        impl $model {
            pub fn new(store: $crate::store::JsonStore<$record>) -> Self {
                Self { store }
            }

            pub fn open(config: &$crate::config::StoreConfig) -> Self {
                Self::new($crate::store::JsonStore::open(config))
            }

            pub fn in_memory() -> Self {
                Self::new($crate::store::JsonStore::in_memory())
            }

            pub async fn ensure_initialized(&self) -> $crate::error::StoreResult<()> {
                self.store.ensure_initialized().await
            }

            pub async fn get_all(&self) -> $crate::error::StoreResult<Vec<$record>> {
                self.store.get_all().await
            }

            pub async fn get_by_id(
                &self,
                id: &mockshop_types::RecordId,
            ) -> $crate::error::StoreResult<Option<$record>> {
                self.store.get_by_id(id).await
            }

            pub async fn create(
                &self,
                draft: <$record as mockshop_types::Record>::Draft,
            ) -> $crate::error::StoreResult<$record> {
                self.store.create(draft).await
            }

            pub async fn update(
                &self,
                id: &mockshop_types::RecordId,
                patch: <$record as mockshop_types::Record>::Patch,
            ) -> $crate::error::StoreResult<Option<$record>> {
                self.store.update(id, patch).await
            }

            pub async fn delete(&self, id: &mockshop_types::RecordId) -> $crate::error::StoreResult<bool> {
                self.store.delete(id).await
            }
        }

        impl $crate::models::EntityModel for $model {
            type Record = $record;

            fn store(&self) -> &$crate::store::JsonStore<$record> {
                &self.store
            }
        }
    };
}

mod cart;
mod order;
mod product;
mod user;

pub use cart::CartModel;
pub use order::{OrderModel, OrderSearch};
pub use product::{ProductModel, ProductSearch};
pub use user::UserModel;
