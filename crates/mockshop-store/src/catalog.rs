use tracing::info;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::models::{CartModel, OrderModel, ProductModel, UserModel};

/// The four entity models over one data directory.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub users: UserModel,
    pub orders: OrderModel,
    pub carts: CartModel,
    pub products: ProductModel,
}

/// Record counts per collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionCounts {
    pub users: usize,
    pub orders: usize,
    pub carts: usize,
    pub products: usize,
}

impl Catalog {
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            users: UserModel::open(config),
            orders: OrderModel::open(config),
            carts: CartModel::open(config),
            products: ProductModel::open(config),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: UserModel::in_memory(),
            orders: OrderModel::in_memory(),
            carts: CartModel::in_memory(),
            products: ProductModel::in_memory(),
        }
    }

    /// Initialize every collection document.
    pub async fn ensure_initialized(&self) -> StoreResult<()> {
        self.users.ensure_initialized().await?;
        self.orders.ensure_initialized().await?;
        self.carts.ensure_initialized().await?;
        self.products.ensure_initialized().await?;
        info!("all collections initialized");
        Ok(())
    }

    pub async fn counts(&self) -> StoreResult<CollectionCounts> {
        Ok(CollectionCounts {
            users: self.users.get_all().await?.len(),
            orders: self.orders.get_all().await?.len(),
            carts: self.carts.get_all().await?.len(),
            products: self.products.get_all().await?.len(),
        })
    }
}
