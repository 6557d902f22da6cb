use mockshop_types::{Cart, CartItem, CartStatus, EnumeratedStatus, RecordId};

use crate::error::StoreResult;
use crate::query::SearchCriteria;
use crate::store::JsonStore;

/// Carts collection (`carts.json`).
#[derive(Clone, Debug)]
pub struct CartModel {
    store: JsonStore<Cart>,
}

entity_model!(CartModel, Cart);

impl CartModel {
    /// The user's first active cart, if any.
    pub async fn get_cart_by_user_id(&self, user_id: &str) -> StoreResult<Option<Cart>> {
        let criteria = SearchCriteria::new()
            .field("userId", user_id)
            .field("status", CartStatus::Active.as_str());
        Ok(self.store.search(&criteria).await?.into_iter().next())
    }

    /// Add a line, accumulating quantity for a product already in the cart.
    pub async fn add_item(&self, cart_id: &RecordId, item: CartItem) -> StoreResult<Option<Cart>> {
        self.store
            .modify(cart_id, |cart| {
                item.validate("item")?;
                cart.add_item(item);
                Ok(())
            })
            .await
    }

    /// Remove the line for `product_id`; a product not in the cart is a no-op.
    pub async fn remove_item(&self, cart_id: &RecordId, product_id: &str) -> StoreResult<Option<Cart>> {
        self.store
            .modify(cart_id, |cart| {
                cart.remove_item(product_id);
                Ok(())
            })
            .await
    }

    pub async fn clear_cart(&self, cart_id: &RecordId) -> StoreResult<Option<Cart>> {
        self.store
            .modify(cart_id, |cart| {
                cart.items.clear();
                Ok(())
            })
            .await
    }

    pub async fn update_cart_status(&self, id: &RecordId, status: &str) -> StoreResult<Option<Cart>> {
        self.store.update_status(id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use mockshop_types::{CartDraft, Record};

    fn draft(user: &str) -> CartDraft {
        CartDraft {
            user_id: Some(user.into()),
            ..CartDraft::default()
        }
    }

    #[tokio::test]
    async fn cart_by_user_skips_checked_out_carts() {
        let carts = CartModel::in_memory();
        let old = carts.create(draft("u1")).await.unwrap();
        carts.update_cart_status(old.id(), "checkedOut").await.unwrap();
        assert!(carts.get_cart_by_user_id("u1").await.unwrap().is_none());

        let fresh = carts.create(draft("u1")).await.unwrap();
        let found = carts.get_cart_by_user_id("u1").await.unwrap().unwrap();
        assert_eq!(found.meta.id, fresh.meta.id);
    }

    #[tokio::test]
    async fn add_remove_clear_items() {
        let carts = CartModel::in_memory();
        let cart = carts.create(draft("u1")).await.unwrap();

        carts.add_item(cart.id(), CartItem::new("p1", 1)).await.unwrap();
        let cart_now = carts.add_item(cart.id(), CartItem::new("p1", 2)).await.unwrap().unwrap();
        assert_eq!(cart_now.items.len(), 1);
        assert_eq!(cart_now.items[0].quantity, 3);

        carts.add_item(cart.id(), CartItem::new("p2", 1)).await.unwrap();
        let cart_now = carts.remove_item(cart.id(), "p1").await.unwrap().unwrap();
        assert_eq!(cart_now.items.len(), 1);
        assert_eq!(cart_now.items[0].product_id, "p2");

        let cart_now = carts.clear_cart(cart.id()).await.unwrap().unwrap();
        assert!(cart_now.items.is_empty());
        assert!(cart_now.meta.updated_at > cart.meta.updated_at);
    }

    #[tokio::test]
    async fn add_invalid_item_is_rejected() {
        let carts = CartModel::in_memory();
        let cart = carts.create(draft("u1")).await.unwrap();
        let err = carts.add_item(cart.id(), CartItem::new("p1", 0)).await.unwrap_err();
        match err {
            StoreError::Validation(v) => assert_eq!(v.field(), "item.quantity"),
            other => panic!("unexpected error: {other}"),
        }
        let stored = carts.get_by_id(cart.id()).await.unwrap().unwrap();
        assert_eq!(stored, cart);
    }

    #[tokio::test]
    async fn item_ops_on_missing_cart_are_none() {
        let carts = CartModel::in_memory();
        let id = RecordId::generate();
        assert!(carts.add_item(&id, CartItem::new("p1", 1)).await.unwrap().is_none());
        assert!(carts.clear_cart(&id).await.unwrap().is_none());
    }
}
