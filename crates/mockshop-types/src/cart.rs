use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::record::{Record, RecordMeta, StatusRecord};
use crate::status::{CartStatus, EnumeratedStatus};
use crate::validate::{non_blank, non_negative, positive_quantity, required_text};

/// One product line in a cart. `productId` is a soft reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            price: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn validate(&self, prefix: &str) -> ValidationResult<()> {
        non_blank(&format!("{prefix}.productId"), &self.product_id)?;
        positive_quantity(&format!("{prefix}.quantity"), self.quantity)?;
        if let Some(price) = self.price {
            non_negative(&format!("{prefix}.price"), price)?;
        }
        Ok(())
    }
}

/// A user's shopping cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub status: CartStatus,
}

impl Cart {
    /// Add `item`, accumulating quantity onto an existing line for the same
    /// product. A supplied price replaces the line's price.
    pub fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(item.quantity);
                if item.price.is_some() {
                    line.price = item.price;
                }
            }
            None => self.items.push(item),
        }
    }

    /// Remove the line for `product_id`. Returns `true` if a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        self.items.len() != before
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDraft {
    pub user_id: Option<String>,
    pub items: Option<Vec<CartItem>>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPatch {
    pub user_id: Option<String>,
    pub items: Option<Vec<CartItem>>,
    pub status: Option<String>,
}

fn validate_items(items: &[CartItem]) -> ValidationResult<()> {
    for (i, item) in items.iter().enumerate() {
        item.validate(&format!("items[{i}]"))?;
    }
    Ok(())
}

impl Record for Cart {
    const COLLECTION: &'static str = "carts";
    type Draft = CartDraft;
    type Patch = CartPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_draft(meta: RecordMeta, draft: CartDraft) -> ValidationResult<Self> {
        let user_id = required_text("userId", draft.user_id)?;
        let items = draft.items.unwrap_or_default();
        validate_items(&items)?;
        let status = match draft.status.as_deref() {
            Some(raw) => CartStatus::parse("status", raw)?,
            None => CartStatus::default(),
        };
        Ok(Self {
            meta,
            user_id,
            items,
            status,
        })
    }

    fn apply_patch(&mut self, patch: CartPatch) -> ValidationResult<()> {
        if let Some(user_id) = &patch.user_id {
            non_blank("userId", user_id)?;
        }
        if let Some(items) = &patch.items {
            validate_items(items)?;
        }
        let status = patch
            .status
            .as_deref()
            .map(|raw| CartStatus::parse("status", raw))
            .transpose()?;

        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(status) = status {
            self.status = status;
        }
        Ok(())
    }
}

impl StatusRecord for Cart {
    fn status_patch(status: &str) -> CartPatch {
        CartPatch {
            status: Some(status.to_string()),
            ..CartPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::from_draft(
            RecordMeta::stamp(),
            CartDraft {
                user_id: Some("u1".into()),
                ..CartDraft::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn draft_defaults_to_active_and_empty() {
        let c = cart();
        assert_eq!(c.status, CartStatus::Active);
        assert!(c.items.is_empty());
    }

    #[test]
    fn add_item_accumulates_quantity() {
        let mut c = cart();
        c.add_item(CartItem::new("p1", 1));
        c.add_item(CartItem::new("p1", 2).with_price(3.0));
        c.add_item(CartItem::new("p2", 1));
        assert_eq!(c.items.len(), 2);
        assert_eq!(c.items[0].quantity, 3);
        assert_eq!(c.items[0].price, Some(3.0));
    }

    #[test]
    fn remove_item_reports_presence() {
        let mut c = cart();
        c.add_item(CartItem::new("p1", 1));
        assert!(c.remove_item("p1"));
        assert!(!c.remove_item("p1"));
    }

    #[test]
    fn status_patch_is_validated() {
        let mut c = cart();
        assert!(c.apply_patch(Cart::status_patch("gone")).is_err());
        c.apply_patch(Cart::status_patch("checkedOut")).unwrap();
        assert_eq!(c.status, CartStatus::CheckedOut);
    }

    #[test]
    fn item_validation_names_index() {
        let err = Cart::from_draft(
            RecordMeta::stamp(),
            CartDraft {
                user_id: Some("u1".into()),
                items: Some(vec![CartItem::new("p1", 1), CartItem::new("", 1)]),
                status: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.field(), "items[1].productId");
    }
}
