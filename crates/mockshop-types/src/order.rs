use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{ValidationError, ValidationResult};
use crate::record::{Record, RecordMeta, StatusRecord};
use crate::status::{EnumeratedStatus, OrderStatus};
use crate::validate::{non_blank, non_negative, positive_quantity, required_text};

/// One line of an order. `productId` is a soft reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A placed order. `userId` is a soft reference to a user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Order creation input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub shipping_address: Option<Address>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Partial order update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub user_id: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub shipping_address: Option<Address>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Check every line and return the order total.
fn validate_items(items: &[OrderItem]) -> ValidationResult<f64> {
    if items.is_empty() {
        return Err(ValidationError::missing("items"));
    }
    for (i, item) in items.iter().enumerate() {
        non_blank(&format!("items[{i}].productId"), &item.product_id)?;
        non_negative(&format!("items[{i}].price"), item.price)?;
        positive_quantity(&format!("items[{i}].quantity"), item.quantity)?;
    }
    let total: f64 = items.iter().map(OrderItem::line_total).sum();
    if !total.is_finite() {
        return Err(ValidationError::invalid("totalAmount", "order total is out of range"));
    }
    Ok(total)
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";
    type Draft = OrderDraft;
    type Patch = OrderPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_draft(meta: RecordMeta, draft: OrderDraft) -> ValidationResult<Self> {
        let user_id = required_text("userId", draft.user_id)?;
        let items = draft.items.unwrap_or_default();
        let total_amount = validate_items(&items)?;
        let shipping_address = draft
            .shipping_address
            .ok_or_else(|| ValidationError::missing("shippingAddress"))?;
        shipping_address.validate("shippingAddress")?;
        let status = match draft.status.as_deref() {
            Some(raw) => OrderStatus::parse("status", raw)?,
            None => OrderStatus::default(),
        };

        Ok(Self {
            meta,
            user_id,
            total_amount,
            items,
            shipping_address,
            status,
            payment_method: draft.payment_method,
            notes: draft.notes,
        })
    }

    fn apply_patch(&mut self, patch: OrderPatch) -> ValidationResult<()> {
        if let Some(user_id) = &patch.user_id {
            non_blank("userId", user_id)?;
        }
        let total_amount = patch.items.as_deref().map(validate_items).transpose()?;
        if let Some(address) = &patch.shipping_address {
            address.validate("shippingAddress")?;
        }
        let status = patch
            .status
            .as_deref()
            .map(|raw| OrderStatus::parse("status", raw))
            .transpose()?;

        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let (Some(items), Some(total_amount)) = (patch.items, total_amount) {
            self.total_amount = total_amount;
            self.items = items;
        }
        if let Some(address) = patch.shipping_address {
            self.shipping_address = address;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if patch.payment_method.is_some() {
            self.payment_method = patch.payment_method;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        Ok(())
    }
}

impl StatusRecord for Order {
    fn status_patch(status: &str) -> OrderPatch {
        OrderPatch {
            status: Some(status.to_string()),
            ..OrderPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            user_id: Some("u1".into()),
            items: Some(vec![OrderItem::new("p1", "P", 10.0, 2)]),
            shipping_address: Some(Address::new("S", "C")),
            ..OrderDraft::default()
        }
    }

    #[test]
    fn draft_defaults_to_pending_and_computes_total() {
        let order = Order::from_draft(RecordMeta::stamp(), draft()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 20.0);
    }

    #[test]
    fn draft_requires_user_id() {
        let mut d = draft();
        d.user_id = None;
        let err = Order::from_draft(RecordMeta::stamp(), d).unwrap_err();
        assert_eq!(err, ValidationError::missing("userId"));
    }

    #[test]
    fn draft_requires_non_empty_items() {
        let mut d = draft();
        d.items = Some(vec![]);
        let err = Order::from_draft(RecordMeta::stamp(), d).unwrap_err();
        assert_eq!(err.field(), "items");
    }

    #[test]
    fn draft_requires_shipping_address() {
        let mut d = draft();
        d.shipping_address = None;
        let err = Order::from_draft(RecordMeta::stamp(), d).unwrap_err();
        assert_eq!(err.field(), "shippingAddress");
    }

    #[test]
    fn draft_rejects_zero_quantity() {
        let mut d = draft();
        d.items = Some(vec![OrderItem::new("p1", "P", 1.0, 0)]);
        let err = Order::from_draft(RecordMeta::stamp(), d).unwrap_err();
        assert_eq!(err.field(), "items[0].quantity");
    }

    #[test]
    fn patch_with_bad_status_leaves_order_untouched() {
        let mut order = Order::from_draft(RecordMeta::stamp(), draft()).unwrap();
        let before = order.clone();
        let patch = OrderPatch {
            notes: Some("leave at door".into()),
            status: Some("bogus".into()),
            ..OrderPatch::default()
        };
        assert!(order.apply_patch(patch).is_err());
        assert_eq!(order, before);
    }

    #[test]
    fn patch_items_recomputes_total() {
        let mut order = Order::from_draft(RecordMeta::stamp(), draft()).unwrap();
        let patch = OrderPatch {
            items: Some(vec![OrderItem::new("p2", "Q", 2.5, 4)]),
            ..OrderPatch::default()
        };
        order.apply_patch(patch).unwrap();
        assert_eq!(order.total_amount, 10.0);
        assert_eq!(order.user_id, "u1");
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let mut d = draft();
        d.items = Some(vec![OrderItem::new("p1", "P", 1e308, 10)]);
        let err = Order::from_draft(RecordMeta::stamp(), d).unwrap_err();
        assert_eq!(err.field(), "totalAmount");

        let mut order = Order::from_draft(RecordMeta::stamp(), draft()).unwrap();
        let before = order.clone();
        let patch = OrderPatch {
            items: Some(vec![
                OrderItem::new("p1", "P", f64::MAX, 1),
                OrderItem::new("p2", "Q", f64::MAX, 1),
            ]),
            ..OrderPatch::default()
        };
        assert_eq!(order.apply_patch(patch).unwrap_err().field(), "totalAmount");
        assert_eq!(order, before);
    }

    #[test]
    fn wire_shape_is_flat_and_camel_case() {
        let order = Order::from_draft(RecordMeta::stamp(), draft()).unwrap();
        let value = serde_json::to_value(&order).unwrap();
        for key in ["id", "createdAt", "updatedAt", "userId", "shippingAddress", "totalAmount"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["status"], "pending");
        assert!(value.get("notes").is_none());
        let back: Order = serde_json::from_value(value).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn draft_decodes_with_missing_fields() {
        let d: OrderDraft = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(d.user_id.is_none());
        assert_eq!(d.items.map(|i| i.len()), Some(0));
    }
}
