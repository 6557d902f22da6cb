use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::record::{Record, RecordMeta};
use crate::validate::{non_blank, non_negative, required_text};

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    /// Stock after applying `delta`, or an error if it would go negative.
    pub fn stock_after(&self, delta: i64) -> ValidationResult<u32> {
        let next = i64::from(self.stock)
            .checked_add(delta)
            .ok_or_else(|| ValidationError::invalid("stock", "exceeds maximum"))?;
        if next < 0 {
            return Err(ValidationError::invalid(
                "stock",
                format!(
                    "cannot remove {} units, only {} in stock",
                    delta.unsigned_abs(),
                    self.stock
                ),
            ));
        }
        u32::try_from(next).map_err(|_| ValidationError::invalid("stock", "exceeds maximum"))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: Option<u32>,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_draft(meta: RecordMeta, draft: ProductDraft) -> ValidationResult<Self> {
        let name = required_text("name", draft.name)?;
        let price = draft.price.ok_or_else(|| ValidationError::missing("price"))?;
        non_negative("price", price)?;
        let category = required_text("category", draft.category)?;
        Ok(Self {
            meta,
            name,
            price,
            category,
            description: draft.description,
            stock: draft.stock.unwrap_or(0),
        })
    }

    fn apply_patch(&mut self, patch: ProductPatch) -> ValidationResult<()> {
        if let Some(name) = &patch.name {
            non_blank("name", name)?;
        }
        if let Some(price) = patch.price {
            non_negative("price", price)?;
        }
        if let Some(category) = &patch.category {
            non_blank("category", category)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::from_draft(
            RecordMeta::stamp(),
            ProductDraft {
                name: Some("Kettle".into()),
                price: Some(25.0),
                category: Some("kitchen".into()),
                stock: Some(3),
                ..ProductDraft::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn draft_requires_price() {
        let err = Product::from_draft(
            RecordMeta::stamp(),
            ProductDraft {
                name: Some("Kettle".into()),
                category: Some("kitchen".into()),
                ..ProductDraft::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::missing("price"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut p = product();
        let err = p
            .apply_patch(ProductPatch {
                price: Some(-1.0),
                ..ProductPatch::default()
            })
            .unwrap_err();
        assert_eq!(err.field(), "price");
        assert_eq!(p.price, 25.0);
    }

    #[test]
    fn stock_after_guards_underflow() {
        let p = product();
        assert_eq!(p.stock_after(2).unwrap(), 5);
        assert_eq!(p.stock_after(-3).unwrap(), 0);
        assert!(p.stock_after(-4).is_err());
    }

    #[test]
    fn stock_after_survives_extreme_deltas() {
        let p = product();
        let err = p.stock_after(i64::MAX).unwrap_err();
        assert_eq!(err.field(), "stock");
        assert!(err.to_string().contains("exceeds maximum"));

        let mut empty = product();
        empty.stock = 0;
        let err = empty.stock_after(i64::MIN).unwrap_err();
        assert!(err.to_string().contains("cannot remove 9223372036854775808 units"));
        assert!(p.stock_after(i64::MIN).is_err());
    }

    #[test]
    fn stock_defaults_to_zero_on_disk() {
        let mut value = serde_json::to_value(product()).unwrap();
        value.as_object_mut().unwrap().remove("stock");
        let back: Product = serde_json::from_value(value).unwrap();
        assert_eq!(back.stock, 0);
    }
}
