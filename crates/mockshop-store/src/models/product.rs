use serde::Deserialize;

use mockshop_types::{Product, RecordId};

use crate::error::StoreResult;
use crate::query::SearchCriteria;
use crate::store::JsonStore;

/// Products collection (`products.json`).
#[derive(Clone, Debug)]
pub struct ProductModel {
    store: JsonStore<Product>,
}

entity_model!(ProductModel, Product);

/// Product search filters. Price bounds are inclusive.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearch {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductModel {
    pub async fn find_products_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
        self.store.get_by_field("category", &category).await
    }

    pub async fn search_products(&self, search: &ProductSearch) -> StoreResult<Vec<Product>> {
        let mut criteria = SearchCriteria::new();
        if let Some(category) = &search.category {
            criteria = criteria.field("category", category.as_str());
        }
        let products = self.store.search(&criteria).await?;
        Ok(products
            .into_iter()
            .filter(|p| search.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| search.max_price.map_or(true, |max| p.price <= max))
            .collect())
    }

    /// Add `delta` units to stock (negative to remove). Stock never goes
    /// below zero.
    pub async fn adjust_stock(&self, id: &RecordId, delta: i64) -> StoreResult<Option<Product>> {
        self.store
            .modify(id, |product| {
                product.stock = product.stock_after(delta)?;
                Ok(())
            })
            .await
    }
}
