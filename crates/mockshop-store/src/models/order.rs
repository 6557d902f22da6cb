use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use mockshop_types::{EnumeratedStatus, Order, OrderStatus, RecordId};

use crate::error::StoreResult;
use crate::query::SearchCriteria;
use crate::store::JsonStore;

/// Orders collection (`orders.json`).
#[derive(Clone, Debug)]
pub struct OrderModel {
    store: JsonStore<Order>,
}

entity_model!(OrderModel, Order);

/// Order search filters; absent filters are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearch {
    pub user_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl OrderSearch {
    pub fn to_criteria(&self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new();
        if let Some(user_id) = &self.user_id {
            criteria = criteria.field("userId", user_id.as_str());
        }
        if let Some(status) = self.status {
            criteria = criteria.field("status", status.as_str());
        }
        criteria.created_from = self.start_date;
        criteria.created_to = self.end_date;
        criteria
    }
}

impl OrderModel {
    pub async fn get_orders_by_user_id(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        self.store.get_by_field("userId", &user_id).await
    }

    pub async fn update_order_status(&self, id: &RecordId, status: &str) -> StoreResult<Option<Order>> {
        self.store.update_status(id, status).await
    }

    pub async fn search_orders(&self, search: &OrderSearch) -> StoreResult<Vec<Order>> {
        self.store.search(&search.to_criteria()).await
    }

    /// Number of orders in every status, including statuses with none.
    pub async fn count_orders_by_status(&self) -> StoreResult<BTreeMap<OrderStatus, usize>> {
        self.store.count_by_field("status", OrderStatus::ALL).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use mockshop_types::{Address, OrderDraft, OrderItem, Record};

    fn draft(user: &str) -> OrderDraft {
        OrderDraft {
            user_id: Some(user.into()),
            items: Some(vec![OrderItem::new("p1", "P", 10.0, 2)]),
            shipping_address: Some(Address::new("S", "C")),
            ..OrderDraft::default()
        }
    }

    #[tokio::test]
    async fn orders_by_user() {
        let orders = OrderModel::in_memory();
        orders.create(draft("u1")).await.unwrap();
        orders.create(draft("u2")).await.unwrap();
        orders.create(draft("u1")).await.unwrap();
        let mine = orders.get_orders_by_user_id("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.user_id == "u1"));
    }

    #[tokio::test]
    async fn update_order_status_validates() {
        let orders = OrderModel::in_memory();
        let o = orders.create(draft("u1")).await.unwrap();
        let err = orders.update_order_status(o.id(), "lost").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let shipped = orders.update_order_status(o.id(), "shipped").await.unwrap().unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert!(orders
            .update_order_status(&RecordId::generate(), "shipped")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn count_covers_every_status() {
        let orders = OrderModel::in_memory();
        let empty = orders.count_orders_by_status().await.unwrap();
        assert_eq!(empty.len(), OrderStatus::ALL.len());
        assert!(empty.values().all(|&n| n == 0));

        let o = orders.create(draft("u1")).await.unwrap();
        orders.create(draft("u2")).await.unwrap();
        orders.update_order_status(o.id(), "cancelled").await.unwrap();
        let counts = orders.count_orders_by_status().await.unwrap();
        assert_eq!(counts[&OrderStatus::Pending], 1);
        assert_eq!(counts[&OrderStatus::Cancelled], 1);
        assert_eq!(counts[&OrderStatus::Delivered], 0);
    }

    #[tokio::test]
    async fn search_by_status_and_dates() {
        let orders = OrderModel::in_memory();
        let a = orders.create(draft("u1")).await.unwrap();
        let b = orders.create(draft("u1")).await.unwrap();
        orders.update_order_status(b.id(), "processing").await.unwrap();

        let pending = OrderSearch {
            user_id: Some("u1".into()),
            status: Some(OrderStatus::Pending),
            ..OrderSearch::default()
        };
        let hits = orders.search_orders(&pending).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].meta.id, a.meta.id);

        let window = OrderSearch {
            start_date: Some(b.meta.created_at),
            end_date: Some(b.meta.created_at),
            ..OrderSearch::default()
        };
        let hits = orders.search_orders(&window).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].meta.id, b.meta.id);
    }

    #[test]
    fn search_decodes_from_query_shape() {
        let s: OrderSearch = serde_json::from_str(
            r#"{"userId":"u1","status":"shipped","startDate":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let c = s.to_criteria();
        assert_eq!(c.fields.len(), 2);
        assert!(c.created_from.is_some());
        assert!(c.created_to.is_none());
    }
}
