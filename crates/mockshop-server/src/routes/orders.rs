use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, patch};
use axum::Router;
use serde::Deserialize;

use mockshop_store::{OrderModel, OrderSearch};
use mockshop_types::{Order, OrderStatus, ValidationError};

use crate::error::{ServerError, ServerResult};
use crate::handler::{create, fetch, list, parse_id, remove, update};

pub fn router(model: OrderModel) -> Router {
    Router::new()
        .route("/", get(list::<OrderModel>).post(create::<OrderModel>))
        .route("/search", get(search))
        .route("/stats/status", get(status_counts))
        .route("/user/:user_id", get(by_user))
        .route(
            "/:id",
            get(fetch::<OrderModel>)
                .put(update::<OrderModel>)
                .delete(remove::<OrderModel>),
        )
        .route("/:id/status", patch(set_status))
        .with_state(Arc::new(model))
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: Option<String>,
}

async fn by_user(
    State(orders): State<Arc<OrderModel>>,
    Path(user_id): Path<String>,
) -> ServerResult<Json<Vec<Order>>> {
    Ok(Json(orders.get_orders_by_user_id(&user_id).await?))
}

async fn set_status(
    State(orders): State<Arc<OrderModel>>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> ServerResult<Json<Order>> {
    let id = parse_id(&id)?;
    let status = body.status.ok_or_else(|| ValidationError::missing("status"))?;
    orders
        .update_order_status(&id, &status)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("orders", &id))
}

async fn search(
    State(orders): State<Arc<OrderModel>>,
    Query(filters): Query<OrderSearch>,
) -> ServerResult<Json<Vec<Order>>> {
    Ok(Json(orders.search_orders(&filters).await?))
}

async fn status_counts(
    State(orders): State<Arc<OrderModel>>,
) -> ServerResult<Json<BTreeMap<OrderStatus, usize>>> {
    Ok(Json(orders.count_orders_by_status().await?))
}
