use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, patch};
use axum::Router;
use serde::Deserialize;

use mockshop_store::{ProductModel, ProductSearch};
use mockshop_types::{Product, ValidationError};

use crate::error::{ServerError, ServerResult};
use crate::handler::{create, fetch, list, parse_id, remove, update};

pub fn router(model: ProductModel) -> Router {
    Router::new()
        .route("/", get(list::<ProductModel>).post(create::<ProductModel>))
        .route("/search", get(search))
        .route("/category/:category", get(by_category))
        .route(
            "/:id",
            get(fetch::<ProductModel>)
                .put(update::<ProductModel>)
                .delete(remove::<ProductModel>),
        )
        .route("/:id/stock", patch(adjust_stock))
        .with_state(Arc::new(model))
}

#[derive(Debug, Deserialize)]
struct StockBody {
    delta: Option<i64>,
}

async fn by_category(
    State(products): State<Arc<ProductModel>>,
    Path(category): Path<String>,
) -> ServerResult<Json<Vec<Product>>> {
    Ok(Json(products.find_products_by_category(&category).await?))
}

async fn search(
    State(products): State<Arc<ProductModel>>,
    Query(filters): Query<ProductSearch>,
) -> ServerResult<Json<Vec<Product>>> {
    Ok(Json(products.search_products(&filters).await?))
}

async fn adjust_stock(
    State(products): State<Arc<ProductModel>>,
    Path(id): Path<String>,
    Json(body): Json<StockBody>,
) -> ServerResult<Json<Product>> {
    let id = parse_id(&id)?;
    let delta = body.delta.ok_or_else(|| ValidationError::missing("delta"))?;
    products
        .adjust_stock(&id, delta)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("products", &id))
}
