use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::Deserialize;

use mockshop_store::CartModel;
use mockshop_types::{Cart, CartItem, ValidationError};

use crate::error::{ServerError, ServerResult};
use crate::handler::{create, fetch, list, parse_id, remove, update};

pub fn router(model: CartModel) -> Router {
    Router::new()
        .route("/", get(list::<CartModel>).post(create::<CartModel>))
        .route("/user/:user_id", get(by_user))
        .route(
            "/:id",
            get(fetch::<CartModel>)
                .put(update::<CartModel>)
                .delete(remove::<CartModel>),
        )
        .route("/:id/items", post(add_item).delete(clear))
        .route("/:id/items/:product_id", delete(remove_item))
        .with_state(Arc::new(model))
}

/// Body of `POST /:id/items`. Quantity defaults to one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemBody {
    product_id: Option<String>,
    quantity: Option<u32>,
    price: Option<f64>,
}

impl ItemBody {
    fn into_item(self) -> Result<CartItem, ValidationError> {
        let product_id = self
            .product_id
            .ok_or_else(|| ValidationError::missing("item.productId"))?;
        Ok(CartItem {
            product_id,
            quantity: self.quantity.unwrap_or(1),
            price: self.price,
        })
    }
}

async fn by_user(
    State(carts): State<Arc<CartModel>>,
    Path(user_id): Path<String>,
) -> ServerResult<Json<Cart>> {
    carts
        .get_cart_by_user_id(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("carts", format!("active cart for user {user_id}")))
}

async fn add_item(
    State(carts): State<Arc<CartModel>>,
    Path(id): Path<String>,
    Json(body): Json<ItemBody>,
) -> ServerResult<Json<Cart>> {
    let id = parse_id(&id)?;
    let item = body.into_item()?;
    carts
        .add_item(&id, item)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("carts", &id))
}

async fn remove_item(
    State(carts): State<Arc<CartModel>>,
    Path((id, product_id)): Path<(String, String)>,
) -> ServerResult<Json<Cart>> {
    let id = parse_id(&id)?;
    carts
        .remove_item(&id, &product_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("carts", &id))
}

async fn clear(
    State(carts): State<Arc<CartModel>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Cart>> {
    let id = parse_id(&id)?;
    carts
        .clear_cart(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("carts", &id))
}
