//! Health endpoints and the CRUD handlers shared by every resource.
//!
//! The CRUD handlers are generic over [`EntityModel`]; each resource router
//! instantiates them for its own model type.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use mockshop_store::EntityModel;
use mockshop_types::{Cart, Order, Product, Record, RecordId, User};

use crate::error::{ServerError, ServerResult};

type Draft<M> = <<M as EntityModel>::Record as Record>::Draft;
type Patch<M> = <<M as EntityModel>::Record as Record>::Patch;

/// Parse an `:id` path segment.
pub fn parse_id(raw: &str) -> ServerResult<RecordId> {
    Ok(RecordId::parse(raw)?)
}

fn collection<M: EntityModel>() -> &'static str {
    <M::Record as Record>::COLLECTION
}

/// Liveness check.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "mockshop-server",
        "version": env!("CARGO_PKG_VERSION"),
        "collections": [
            User::COLLECTION,
            Order::COLLECTION,
            Cart::COLLECTION,
            Product::COLLECTION,
        ],
    }))
}

pub async fn list<M: EntityModel>(
    State(model): State<Arc<M>>,
) -> ServerResult<Json<Vec<M::Record>>> {
    Ok(Json(model.store().get_all().await?))
}

pub async fn fetch<M: EntityModel>(
    State(model): State<Arc<M>>,
    Path(id): Path<String>,
) -> ServerResult<Json<M::Record>> {
    let id = parse_id(&id)?;
    model
        .store()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(collection::<M>(), &id))
}

pub async fn create<M: EntityModel>(
    State(model): State<Arc<M>>,
    Json(draft): Json<Draft<M>>,
) -> ServerResult<(StatusCode, Json<M::Record>)> {
    let record = model.store().create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<M: EntityModel>(
    State(model): State<Arc<M>>,
    Path(id): Path<String>,
    Json(patch): Json<Patch<M>>,
) -> ServerResult<Json<M::Record>> {
    let id = parse_id(&id)?;
    model
        .store()
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found(collection::<M>(), &id))
}

pub async fn remove<M: EntityModel>(
    State(model): State<Arc<M>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = parse_id(&id)?;
    if model.store().delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::not_found(collection::<M>(), &id))
    }
}
