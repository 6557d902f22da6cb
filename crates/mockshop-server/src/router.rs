use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use mockshop_store::Catalog;

use crate::handler;
use crate::routes::{carts, orders, products, users};

/// Build the axum router with all Mockshop endpoints.
pub fn build_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .nest("/api/users", users::router(catalog.users))
        .nest("/api/orders", orders::router(catalog.orders))
        .nest("/api/carts", carts::router(catalog.carts))
        .nest("/api/products", products::router(catalog.products))
        .layer(TraceLayer::new_for_http())
}
