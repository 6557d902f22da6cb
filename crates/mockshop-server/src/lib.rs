//! HTTP server for Mockshop.
//!
//! Exposes the users, orders, carts and products collections as JSON REST
//! resources under `/api`, plus `/v1/health` and `/v1/info`. Store faults
//! are mapped to status codes by [`ServerError`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::MockshopServer;
