use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use mockshop_store::Catalog;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Mockshop REST server.
pub struct MockshopServer {
    config: ServerConfig,
    catalog: Catalog,
}

impl MockshopServer {
    /// Server over the file-backed collections in `config.store`.
    pub fn new(config: ServerConfig) -> Self {
        let catalog = Catalog::open(&config.store);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: ServerConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(self.catalog.clone());
        if self.config.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Initialize every collection, then serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.catalog.ensure_initialized().await?;
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            data_dir = %self.config.store.data_dir.display(),
            "Mockshop server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
