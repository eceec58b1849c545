//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on a listener until shutdown
//! - Apply config reloads (text catalog only)

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api;
use crate::config::ServiceConfig;
use crate::groups::MemberGroupRepository;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::localization::TextCatalog;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: MemberGroupRepository,
    pub texts: Arc<ArcSwap<TextCatalog>>,
}

impl AppState {
    pub fn new(repository: MemberGroupRepository, texts: TextCatalog) -> Self {
        Self {
            repository,
            texts: Arc::new(ArcSwap::from_pointee(texts)),
        }
    }

    /// Localize `key` with the current catalog.
    pub fn localize(&self, key: &str) -> String {
        self.texts.load().localize(key)
    }
}

/// HTTP server for the member groups API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/status", get(api::handlers::get_status))
            .nest(&config.http.base_path, api::member_group_routes())
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(propagate_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config updates replace the text catalog; other sections are ignored
    /// until restart. Returns once `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.http.base_path,
            "HTTP server starting"
        );

        let texts = self.state.texts.clone();
        let reload_task = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                let catalog = TextCatalog::from_config(&new_config.localization);
                tracing::info!(culture = %catalog.culture(), "Text catalog reloaded");
                texts.store(Arc::new(catalog));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reload_task.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
