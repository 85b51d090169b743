mod handler;

use crate::client::AuthorClient;
use crate::service::PublicationService;
use crate::store::PublicationRepository;
use anyhow::Context;
use axum::Router;
use axum::routing::{get, patch};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub struct AppState<PR, AC> {
    publication_service: Arc<PublicationService<PR, AC>>,
}

impl<PR: PublicationRepository, AC: AuthorClient> AppState<PR, AC> {
    pub fn new(publication_service: PublicationService<PR, AC>) -> Self {
        Self {
            publication_service: Arc::new(publication_service),
        }
    }
}

impl<PR, AC> Clone for AppState<PR, AC> {
    fn clone(&self) -> Self {
        Self {
            publication_service: Arc::clone(&self.publication_service),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: String,
}

impl HttpServerConfig {
    pub fn new(port: u16) -> Self {
        Self {
            port: port.to_string(),
        }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<PR: PublicationRepository, AC: AuthorClient>(
        state: AppState<PR, AC>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = Router::new()
            .nest("/api/v1", api_routes::<PR, AC>())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

fn api_routes<PR: PublicationRepository, AC: AuthorClient>() -> Router<AppState<PR, AC>> {
    Router::new()
        .route(
            "/publications",
            get(handler::list_publications::<PR, AC>).post(handler::create_publication::<PR, AC>),
        )
        .route("/publications/{id}", get(handler::find_publication::<PR, AC>))
        .route(
            "/publications/{id}/status",
            patch(handler::change_status::<PR, AC>),
        )
}
