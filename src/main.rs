use publications_service::authors_service::HttpAuthorClient;
use publications_service::config::Config;
use publications_service::http::{AppState, HttpServer, HttpServerConfig};
use publications_service::service::PublicationService;
use publications_service::sqlite::Sqlite;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let sqlite = Sqlite::new(config.database_url()).await?;
    let author_client =
        HttpAuthorClient::new(reqwest::Client::new(), config.authors_service_url().clone())?;
    let state = AppState::new(PublicationService::new(sqlite, author_client));
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
