use axum::Router;
use axum::http::{StatusCode, Uri};
use reqwest::Url;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const AUTHOR_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Authors service stand-in answering every request with a fixed status.
pub struct MockAuthorsService {
    pub base_url: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockAuthorsService {
    pub async fn start(status: StatusCode, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let router = Router::new().fallback(move |uri: Uri| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(uri.to_string());
                tokio::time::sleep(delay).await;
                status
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            base_url: format!("http://{addr}").parse().unwrap(),
            requests,
        }
    }

    pub async fn answering(status: StatusCode) -> Self {
        Self::start(status, Duration::ZERO).await
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
