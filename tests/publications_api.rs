mod common;

use axum::http::StatusCode;
use common::{AUTHOR_ID, MockAuthorsService};
use publications_service::authors_service::HttpAuthorClient;
use publications_service::http::{AppState, HttpServer, HttpServerConfig};
use publications_service::service::PublicationService;
use publications_service::sqlite::Sqlite;
use reqwest::Client;
use serde_json::{Value, json};

/// Starts the publications API on an ephemeral port and returns its `/api/v1` root.
async fn start_api(authors: &MockAuthorsService) -> String {
    let db = Sqlite::new("sqlite::memory:").await.unwrap();
    let author_client = HttpAuthorClient::new(Client::new(), authors.base_url.clone()).unwrap();
    let state = AppState::new(PublicationService::new(db, author_client));
    let server = HttpServer::new(state, HttpServerConfig::new(0))
        .await
        .unwrap();
    let port = server.local_addr().unwrap().port();
    tokio::spawn(server.run());
    format!("http://127.0.0.1:{port}/api/v1")
}

fn new_publication(author_id: &str) -> Value {
    json!({
        "title": "  Zero-cost abstractions ",
        "authorId": author_id,
        "summary": "Iterators compile down to loops",
        "content": "Long form content",
        "tipoPublicacion": "ARTICULO",
        "category": "Performance",
    })
}

async fn send(req: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let resp = req.send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn creates_draft_when_author_exists() {
    let authors = MockAuthorsService::answering(StatusCode::OK).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (status, body) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication(AUTHOR_ID)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["title"], "Zero-cost abstractions");
    assert_eq!(body["data"]["authorId"], AUTHOR_ID);
    assert_eq!(body["data"]["tipoPublicacion"], "ARTICULO");
    assert_eq!(body["data"]["status"], "DRAFT");
    assert_eq!(body["data"]["publishedAt"], Value::Null);
    assert_eq!(authors.requests(), vec![format!("/authors/{AUTHOR_ID}")]);
}

#[tokio::test]
async fn unknown_author_is_unprocessable() {
    let authors = MockAuthorsService::answering(StatusCode::NOT_FOUND).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (status, body) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication(AUTHOR_ID)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "status_code": 422,
            "data": format!("Author with id \"{AUTHOR_ID}\" does not exist"),
        })
    );

    let (_, listed) = send(http.get(format!("{api}/publications"))).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn failing_authors_service_is_bad_gateway() {
    let authors = MockAuthorsService::answering(StatusCode::SERVICE_UNAVAILABLE).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (status, body) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication(AUTHOR_ID)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "status_code": 502, "data": "Authors service unavailable" })
    );
}

#[tokio::test]
async fn malformed_author_id_skips_the_authors_service() {
    let authors = MockAuthorsService::answering(StatusCode::OK).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (status, body) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication("author-7")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "\"author-7\" is not a valid author id");
    assert!(authors.requests().is_empty());
}

#[tokio::test]
async fn publication_moves_through_editorial_workflow() {
    let authors = MockAuthorsService::answering(StatusCode::OK).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (_, created) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication(AUTHOR_ID)),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, found) = send(http.get(format!("{api}/publications/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"]["id"], id.as_str());

    let (status, published) = send(
        http.patch(format!("{api}/publications/{id}/status"))
            .query(&[("status", "PUBLISHED")]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["data"]["status"], "PUBLISHED");
    assert!(published["data"]["publishedAt"].is_string());

    let (status, listed) = send(http.get(format!("{api}/publications"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["data"][0]["status"], "PUBLISHED");
}

#[tokio::test]
async fn invalid_status_is_unprocessable() {
    let authors = MockAuthorsService::answering(StatusCode::OK).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (_, created) = send(
        http.post(format!("{api}/publications"))
            .json(&new_publication(AUTHOR_ID)),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        http.patch(format!("{api}/publications/{id}/status"))
            .query(&[("status", "ARCHIVED")]),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "status_code": 422, "data": "\"ARCHIVED\" is not a valid editorial status" })
    );
}

#[tokio::test]
async fn looking_up_publications_by_bad_or_unknown_id() {
    let authors = MockAuthorsService::answering(StatusCode::OK).await;
    let api = start_api(&authors).await;
    let http = Client::new();

    let (status, body) = send(http.get(format!("{api}/publications/not-a-uuid"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "\"not-a-uuid\" is not a valid publication id");

    let missing = "22222222-2222-2222-2222-222222222222";
    let (status, body) = send(http.get(format!("{api}/publications/{missing}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status_code": 404,
            "data": format!("Publication with id \"{missing}\" does not exist"),
        })
    );
}
