use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use trilium_blog::upstream::{NoteApi, TriliumClient, UpstreamError};
use trilium_blog_config::UpstreamConfig;

const TOKEN: &str = "etapi-token-123";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: Option<String>,
    authorization: Option<String>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

async fn record(State(log): State<Log>, request: Request) -> Request {
    log.lock().unwrap().push(Seen {
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    request
}

async fn search() -> Json<serde_json::Value> {
    Json(json!({
        "results": [
            {
                "noteId": "n1",
                "title": "First",
                "type": "text",
                "mime": "text/html",
                "dateModified": "2024-01-01 00:00:00.000+0000",
                "attributes": [{"type": "label", "name": "blog", "value": "true"}]
            }
        ]
    }))
}

async fn note(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "n1" => Json(json!({"noteId": "n1", "title": "First", "type": "text"})).into_response(),
        "garbled" => "{not json".into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "no such note"}))).into_response(),
    }
}

async fn note_content(Path(id): Path<String>) -> Response {
    if id == "n1" {
        "<p>Hello</p>".into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn attachment(Path(id): Path<String>) -> Response {
    Json(json!({"attachmentId": id, "ownerId": "n1", "mime": "image/png"})).into_response()
}

async fn attachment_content(Path(id): Path<String>) -> Response {
    if id == "att1" {
        vec![0u8, 1, 2, 255].into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn redirected() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_server(api_path: &str) -> (String, Log) {
    let log: Log = Arc::default();
    let api = Router::new()
        .route("/notes", get(search))
        .route("/notes/{id}", get(note))
        .route("/notes/{id}/content", get(note_content))
        .route("/attachments/{id}", get(attachment))
        .route("/attachments/{id}/content", get(attachment_content))
        .route("/attachments/empty/content", get(redirected));

    let app = Router::new()
        .nest(&format!("/{api_path}"), api)
        .layer(axum::middleware::map_request_with_state(log.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

fn client(api_url: String, api_path: &str) -> TriliumClient {
    TriliumClient::new(UpstreamConfig {
        api_url,
        api_path: api_path.to_string(),
        token: TOKEN.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_search_sends_token_and_blog_query() {
    let (url, log) = spawn_server("etapi").await;
    let client = client(url, "etapi");

    let notes = client.search_blog_notes().await.unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].note_id, "n1");
    assert!(notes[0].is_publishable());

    let seen = log.lock().unwrap()[0].clone();
    assert_eq!(seen.path, "/etapi/notes");
    assert_eq!(
        seen.query.as_deref(),
        Some("search=%23blog%3Dtrue&orderBy=utcDateModified")
    );
    assert_eq!(seen.authorization.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_note_and_content() {
    let (url, log) = spawn_server("api").await;
    let client = client(url, "api");

    let note = client.get_note("n1").await.unwrap();
    let content = client.get_note_content("n1").await.unwrap();

    assert_eq!(note.title, "First");
    assert!(note.attributes.is_empty());
    assert_eq!(content, b"<p>Hello</p>");

    let paths: Vec<String> = log.lock().unwrap().iter().map(|s| s.path.clone()).collect();
    assert_eq!(paths, vec!["/api/notes/n1", "/api/notes/n1/content"]);
}

#[tokio::test]
async fn test_attachment_detail_and_content() {
    let (url, _) = spawn_server("api").await;
    let client = client(url, "api");

    let detail = client.get_attachment("att1").await.unwrap();
    let content = client.get_attachment_content("att1").await.unwrap();

    assert_eq!(detail.owner_id, "n1");
    assert_eq!(detail.mime, "image/png");
    assert_eq!(content, vec![0, 1, 2, 255]);
}

#[tokio::test]
async fn test_non_200_is_status_error() {
    let (url, _) = spawn_server("api").await;
    let client = client(url, "api");

    let err = client.get_note("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    // Any success other than 200 counts as a failure too.
    let err = client.get_attachment_content("empty").await.unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let (url, _) = spawn_server("api").await;
    let client = client(url, "api");

    let err = client.get_note("garbled").await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{addr}"), "api");
    let err = client.search_blog_notes().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Unavailable { .. }), "{err:?}");
}

#[tokio::test]
async fn test_ids_stay_inside_their_segment() {
    let (url, log) = spawn_server("api").await;
    let client = client(url, "api");

    let err = client.get_note("../attachments/a1").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = client
        .get_attachment_content("../../notes/n1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));

    let paths: Vec<String> = log.lock().unwrap().iter().map(|s| s.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            "/api/notes/..%2Fattachments%2Fa1",
            "/api/attachments/..%2F..%2Fnotes%2Fn1/content",
        ]
    );
}

#[tokio::test]
async fn test_dot_segment_ids_are_refused() {
    let (url, log) = spawn_server("api").await;
    let client = client(url, "api");

    for id in ["", ".", ".."] {
        let err = client.get_note(id).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidId { .. }), "{id:?}: {err:?}");
        let err = client.get_attachment_content(id).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidId { .. }), "{id:?}: {err:?}");
    }

    assert!(log.lock().unwrap().is_empty());
}
