mod common;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use common::{FakeNotes, article, count, get, setup_test_app};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

fn notes() -> FakeNotes {
    FakeNotes::default()
        .with_article(article("post", "text", true), "<p>post</p>")
        .with_article(article("private", "text", false), "<p>private</p>")
        .with_attachment("img1", "post", "image/png", PNG)
        .with_attachment("secret", "private", "image/png", PNG)
        .with_attachment("orphan", "gone", "image/png", PNG)
        .with_attachment("weird", "post", "not a\nmime", b"raw")
        .with_attachment("untyped", "post", "", b"raw")
}

#[tokio::test]
async fn test_attachment_served_with_mime_and_cache_headers() {
    let app = setup_test_app(Arc::new(notes()));

    let response = get(&app, "/attachments/img1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), PNG);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert!(response.headers.contains_key(header::ETAG));
}

#[tokio::test]
async fn test_attachment_available_under_api_prefix() {
    let app = setup_test_app(Arc::new(notes()));

    let response = get(&app, "/api/attachments/img1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), PNG);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_attachment_cached_after_first_fetch() {
    let notes = Arc::new(notes());
    let app = setup_test_app(notes.clone());

    get(&app, "/attachments/img1").await;
    get(&app, "/api/attachments/img1").await;

    assert_eq!(count(&notes.calls.attachment), 1);
    assert_eq!(count(&notes.calls.note), 1);
    assert_eq!(count(&notes.calls.attachment_content), 1);
}

#[tokio::test]
async fn test_attachment_of_unpublished_note_is_refused() {
    let notes = Arc::new(notes());
    let app = setup_test_app(notes.clone());

    let response = get(&app, "/attachments/secret").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Failed to fetch attachment");
    assert!(!response.headers.contains_key(header::CACHE_CONTROL));
    assert_eq!(count(&notes.calls.attachment_content), 0);
}

#[tokio::test]
async fn test_missing_attachment() {
    let notes = Arc::new(notes());
    let app = setup_test_app(notes.clone());

    let response = get(&app, "/attachments/nope").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Failed to fetch attachment");
    assert_eq!(count(&notes.calls.note), 0);
}

#[tokio::test]
async fn test_attachment_with_missing_owner() {
    let notes = Arc::new(notes());
    let app = setup_test_app(notes.clone());

    let response = get(&app, "/attachments/orphan").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count(&notes.calls.attachment_content), 0);
}

#[tokio::test]
async fn test_invalid_mime_falls_back_to_octet_stream() {
    let app = setup_test_app(Arc::new(notes()));

    let response = get(&app, "/attachments/weird").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(response.body.as_ref(), b"raw");
}

#[tokio::test]
async fn test_empty_mime_falls_back_to_octet_stream() {
    let app = setup_test_app(Arc::new(notes()));

    let response = get(&app, "/attachments/untyped").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}
