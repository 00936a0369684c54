use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use trilium_blog::router::init_router;
use trilium_blog::state::AppState;
use trilium_blog::upstream::{NoteApi, UpstreamError};
use trilium_blog_cache::{CacheLayer, FillLockPolicy, MemoryStore};
use trilium_blog_config::{BlogConfig, CorsConfig, ServerConfig};
use trilium_blog_models::{Article, AttachmentDetail, Attribute};

pub const DOMAIN: &str = "https://blog.example.com";
pub const PROXY: &str = "https://proxy.example/";
pub const PAGE_SIZE: usize = 2;

#[derive(Default)]
pub struct CallCounts {
    pub search: AtomicUsize,
    pub note: AtomicUsize,
    pub note_content: AtomicUsize,
    pub attachment: AtomicUsize,
    pub attachment_content: AtomicUsize,
}

#[allow(dead_code)]
pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// In-process stand-in for the note service.
#[derive(Default)]
pub struct FakeNotes {
    pub notes: Vec<Article>,
    pub contents: HashMap<String, Vec<u8>>,
    pub attachments: HashMap<String, (AttachmentDetail, Vec<u8>)>,
    pub failing_notes: Vec<String>,
    pub failing_contents: Vec<String>,
    pub fail_search: bool,
    pub delay: Option<Duration>,
    pub calls: CallCounts,
}

#[allow(dead_code)]
impl FakeNotes {
    pub fn with_article(mut self, article: Article, content: &str) -> Self {
        self.contents
            .insert(article.note_id.clone(), content.as_bytes().to_vec());
        self.notes.push(article);
        self
    }

    pub fn with_attachment(mut self, id: &str, owner_id: &str, mime: &str, content: &[u8]) -> Self {
        self.attachments.insert(
            id.to_string(),
            (
                AttachmentDetail {
                    owner_id: owner_id.to_string(),
                    mime: mime.to_string(),
                },
                content.to_vec(),
            ),
        );
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn status(code: u16, path: String) -> UpstreamError {
    UpstreamError::Status {
        status: code,
        url: format!("http://trilium.test/api/{path}"),
    }
}

#[async_trait]
impl NoteApi for FakeNotes {
    async fn search_blog_notes(&self) -> Result<Vec<Article>, UpstreamError> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_search {
            return Err(status(500, "notes".into()));
        }
        Ok(self.notes.clone())
    }

    async fn get_note(&self, note_id: &str) -> Result<Article, UpstreamError> {
        self.calls.note.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.failing_notes.iter().any(|id| id == note_id) {
            return Err(status(500, format!("notes/{note_id}")));
        }
        self.notes
            .iter()
            .find(|n| n.note_id == note_id)
            .cloned()
            .ok_or_else(|| status(404, format!("notes/{note_id}")))
    }

    async fn get_note_content(&self, note_id: &str) -> Result<Vec<u8>, UpstreamError> {
        self.calls.note_content.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.failing_contents.iter().any(|id| id == note_id) {
            return Err(status(502, format!("notes/{note_id}/content")));
        }
        self.contents
            .get(note_id)
            .cloned()
            .ok_or_else(|| status(404, format!("notes/{note_id}/content")))
    }

    async fn get_attachment(&self, attachment_id: &str) -> Result<AttachmentDetail, UpstreamError> {
        self.calls.attachment.fetch_add(1, Ordering::SeqCst);
        self.attachments
            .get(attachment_id)
            .map(|(detail, _)| detail.clone())
            .ok_or_else(|| status(404, format!("attachments/{attachment_id}")))
    }

    async fn get_attachment_content(&self, attachment_id: &str) -> Result<Vec<u8>, UpstreamError> {
        self.calls.attachment_content.fetch_add(1, Ordering::SeqCst);
        self.attachments
            .get(attachment_id)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| status(404, format!("attachments/{attachment_id}/content")))
    }
}

#[allow(dead_code)]
pub fn article(id: &str, note_type: &str, published: bool) -> Article {
    let mut attributes = vec![Attribute::label("pageUrl", format!("{id}-slug"))];
    if published {
        attributes.push(Attribute::label("blog", "true"));
    }
    Article {
        note_id: id.to_string(),
        title: format!("Title {id}"),
        date_modified: "2024-05-01 12:00:00.000+0000".to_string(),
        note_type: note_type.to_string(),
        mime: "text/html".to_string(),
        summary: String::new(),
        content: String::new(),
        attributes,
    }
}

pub fn blog_config() -> BlogConfig {
    BlogConfig {
        blog_name: "Test Blog".into(),
        blog_title: "Notes in public".into(),
        domain: DOMAIN.into(),
        articles_per_page: PAGE_SIZE,
        image_proxy_url: PROXY.into(),
    }
}

pub fn cache_layer(policy: FillLockPolicy) -> Arc<CacheLayer> {
    Arc::new(CacheLayer::new(
        Arc::new(MemoryStore::default()),
        Duration::from_secs(3600),
        policy,
    ))
}

pub fn setup_test_state(notes: Arc<FakeNotes>) -> AppState {
    AppState::new(
        blog_config(),
        ServerConfig::default(),
        CorsConfig {
            allowed_origins: vec![],
        },
        notes,
        cache_layer(FillLockPolicy::PerKey),
    )
}

pub fn setup_test_app(notes: Arc<FakeNotes>) -> Router {
    init_router(setup_test_state(notes))
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
