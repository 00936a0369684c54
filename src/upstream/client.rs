use std::time::Instant;

use async_trait::async_trait;
use reqwest::{StatusCode, Url, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use trilium_blog_config::UpstreamConfig;
use trilium_blog_models::{Article, AttachmentDetail, NoteList};

use super::{NoteApi, UpstreamError};
use crate::metrics::track_upstream_request;

const BLOG_SEARCH: &str = "notes?search=%23blog%3Dtrue&orderBy=utcDateModified";

/// HTTP client for the note service.
///
/// Holds one pooled `reqwest::Client` for the life of the process. Every
/// request carries the configured token verbatim in `Authorization` and is
/// bounded by the configured timeout.
#[derive(Clone)]
pub struct TriliumClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl std::fmt::Debug for TriliumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriliumClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TriliumClient {
    pub fn new(config: UpstreamConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// `{api}/{collection}/{id}` plus an optional trailing segment.
    ///
    /// `id` is always a single path segment: `/` is percent-encoded and
    /// dot-segments are refused, so a caller-supplied id cannot move the
    /// request to another upstream path.
    fn resource_url(
        &self,
        collection: &str,
        id: &str,
        tail: Option<&str>,
    ) -> Result<Url, UpstreamError> {
        if matches!(id, "" | "." | "..") {
            return Err(UpstreamError::InvalidId { id: id.to_string() });
        }

        let mut url = self.parse(&self.config.endpoint(collection))?;
        url.path_segments_mut()
            .map_err(|()| UpstreamError::invalid_url(collection, "base URL cannot carry a path"))?
            .pop_if_empty()
            .push(id)
            .extend(tail);
        Ok(url)
    }

    fn parse(&self, raw: &str) -> Result<Url, UpstreamError> {
        Url::parse(raw).map_err(|e| UpstreamError::invalid_url(raw, e))
    }

    async fn get_bytes(&self, endpoint: &'static str, url: Url) -> Result<Vec<u8>, UpstreamError> {
        let started = Instant::now();

        let result = self.send(&url).await;
        track_upstream_request(endpoint, result.is_ok(), started.elapsed());

        match &result {
            Ok(body) => debug!(upstream.url = %url, bytes = body.len(), "Upstream request succeeded"),
            Err(e) => warn!(upstream.url = %url, error = %e, "Upstream request failed"),
        }

        result
    }

    async fn send(&self, url: &Url) -> Result<Vec<u8>, UpstreamError> {
        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, &self.config.token)
            .send()
            .await
            .map_err(|e| UpstreamError::unavailable(url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::unavailable(url.as_str(), e))?;

        Ok(body.to_vec())
    }

    async fn get_json<T>(&self, endpoint: &'static str, url: Url) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let raw = url.to_string();
        let body = self.get_bytes(endpoint, url).await?;
        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { url: raw, source })
    }
}

#[async_trait]
impl NoteApi for TriliumClient {
    #[instrument(skip(self), fields(upstream.endpoint = "search"))]
    async fn search_blog_notes(&self) -> Result<Vec<Article>, UpstreamError> {
        let url = self.parse(&self.config.endpoint(BLOG_SEARCH))?;
        let list: NoteList = self.get_json("search", url).await?;
        Ok(list.results)
    }

    #[instrument(skip(self), fields(upstream.endpoint = "note"))]
    async fn get_note(&self, note_id: &str) -> Result<Article, UpstreamError> {
        let url = self.resource_url("notes", note_id, None)?;
        self.get_json("note", url).await
    }

    #[instrument(skip(self), fields(upstream.endpoint = "note_content"))]
    async fn get_note_content(&self, note_id: &str) -> Result<Vec<u8>, UpstreamError> {
        let url = self.resource_url("notes", note_id, Some("content"))?;
        self.get_bytes("note_content", url).await
    }

    #[instrument(skip(self), fields(upstream.endpoint = "attachment"))]
    async fn get_attachment(&self, attachment_id: &str) -> Result<AttachmentDetail, UpstreamError> {
        let url = self.resource_url("attachments", attachment_id, None)?;
        self.get_json("attachment", url).await
    }

    #[instrument(skip(self), fields(upstream.endpoint = "attachment_content"))]
    async fn get_attachment_content(&self, attachment_id: &str) -> Result<Vec<u8>, UpstreamError> {
        let url = self.resource_url("attachments", attachment_id, Some("content"))?;
        self.get_bytes("attachment_content", url).await
    }
}
