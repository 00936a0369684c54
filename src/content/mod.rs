//! Article HTML rendering.
//!
//! Raw note bodies go through four fixed stages before they are cached:
//!
//! 1. [`sanitize`] with a user-generated-content policy
//! 2. [`rewrite_attachment_api_paths`] to public `/attachments/{id}` URLs
//! 3. [`rewrite_image_sources`] to route images through the image proxy
//! 4. [`strip_document_wrapper`] to drop any `<html>`/`<body>` shell
//!
//! None of the stages fail. When one cannot do its job it logs a warning and
//! hands its input on unchanged.

mod document;
mod images;
mod sanitize;

pub use document::strip_document_wrapper;
pub use images::{rewrite_attachment_api_paths, rewrite_image_sources};
pub use sanitize::sanitize;

use trilium_blog_config::BlogConfig;

/// Renders note bodies for the public site.
#[derive(Debug, Clone)]
pub struct ContentTransformer {
    image_proxy_url: String,
    domain: String,
}

impl ContentTransformer {
    pub fn new(image_proxy_url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            image_proxy_url: image_proxy_url.into(),
            domain: domain.into(),
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(&config.image_proxy_url, &config.domain)
    }

    pub fn render_article_html(&self, raw: &str) -> String {
        let html = sanitize(raw);
        let html = rewrite_attachment_api_paths(&html);
        let html = rewrite_image_sources(&html, &self.image_proxy_url, &self.domain);
        strip_document_wrapper(&html)
    }
}
