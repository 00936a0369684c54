//! Blog presentation settings.

use crate::env::{parse_or, string_or};

pub const DEFAULT_IMAGE_PROXY_URL: &str = "https://88900.net/api/imageproxy/";

/// Blog settings loaded from environment variables.
///
/// # Environment Variables
///
/// - `BLOG_NAME`: Short blog name (default: `Trilium Blog`)
/// - `BLOG_TITLE`: Blog title shown by the front end (default: empty)
/// - `DOMAIN`: Public origin of the site, e.g. `https://blog.example.com`
///   (default: `http://localhost:8080`)
/// - `ARTICLES_PER_PAGE`: Page size for article listings (default: `10`, minimum `1`)
/// - `IMAGE_PROXY_URL`: Base URL that image sources are routed through
#[derive(Clone, Debug)]
pub struct BlogConfig {
    pub blog_name: String,
    pub blog_title: String,
    /// Public origin without a trailing slash.
    pub domain: String,
    pub articles_per_page: usize,
    pub image_proxy_url: String,
}

impl BlogConfig {
    pub fn from_env() -> Self {
        Self {
            blog_name: string_or("BLOG_NAME", "Trilium Blog"),
            blog_title: string_or("BLOG_TITLE", ""),
            domain: normalize_domain(&string_or("DOMAIN", "http://localhost:8080")),
            articles_per_page: parse_or("ARTICLES_PER_PAGE", 10usize).max(1),
            image_proxy_url: string_or("IMAGE_PROXY_URL", DEFAULT_IMAGE_PROXY_URL),
        }
    }

    /// Absolute URL of an article page on the public site.
    pub fn article_url(&self, note_id: &str) -> String {
        format!("{}/articles/{}", self.domain, note_id)
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            blog_name: "Trilium Blog".into(),
            blog_title: String::new(),
            domain: "http://localhost:8080".into(),
            articles_per_page: 10,
            image_proxy_url: DEFAULT_IMAGE_PROXY_URL.into(),
        }
    }
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('/').to_string()
}
