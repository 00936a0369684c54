//! Cache key generation.
//!
//! Keys are `trilium_blog:<operation>[:<param>...]`. Listing keys include both
//! page number and page size, so each page is cached independently.

const CACHE_PREFIX: &str = "trilium_blog";

fn build_key(parts: &[&str]) -> String {
    format!("{}:{}", CACHE_PREFIX, parts.join(":"))
}

/// Cache keys for article data.
pub mod articles {
    use super::build_key;

    /// Key for one page of the article listing.
    pub fn page(page: usize, page_size: usize) -> String {
        build_key(&["articles", &page.to_string(), &page_size.to_string()])
    }

    /// Key for a single rendered article.
    pub fn by_id(note_id: &str) -> String {
        build_key(&["article", note_id])
    }
}

/// Cache keys for attachment data.
pub mod attachments {
    use super::build_key;

    pub fn by_id(attachment_id: &str) -> String {
        build_key(&["attachment", attachment_id])
    }
}

/// Key for the generated sitemap.
pub fn sitemap() -> String {
    build_key(&["sitemap"])
}
