use tracing::{info, instrument};

use trilium_blog_cache::{CacheLayer, keys};
use trilium_blog_config::BlogConfig;
use trilium_blog_models::Article;

use crate::errors::BlogError;
use crate::upstream::NoteApi;

const SITEMAP_HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    "\n",
);
const SITEMAP_FOOTER: &str = "</urlset>\n";

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Builds the sitemap document for the given articles, skipping any that
/// are not published text notes.
pub fn render_sitemap<'a>(blog: &BlogConfig, articles: impl IntoIterator<Item = &'a Article>) -> String {
    let mut xml = String::from(SITEMAP_HEADER);

    for article in articles.into_iter().filter(|a| a.is_publishable()) {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            escape_xml(&blog.article_url(&article.note_id)),
            escape_xml(&article.date_modified),
        ));
    }

    xml.push_str(SITEMAP_FOOTER);
    xml
}

pub struct SeoService;

impl SeoService {
    #[instrument(skip(api, cache, blog))]
    pub async fn generate_sitemap(
        api: &dyn NoteApi,
        cache: &CacheLayer,
        blog: &BlogConfig,
    ) -> Result<String, BlogError> {
        let bytes = cache
            .get_or_fetch(&keys::sitemap(), || async {
                let notes = api.search_blog_notes().await?;
                let xml = render_sitemap(blog, &notes);
                info!(notes = notes.len(), bytes = xml.len(), "Generated sitemap");
                Ok::<_, BlogError>(xml.into_bytes())
            })
            .await?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn robots_txt(blog: &BlogConfig) -> String {
        format!(
            "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n",
            blog.domain
        )
    }
}
