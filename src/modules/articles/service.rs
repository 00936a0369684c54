use tracing::{debug, info, instrument};

use trilium_blog_cache::{CacheLayer, keys};
use trilium_blog_core::PageWindow;
use trilium_blog_models::{Article, ArticlePage, ArticleWithContent};

use crate::content::ContentTransformer;
use crate::errors::BlogError;
use crate::upstream::NoteApi;

pub struct ArticleService;

impl ArticleService {
    /// One page of published articles plus the total number published.
    ///
    /// The full list is fetched and filtered on every fill; only the
    /// requested slice is cached, under a key per page and page size. A page
    /// past the end is empty but still reports the real total.
    #[instrument(skip(api, cache), fields(cache.key = tracing::field::Empty))]
    pub async fn list_articles(
        api: &dyn NoteApi,
        cache: &CacheLayer,
        page: usize,
        page_size: usize,
    ) -> Result<ArticlePage, BlogError> {
        let key = keys::articles::page(page, page_size);
        tracing::Span::current().record("cache.key", key.as_str());

        cache
            .get_or_fetch_json(&key, || async {
                let notes = api.search_blog_notes().await?;
                let published: Vec<Article> = notes
                    .into_iter()
                    .filter(Article::is_publishable)
                    .collect();

                let window = PageWindow::new(page, page_size, published.len());
                debug!(
                    total = window.total,
                    start = window.start(),
                    out_of_range = window.is_out_of_range(),
                    "Paginating published articles"
                );

                Ok::<_, BlogError>(ArticlePage {
                    articles: published[window.range()].to_vec(),
                    total: published.len(),
                })
            })
            .await
    }

    /// A published article with its rendered HTML.
    ///
    /// Metadata and content are fetched concurrently. If either fails the
    /// whole call fails, reporting both outcomes.
    #[instrument(skip(api, cache, transformer))]
    pub async fn get_article(
        api: &dyn NoteApi,
        cache: &CacheLayer,
        transformer: &ContentTransformer,
        note_id: &str,
    ) -> Result<ArticleWithContent, BlogError> {
        cache
            .get_or_fetch_json(&keys::articles::by_id(note_id), || async {
                let (metadata, content) =
                    tokio::join!(api.get_note(note_id), api.get_note_content(note_id));

                let (article, raw) = match (metadata, content) {
                    (Ok(article), Ok(raw)) => (article, raw),
                    (metadata, content) => {
                        return Err(BlogError::ArticleFetch {
                            note_id: note_id.to_string(),
                            metadata: metadata.err(),
                            content: content.err(),
                        });
                    }
                };

                if !article.is_blog_eligible() {
                    return Err(BlogError::NotBlogEligible {
                        note_id: note_id.to_string(),
                    });
                }

                let content = transformer.render_article_html(&String::from_utf8_lossy(&raw));
                info!(note.id = %note_id, bytes = content.len(), "Rendered article");

                Ok::<_, BlogError>(ArticleWithContent { article, content })
            })
            .await
    }
}
