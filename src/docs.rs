use utoipa::OpenApi;

use trilium_blog_models::{
    Article, ArticleListResponse, ArticleResponse, Attribute, BlogInfoResponse, ErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::blog::controller::get_blog_info,
        crate::modules::articles::controller::list_articles,
        crate::modules::articles::controller::get_article,
        crate::modules::attachments::controller::get_attachment,
        crate::modules::seo::controller::get_sitemap,
        crate::modules::seo::controller::get_robots_txt,
    ),
    components(
        schemas(
            Article,
            Attribute,
            ArticleListResponse,
            ArticleResponse,
            BlogInfoResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Blog", description = "Blog display settings"),
        (name = "Articles", description = "Published articles"),
        (name = "Attachments", description = "Attachment content of published articles"),
        (name = "SEO", description = "Sitemap and crawler rules")
    ),
    info(
        title = "Trilium Blog API",
        version = "0.1.0",
        description = "Read-through caching proxy that publishes labelled Trilium notes as a blog.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/info",
            "/api/articles",
            "/api/articles/{note_id}",
            "/api/attachments/{attachment_id}",
            "/sitemap.xml",
            "/robots.txt",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
