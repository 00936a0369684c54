use scraper::{Html, Selector};
use tracing::warn;

/// Returns the trimmed inner HTML of `<body>`.
///
/// Fragments come back as they went in, minus surrounding whitespace.
pub fn strip_document_wrapper(html: &str) -> String {
    let body = match Selector::parse("body") {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = ?e, "Failed to build body selector, keeping document wrapper");
            return html.to_string();
        }
    };

    let document = Html::parse_document(html);
    match document.select(&body).next() {
        Some(element) => element.inner_html().trim().to_string(),
        None => {
            warn!("Parsed document has no body, keeping content as is");
            html.to_string()
        }
    }
}
