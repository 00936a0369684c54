use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::sanitize::policy;

static ATTACHMENT_API_PATH: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r#"api/attachments/([^/"'\s<>]+)/image/[^"'\s<>]+"#));

/// Rewrites `api/attachments/{id}/image/...` to `/attachments/{id}`.
pub fn rewrite_attachment_api_paths(html: &str) -> String {
    match ATTACHMENT_API_PATH.as_ref() {
        Ok(pattern) => pattern.replace_all(html, "/attachments/$1").into_owned(),
        Err(e) => {
            warn!(error = %e, "Attachment path pattern unavailable, leaving content as is");
            html.to_string()
        }
    }
}

fn proxied_source(src: &str, proxy: &str, domain: &str) -> Option<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        Some(format!("{proxy}{src}"))
    } else if src.starts_with("/attachments/") {
        Some(format!("{proxy}{domain}{src}"))
    } else {
        None
    }
}

/// Routes `<img>` sources through the image proxy.
///
/// Absolute `http(s)` sources become `{proxy}{src}`; site-relative
/// `/attachments/...` sources become `{proxy}{domain}{src}`. Other sources are
/// left alone. The markup is re-serialized under the sanitizing policy.
pub fn rewrite_image_sources(html: &str, proxy: &str, domain: &str) -> String {
    let proxy = proxy.to_string();
    let domain = domain.to_string();

    let mut builder = policy();
    builder.attribute_filter(move |element, attribute, value| {
        if element == "img" && attribute == "src" {
            if let Some(rewritten) = proxied_source(value, &proxy, &domain) {
                return Some(Cow::Owned(rewritten));
            }
        }
        Some(Cow::Borrowed(value))
    });

    builder.clean(html).to_string()
}
