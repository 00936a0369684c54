use ammonia::Builder;

/// ammonia's default UGC policy, plus `class` on code blocks so syntax
/// highlighting survives. A document `<title>` is dropped with its text.
pub(super) fn policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("pre", &["class"])
        .add_tag_attributes("span", &["class"])
        .add_clean_content_tags(&["title"]);
    builder
}

/// Strips scripts, event handlers and other unsafe markup.
pub fn sanitize(raw: &str) -> String {
    policy().clean(raw).to_string()
}
