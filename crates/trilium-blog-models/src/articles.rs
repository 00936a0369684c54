//! Note and article models.
//!
//! An [`Article`] is a note as returned by the note service. Only notes of
//! type `text` carrying the label `#blog=true` are published.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const BLOG_LABEL_TYPE: &str = "label";
pub const BLOG_LABEL_NAME: &str = "blog";
pub const BLOG_LABEL_VALUE: &str = "true";
pub const TEXT_NOTE_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attribute {
    #[serde(rename = "type", default)]
    pub attr_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    pub fn label(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attr_type: BLOG_LABEL_TYPE.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_blog_label(&self) -> bool {
        self.attr_type == BLOG_LABEL_TYPE
            && self.name == BLOG_LABEL_NAME
            && self.value == BLOG_LABEL_VALUE
    }
}

/// True iff some attribute is exactly `label` / `blog` / `true`.
pub fn has_blog_label(attributes: &[Attribute]) -> bool {
    attributes.iter().any(Attribute::is_blog_label)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub note_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date_modified: String,
    #[serde(rename = "type", default)]
    pub note_type: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Article {
    pub fn is_blog_eligible(&self) -> bool {
        has_blog_label(&self.attributes)
    }

    pub fn is_text(&self) -> bool {
        self.note_type == TEXT_NOTE_TYPE
    }

    /// Text note carrying the blog label; the only kind that is listed.
    pub fn is_publishable(&self) -> bool {
        self.is_text() && self.is_blog_eligible()
    }

    /// Value of the first attribute called `name`, regardless of its type.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Search response envelope from the note service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteList {
    #[serde(default)]
    pub results: Vec<Article>,
}

/// Cached shape for one page of the article listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub total: usize,
}

/// Cached shape for a single rendered article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleWithContent {
    pub article: Article,
    pub content: String,
}
