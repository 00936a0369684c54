pub mod articles;
pub mod attachments;
pub mod blog;
pub mod seo;
