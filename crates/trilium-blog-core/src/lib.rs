//! # Trilium Blog Core
//!
//! Core types, errors, and utilities shared by the Trilium blog proxy crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-number pagination math for article listings
//! - [`serde`]: Custom serde helpers
//!
//! # Example
//!
//! ```ignore
//! use trilium_blog_core::errors::AppError;
//! use trilium_blog_core::pagination::PageWindow;
//!
//! let error = AppError::internal(anyhow::anyhow!("Failed to fetch articles"));
//!
//! let window = PageWindow::new(2, 10, 35);
//! assert_eq!(window.range(), 10..20);
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PageQuery, PageWindow, total_pages};
