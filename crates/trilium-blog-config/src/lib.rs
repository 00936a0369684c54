//! # Trilium Blog Config
//!
//! Configuration types for the Trilium blog proxy.
//!
//! Every struct is loaded once from environment variables at startup and is
//! read-only afterwards:
//!
//! - [`blog`]: Display strings, public domain, image proxy, page size
//! - [`upstream`]: Note service base URL, token and timeout
//! - [`server`]: Static asset directory and log directory
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use trilium_blog_config::{BlogConfig, UpstreamConfig};
//!
//! let blog = BlogConfig::from_env();
//! let upstream = UpstreamConfig::from_env();
//! ```

pub mod blog;
pub mod cors;
pub mod server;
pub mod upstream;

mod env;

pub use blog::BlogConfig;
pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
