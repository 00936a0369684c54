//! # Trilium Blog
//!
//! A read-through caching proxy that publishes notes from a Trilium instance
//! as a blog. Notes labelled `#blog=true` are listed, rendered and served to
//! a single-page front end; everything fetched from the note service is
//! cached, gzip-compressed, for a fixed TTL.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── upstream/        # Note service client (NoteApi trait, reqwest impl)
//! ├── content/         # HTML sanitizing and rewriting pipeline
//! ├── modules/         # Feature modules
//! │   ├── articles/    # Article listing and single articles
//! │   ├── attachments/ # Attachment content of published notes
//! │   ├── blog/        # Blog name and title
//! │   └── seo/         # sitemap.xml and robots.txt
//! ├── errors.rs        # Orchestrator error taxonomy
//! ├── router.rs        # API, docs, metrics and static front end
//! └── state.rs         # Shared application state
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: fetch orchestration behind the cache layer
//! - `router.rs`: Axum router configuration
//!
//! ## Request flow
//!
//! A handler calls its service with a cache key. On a miss the cache layer
//! takes the fill lock for that key, runs the service's fetch closure
//! (upstream calls, filtering, rendering), stores the compressed result and
//! returns it. Every service failure surfaces as a generic 500; the detailed
//! error only goes to the logs.
//!
//! ## Configuration
//!
//! ```bash
//! TRILIUM_API_URL=http://trilium:8080
//! TRILIUM_API_PATH=etapi
//! TRILIUM_TOKEN=your-etapi-token
//! DOMAIN=https://blog.example.com
//! REDIS_URL=redis://127.0.0.1:6379
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod content;
pub mod docs;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod modules;
pub mod router;
pub mod state;
pub mod upstream;

pub use trilium_blog_cache;
pub use trilium_blog_config;
pub use trilium_blog_core;
pub use trilium_blog_models;
