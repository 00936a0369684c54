//! Note service connection settings.

use std::time::Duration;

use crate::env::{parse_or, string_or};

/// Upstream note service settings loaded from environment variables.
///
/// # Environment Variables
///
/// - `TRILIUM_API_URL`: Base URL of the note service (default: `http://localhost:8080`)
/// - `TRILIUM_API_PATH`: Path segment in front of `notes`/`attachments` (default: `api`)
/// - `TRILIUM_TOKEN`: Sent verbatim as the `Authorization` header
/// - `UPSTREAM_TIMEOUT_SECS`: Per-request timeout (default: `30`)
#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub api_path: String,
    pub token: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("api_path", &self.api_path)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: string_or("TRILIUM_API_URL", "http://localhost:8080"),
            api_path: string_or("TRILIUM_API_PATH", "api"),
            token: string_or("TRILIUM_TOKEN", ""),
            timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", 30u64)),
        }
    }

    /// Full URL for `path` under the API root, e.g. `notes/abc/content`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        let prefix = self.api_path.trim_matches('/');
        let path = path.trim_start_matches('/');

        if prefix.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{prefix}/{path}")
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".into(),
            api_path: "api".into(),
            token: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let config = UpstreamConfig {
            api_url: "http://trilium:8080/".into(),
            api_path: "/etapi/".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(
            config.endpoint("/notes/abc"),
            "http://trilium:8080/etapi/notes/abc"
        );
    }

    #[test]
    fn test_endpoint_without_prefix() {
        let config = UpstreamConfig {
            api_url: "http://trilium:8080".into(),
            api_path: String::new(),
            ..UpstreamConfig::default()
        };
        assert_eq!(config.endpoint("notes"), "http://trilium:8080/notes");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = UpstreamConfig {
            token: "secret-token".into(),
            ..UpstreamConfig::default()
        };
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
