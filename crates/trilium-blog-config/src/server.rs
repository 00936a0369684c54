use std::path::PathBuf;

use crate::env::string_or;

/// Process-level settings that are not part of the blog itself.
///
/// # Environment Variables
///
/// - `STATIC_DIR`: Built front-end directory (default: `frontend/dist`)
/// - `LOG_DIR`: Directory for rotated log files (default: `logs`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            static_dir: string_or("STATIC_DIR", "frontend/dist").into(),
            log_dir: string_or("LOG_DIR", "logs").into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("frontend/dist"),
            log_dir: PathBuf::from("logs"),
        }
    }
}
