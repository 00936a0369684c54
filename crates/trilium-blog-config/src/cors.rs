use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "*")
            .collect();

        Self { allowed_origins }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}
