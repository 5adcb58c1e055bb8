use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for one analysis run.
///
/// Engine knobs (`require_mention`, `excerpt_radius`, `top_domains`,
/// `exclude_neutral_terms`) are handed to `brandlens-sentiment`; the `fetch_*`
/// fields configure the page client in `brandlens-scraper`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub targets_path: PathBuf,
    pub require_mention: bool,
    pub excerpt_radius: usize,
    pub top_domains: usize,
    pub exclude_neutral_terms: bool,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub fetch_delay_ms: u64,
    pub fetch_max_retries: u32,
    pub fetch_backoff_base_ms: u64,
}
