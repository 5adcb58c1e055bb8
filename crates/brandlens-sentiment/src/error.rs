use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("brand name must be non-empty")]
    EmptyBrandName,

    #[error("failed to compile brand pattern: {0}")]
    Pattern(#[from] regex::Error),
}
