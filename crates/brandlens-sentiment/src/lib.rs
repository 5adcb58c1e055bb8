//! Brand-context classification engine.
//!
//! Expands a brand name into its surface variants, pulls the brand-relevant
//! sentences out of a page's text, scores them against a healthcare/consumer
//! indicator lexicon, and classifies the page as positive, neutral, or
//! negative toward the brand. Per-page results are then reduced into
//! cross-page insights (top domains, high-impact pages, distribution).
//!
//! Everything here is synchronous and side-effect free; fetching pages and
//! rendering reports belong to the sibling crates.

pub mod classifier;
pub mod context;
pub mod error;
pub mod insights;
pub mod lexicon;
pub mod page;
pub mod types;
pub mod variants;

pub use classifier::{classify, rationale};
pub use context::{extract_context, extract_excerpts, ContextWindow};
pub use error::SentimentError;
pub use insights::{aggregate, aggregate_with_limit, extract_domain, AggregatedInsights};
pub use lexicon::{IndicatorHits, IndicatorLexicon, IndicatorMatch};
pub use page::PageAnalyzer;
pub use types::{AnalysisOptions, Classification, PageAnalysis, PageStatus, SentimentResult};
pub use variants::{expand, BrandQuery};
