use serde::Serialize;

/// Three-way portrayal of the brand on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Positive => write!(f, "positive"),
            Classification::Neutral => write!(f, "neutral"),
            Classification::Negative => write!(f, "negative"),
        }
    }
}

/// Scored judgement for one page's brand context.
///
/// `classification` is always derived from `score`, `positive_count` and
/// `negative_count` by [`crate::classify`]; it is never set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentResult {
    pub score: i64,
    pub classification: Classification,
    pub positive_count: usize,
    pub negative_count: usize,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub context_sentence_count: usize,
}

impl SentimentResult {
    /// The result for a page with no brand-relevant sentences.
    #[must_use]
    pub fn neutral_empty() -> Self {
        Self {
            score: 0,
            classification: Classification::Neutral,
            positive_count: 0,
            negative_count: 0,
            positive_words: Vec::new(),
            negative_words: Vec::new(),
            context_sentence_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Success,
    Error,
    Skipped,
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageStatus::Success => write!(f, "success"),
            PageStatus::Error => write!(f, "error"),
            PageStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Analysis record for one input page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageAnalysis {
    pub url: String,
    pub status: PageStatus,
    /// Occurrences of the canonical brand name in the full page text.
    pub mention_count: usize,
    pub excerpts: Vec<String>,
    pub sentiment: Option<SentimentResult>,
    pub rationale: String,
}

impl PageAnalysis {
    /// A page that could not be retrieved or decoded.
    #[must_use]
    pub fn failed(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            url: url.into(),
            status: PageStatus::Error,
            mention_count: 0,
            excerpts: Vec::new(),
            sentiment: None,
            rationale: format!("Page could not be analyzed: {reason}"),
        }
    }

    /// A page that was deliberately not fetched (e.g. denylisted).
    #[must_use]
    pub fn skipped(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            url: url.into(),
            status: PageStatus::Skipped,
            mention_count: 0,
            excerpts: Vec::new(),
            sentiment: None,
            rationale: format!("Page skipped: {reason}"),
        }
    }

    #[must_use]
    pub fn classification(&self) -> Option<Classification> {
        self.sentiment.as_ref().map(|s| s.classification)
    }
}

/// Knobs for per-page analysis and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// When `true`, pages that never name the brand are not scored.
    pub require_mention: bool,
    /// Characters kept on each side of a mention in display excerpts.
    pub excerpt_radius: usize,
    /// Domains kept in the top list by [`crate::PageAnalyzer::aggregate`].
    pub top_domains: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            require_mention: true,
            excerpt_radius: 75,
            top_domains: crate::insights::TOP_DOMAIN_LIMIT,
        }
    }
}
