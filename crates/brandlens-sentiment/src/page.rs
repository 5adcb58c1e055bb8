//! Per-page analysis: mention counting, excerpts, context scoring, rationale.

use crate::classifier::{classify, rationale};
use crate::context::{extract_context, extract_excerpts};
use crate::insights::{aggregate_with_limit, AggregatedInsights};
use crate::lexicon::IndicatorLexicon;
use crate::types::{AnalysisOptions, PageAnalysis, PageStatus, SentimentResult};
use crate::variants::BrandQuery;

/// Analyses pages for one brand. Cheap to construct; borrows the shared
/// brand query and lexicon so many analyzers (or threads) can reuse them.
#[derive(Debug, Clone, Copy)]
pub struct PageAnalyzer<'a> {
    brand: &'a BrandQuery,
    lexicon: &'a IndicatorLexicon,
    options: AnalysisOptions,
}

impl<'a> PageAnalyzer<'a> {
    #[must_use]
    pub fn new(
        brand: &'a BrandQuery,
        lexicon: &'a IndicatorLexicon,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            brand,
            lexicon,
            options,
        }
    }

    /// Reduce this run's pages into insights, keeping
    /// `options.top_domains` domains in the top list.
    #[must_use]
    pub fn aggregate(&self, pages: &[PageAnalysis]) -> AggregatedInsights {
        aggregate_with_limit(pages, self.options.top_domains)
    }

    /// Score the brand context of one page's extracted text.
    #[must_use]
    pub fn score(&self, text: &str) -> SentimentResult {
        let window = extract_context(text, self.brand);
        let hits = self.lexicon.scan(&window.text);
        classify(&window, &hits)
    }

    /// Build the full analysis record for one page.
    ///
    /// Never fails: empty text is a page with zero mentions. When the brand
    /// is not named and `require_mention` is set, no sentiment is computed;
    /// otherwise the page is scored and the rationale says the result is not
    /// about the brand.
    #[must_use]
    pub fn analyze(&self, url: &str, text: &str) -> PageAnalysis {
        let brand = self.brand.canonical_name();
        let mention_count = self.brand.count_mentions(text);

        if mention_count == 0 && self.options.require_mention {
            tracing::debug!(url, brand, "brand not mentioned, page not scored");
            return PageAnalysis {
                url: url.to_string(),
                status: PageStatus::Success,
                mention_count: 0,
                excerpts: Vec::new(),
                sentiment: None,
                rationale: format!("{brand} is not mentioned on this page; no sentiment computed."),
            };
        }

        let sentiment = self.score(text);
        let mut explanation = rationale(&sentiment);

        let excerpts = if mention_count > 0 {
            extract_excerpts(text, self.brand, self.options.excerpt_radius)
        } else {
            explanation.push_str(&format!(
                " {brand} is not mentioned on this page, so this sentiment is unrelated to the brand."
            ));
            Vec::new()
        };

        tracing::debug!(
            url,
            brand,
            mentions = mention_count,
            score = sentiment.score,
            classification = %sentiment.classification,
            "page analyzed"
        );

        PageAnalysis {
            url: url.to_string(),
            status: PageStatus::Success,
            mention_count,
            excerpts,
            sentiment: Some(sentiment),
            rationale: explanation,
        }
    }
}
