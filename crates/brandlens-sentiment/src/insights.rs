//! Cross-page aggregation of [`PageAnalysis`] records.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Classification, PageAnalysis, PageStatus};

/// Number of domains reported by [`aggregate`].
pub const TOP_DOMAIN_LIMIT: usize = 5;

/// Mention count at or above which a page is high-impact.
pub const HIGH_MENTION_THRESHOLD: usize = 3;

/// Host of `url` without a leading `www.`, or `url` itself when it has no
/// parsable host.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .map_or_else(
            || url.to_string(),
            |host| host.strip_prefix("www.").unwrap_or(host.as_str()).to_string(),
        )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl ClassificationCounts {
    fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Positive => self.positive += 1,
            Classification::Neutral => self.neutral += 1,
            Classification::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Mention volume and portrayal tally for one referring domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainStats {
    pub domain: String,
    pub mentions: usize,
    pub pages: usize,
    pub classifications: ClassificationCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighImpactPage {
    pub url: String,
    pub mention_count: usize,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub success: usize,
    pub error: usize,
    pub skipped: usize,
}

/// Corpus-level view of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedInsights {
    pub total_pages: usize,
    pub status: StatusCounts,
    pub pages_with_mentions: usize,
    pub total_mentions: usize,
    /// Pages with at least [`HIGH_MENTION_THRESHOLD`] mentions.
    pub high_mention_pages: usize,
    /// Pages with at least one but fewer than [`HIGH_MENTION_THRESHOLD`] mentions.
    pub low_mention_pages: usize,
    /// Over every page that has a computed sentiment.
    pub distribution: ClassificationCounts,
    /// Every mentioning domain, most mentions first.
    pub domains: Vec<DomainStats>,
    pub top_domains: Vec<DomainStats>,
    /// High-mention pages, most mentions first.
    pub high_impact_pages: Vec<HighImpactPage>,
}

/// Aggregate with the default top-domain cut-off.
#[must_use]
pub fn aggregate(pages: &[PageAnalysis]) -> AggregatedInsights {
    aggregate_with_limit(pages, TOP_DOMAIN_LIMIT)
}

/// Reduce a finished set of page records into corpus statistics.
///
/// Only pages that mention the brand contribute to domain rankings. Ties in
/// mention volume keep first-encountered order.
#[must_use]
pub fn aggregate_with_limit(pages: &[PageAnalysis], top_domains: usize) -> AggregatedInsights {
    let mut status = StatusCounts::default();
    let mut distribution = ClassificationCounts::default();
    let mut domains: Vec<DomainStats> = Vec::new();
    let mut domain_index: HashMap<String, usize> = HashMap::new();
    let mut high_impact_pages = Vec::new();
    let mut pages_with_mentions = 0;
    let mut total_mentions = 0;
    let mut low_mention_pages = 0;

    for page in pages {
        match page.status {
            PageStatus::Success => status.success += 1,
            PageStatus::Error => status.error += 1,
            PageStatus::Skipped => status.skipped += 1,
        }

        if let Some(classification) = page.classification() {
            distribution.record(classification);
        }

        if page.mention_count == 0 {
            continue;
        }

        pages_with_mentions += 1;
        total_mentions += page.mention_count;

        if page.mention_count >= HIGH_MENTION_THRESHOLD {
            high_impact_pages.push(HighImpactPage {
                url: page.url.clone(),
                mention_count: page.mention_count,
                classification: page.classification(),
            });
        } else {
            low_mention_pages += 1;
        }

        let domain = extract_domain(&page.url);
        let idx = *domain_index.entry(domain.clone()).or_insert_with(|| {
            domains.push(DomainStats {
                domain,
                mentions: 0,
                pages: 0,
                classifications: ClassificationCounts::default(),
            });
            domains.len() - 1
        });
        let stats = &mut domains[idx];
        stats.mentions += page.mention_count;
        stats.pages += 1;
        if let Some(classification) = page.classification() {
            stats.classifications.record(classification);
        }
    }

    // Stable sorts: equal counts keep first-encountered order.
    domains.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    high_impact_pages.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));

    let top = domains.iter().take(top_domains).cloned().collect();

    AggregatedInsights {
        total_pages: pages.len(),
        status,
        pages_with_mentions,
        total_mentions,
        high_mention_pages: high_impact_pages.len(),
        low_mention_pages,
        distribution,
        domains,
        top_domains: top,
        high_impact_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentResult;

    fn page(url: &str, mentions: usize, classification: Option<Classification>) -> PageAnalysis {
        PageAnalysis {
            url: url.to_string(),
            status: PageStatus::Success,
            mention_count: mentions,
            excerpts: Vec::new(),
            sentiment: classification.map(|c| SentimentResult {
                classification: c,
                ..SentimentResult::neutral_empty()
            }),
            rationale: String::new(),
        }
    }

    fn corpus() -> Vec<PageAnalysis> {
        vec![
            page("https://www.alpha.com/a", 4, Some(Classification::Positive)),
            page("https://beta.org/x", 1, Some(Classification::Negative)),
            page("https://alpha.com/b", 1, Some(Classification::Neutral)),
            page("https://gamma.net/", 0, None),
            page("https://delta.io/1", 5, Some(Classification::Negative)),
            page("not a url", 2, Some(Classification::Neutral)),
            PageAnalysis::failed("https://epsilon.com/", "timed out"),
        ]
    }

    #[test]
    fn extracts_domain_without_www() {
        assert_eq!(extract_domain("https://www.example.com/a/b"), "example.com");
        assert_eq!(extract_domain("http://News.Example.org:8080/x"), "news.example.org");
    }

    #[test]
    fn unparsable_url_falls_back_to_raw_string() {
        assert_eq!(extract_domain("not a url"), "not a url");
        assert_eq!(extract_domain(""), "");
        assert_eq!(extract_domain("mailto:pr@example.com"), "mailto:pr@example.com");
    }

    #[test]
    fn corpus_tallies() {
        let insights = aggregate(&corpus());
        assert_eq!(insights.total_pages, 7);
        assert_eq!(
            insights.status,
            StatusCounts {
                success: 6,
                error: 1,
                skipped: 0
            }
        );
        assert_eq!(insights.pages_with_mentions, 5);
        assert_eq!(insights.total_mentions, 13);
        assert_eq!(insights.high_mention_pages, 2);
        assert_eq!(insights.low_mention_pages, 3);
        assert_eq!(
            insights.distribution,
            ClassificationCounts {
                positive: 1,
                neutral: 2,
                negative: 2
            }
        );
    }

    #[test]
    fn domains_ranked_by_mentions() {
        let insights = aggregate(&corpus());
        let ranked: Vec<(&str, usize)> = insights
            .domains
            .iter()
            .map(|d| (d.domain.as_str(), d.mentions))
            .collect();
        assert_eq!(
            ranked,
            vec![("alpha.com", 5), ("delta.io", 5), ("not a url", 2), ("beta.org", 1)]
        );
        let alpha = &insights.domains[0];
        assert_eq!(alpha.pages, 2);
        assert_eq!(alpha.classifications.positive, 1);
        assert_eq!(alpha.classifications.neutral, 1);
    }

    #[test]
    fn top_domains_respect_limit() {
        let insights = aggregate_with_limit(&corpus(), 2);
        assert_eq!(insights.top_domains.len(), 2);
        assert_eq!(insights.top_domains[0].domain, "alpha.com");
        assert_eq!(insights.domains.len(), 4);
    }

    #[test]
    fn high_impact_pages_ranked() {
        let insights = aggregate(&corpus());
        let urls: Vec<&str> = insights
            .high_impact_pages
            .iter()
            .map(|p| p.url.as_str())
            .collect();
        assert_eq!(urls, vec!["https://delta.io/1", "https://www.alpha.com/a"]);
    }

    #[test]
    fn permutation_preserves_totals() {
        let forward = aggregate(&corpus());
        let mut reversed_pages = corpus();
        reversed_pages.reverse();
        let reversed = aggregate(&reversed_pages);

        assert_eq!(forward.distribution, reversed.distribution);
        assert_eq!(forward.total_mentions, reversed.total_mentions);

        let totals = |i: &AggregatedInsights| {
            let mut v: Vec<(String, usize)> = i
                .domains
                .iter()
                .map(|d| (d.domain.clone(), d.mentions))
                .collect();
            v.sort();
            v
        };
        assert_eq!(totals(&forward), totals(&reversed));

        // Tied domains swap places; everything else is identical.
        assert_eq!(reversed.domains[0].domain, "delta.io");
        assert_eq!(reversed.domains[1].domain, "alpha.com");
    }

    #[test]
    fn empty_input() {
        let insights = aggregate(&[]);
        assert_eq!(insights.total_pages, 0);
        assert!(insights.top_domains.is_empty());
        assert_eq!(insights.distribution.total(), 0);
    }
}
