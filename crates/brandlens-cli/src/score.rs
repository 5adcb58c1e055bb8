//! `score` command: analyze local text without any network access.

use std::io::Read;
use std::path::PathBuf;

use brandlens_core::AppConfig;
use brandlens_sentiment::{
    AnalysisOptions, BrandQuery, IndicatorLexicon, PageAnalysis, PageAnalyzer,
};
use chrono::Utc;

use crate::report::{render, write_report, Report, ReportFormat};

/// Label used as the page URL for text read from stdin.
const STDIN_LABEL: &str = "<stdin>";

/// Analyze each input as one page; `(label, text)` pairs keep input order.
pub(crate) fn score_inputs(
    analyzer: &PageAnalyzer<'_>,
    inputs: Vec<(String, std::io::Result<String>)>,
) -> Vec<PageAnalysis> {
    inputs
        .into_iter()
        .map(|(label, text)| match text {
            Ok(text) => analyzer.analyze(&label, &text),
            Err(e) => {
                tracing::warn!(input = %label, error = %e, "failed to read input");
                PageAnalysis::failed(label, e)
            }
        })
        .collect()
}

fn read_inputs(files: &[PathBuf]) -> Vec<(String, std::io::Result<String>)> {
    if files.is_empty() {
        let mut buf = String::new();
        let result = std::io::stdin().read_to_string(&mut buf).map(|_| buf);
        return vec![(STDIN_LABEL.to_string(), result)];
    }
    files
        .iter()
        .map(|path| (path.display().to_string(), std::fs::read_to_string(path)))
        .collect()
}

/// Run the `score` command over `files`, or stdin when none are given.
///
/// Files are treated as already-extracted text; each path stands in for the
/// page URL in the report.
///
/// # Errors
///
/// Returns an error if the brand name is invalid or the report cannot be
/// written. Unreadable files are recorded as error pages.
pub(crate) fn run_score(
    config: &AppConfig,
    brand: &str,
    files: &[PathBuf],
    format: ReportFormat,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let query = BrandQuery::new(brand)?;
    let lexicon = IndicatorLexicon::new().with_neutral_exclusion(config.exclude_neutral_terms);
    let options = AnalysisOptions {
        require_mention: config.require_mention,
        excerpt_radius: config.excerpt_radius,
        top_domains: config.top_domains,
    };
    let analyzer = PageAnalyzer::new(&query, &lexicon, options);

    let pages = score_inputs(&analyzer, read_inputs(files));
    let insights = analyzer.aggregate(&pages);
    tracing::info!(
        brand = %query.canonical_name(),
        inputs = pages.len(),
        neutral_exclusion = lexicon.excludes_neutral_terms(),
        mentions = insights.total_mentions,
        "scored local inputs"
    );

    let report = Report {
        brand: query.canonical_name().to_string(),
        variants: query.variants().to_vec(),
        generated_at: Utc::now(),
        pages,
        insights,
    };
    let rendered = render(&report, format)?;
    write_report(&rendered, output)
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use brandlens_sentiment::{Classification, PageStatus};

    use super::*;

    #[test]
    fn inputs_are_scored_in_order_with_read_failures_recorded() {
        let brand = BrandQuery::new("Acme").unwrap();
        let lexicon = IndicatorLexicon::new();
        let analyzer = PageAnalyzer::new(&brand, &lexicon, AnalysisOptions::default());

        let pages = score_inputs(
            &analyzer,
            vec![
                ("a.txt".to_string(), Ok("Acme reported quarterly results.".to_string())),
                (
                    "missing.txt".to_string(),
                    Err(Error::new(ErrorKind::NotFound, "no such file")),
                ),
                ("c.txt".to_string(), Ok("Nothing relevant here.".to_string())),
            ],
        );

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].url, "a.txt");
        assert_eq!(pages[0].classification(), Some(Classification::Neutral));
        assert_eq!(pages[1].status, PageStatus::Error);
        assert!(pages[1].rationale.contains("no such file"));
        assert_eq!(pages[2].mention_count, 0);
        assert!(pages[2].sentiment.is_none());
    }
}
