//! `analyze` command: fetch target pages and classify their brand context.

use std::path::{Path, PathBuf};

use brandlens_core::{AppConfig, TargetsFile, UrlDenylist};
use brandlens_scraper::{FetchedPage, PageClient};
use brandlens_sentiment::{
    AnalysisOptions, BrandQuery, IndicatorLexicon, PageAnalysis, PageAnalyzer,
};
use chrono::Utc;

use crate::report::{render, write_report, Report, ReportFormat};

/// Arguments of the `analyze` sub-command, as parsed by clap.
#[derive(Debug)]
pub(crate) struct AnalyzeArgs {
    pub targets: Option<PathBuf>,
    pub brand: Option<String>,
    pub urls: Vec<String>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Brand, URL list and filters resolved from CLI flags, the targets file
/// and the environment config.
#[derive(Debug)]
pub(crate) struct AnalyzePlan {
    pub brand: String,
    pub urls: Vec<String>,
    pub denylist: UrlDenylist,
    pub require_mention: bool,
}

/// Merge CLI flags over the targets file.
///
/// `--url` replaces the file's URL list (and its denylist); `--brand`
/// replaces its brand. With `--url` and no targets file, `--brand` is
/// mandatory.
///
/// # Errors
///
/// Returns an error when no brand or no URL can be determined.
pub(crate) fn resolve_plan(
    config: &AppConfig,
    args: &AnalyzeArgs,
    targets: Option<TargetsFile>,
) -> anyhow::Result<AnalyzePlan> {
    let brand = match (&args.brand, &targets) {
        (Some(b), _) => b.trim().to_string(),
        (None, Some(t)) => t.brand.clone(),
        (None, None) => anyhow::bail!("--brand is required when no targets file is used"),
    };
    if brand.is_empty() {
        anyhow::bail!("brand name must not be empty");
    }

    let require_mention = targets
        .as_ref()
        .and_then(|t| t.require_mention)
        .unwrap_or(config.require_mention);

    let (urls, denylist) = if args.urls.is_empty() {
        let t = targets.ok_or_else(|| anyhow::anyhow!("no URLs given and no targets file"))?;
        (t.urls, UrlDenylist::new(&t.denylist))
    } else {
        let urls: Vec<String> = args
            .urls
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        if urls.is_empty() {
            anyhow::bail!("every --url value is empty");
        }
        (urls, UrlDenylist::default())
    };

    Ok(AnalyzePlan {
        brand,
        urls,
        denylist,
        require_mention,
    })
}

/// Split `urls` into the ones to fetch, keeping input order.
pub(crate) fn fetchable_urls(urls: &[String], denylist: &UrlDenylist) -> Vec<String> {
    urls.iter()
        .filter(|u| !denylist.is_denied(u))
        .cloned()
        .collect()
}

/// Build one [`PageAnalysis`] per input URL, in input order.
///
/// `fetched` must hold the results for [`fetchable_urls`] in the same order.
pub(crate) fn assemble_pages(
    urls: &[String],
    denylist: &UrlDenylist,
    fetched: Vec<FetchedPage>,
    analyzer: &PageAnalyzer<'_>,
) -> Vec<PageAnalysis> {
    let mut fetched = fetched.into_iter();
    let mut pages = Vec::with_capacity(urls.len());

    for url in urls {
        if let Some(pattern) = denylist.matching_pattern(url) {
            pages.push(PageAnalysis::skipped(
                url.as_str(),
                format!("URL matches denylist pattern '{pattern}'"),
            ));
            continue;
        }
        let page = match fetched.next() {
            Some(FetchedPage { result: Ok(text), .. }) => analyzer.analyze(url, &text),
            Some(FetchedPage { result: Err(e), .. }) => PageAnalysis::failed(url.as_str(), e),
            None => PageAnalysis::failed(url.as_str(), "no fetch result"),
        };
        pages.push(page);
    }

    pages
}

fn load_targets_for(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<Option<TargetsFile>> {
    let explicit = args.targets.as_deref();
    // --url without --targets never touches the default targets path.
    if explicit.is_none() && !args.urls.is_empty() {
        return Ok(None);
    }
    let path: &Path = explicit.unwrap_or(config.targets_path.as_path());
    let targets = brandlens_core::load_targets(path)?;
    tracing::info!(
        path = %path.display(),
        brand = %targets.brand,
        urls = targets.urls.len(),
        "loaded targets file"
    );
    Ok(Some(targets))
}

/// Run the `analyze` command end to end.
///
/// When `dry_run` is `true`, prints the resolved brand, variants and URL
/// plan without any network access.
///
/// # Errors
///
/// Returns an error if the targets file cannot be loaded, the brand name is
/// invalid, the HTTP client cannot be built, or the report cannot be
/// written. Individual page failures are recorded in the report instead.
pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let targets = load_targets_for(config, &args)?;
    let plan = resolve_plan(config, &args, targets)?;
    let brand = BrandQuery::new(&plan.brand)?;
    let to_fetch = fetchable_urls(&plan.urls, &plan.denylist);

    if args.dry_run {
        println!("[dry-run] brand: {}", brand.canonical_name());
        println!("[dry-run] variants: {}", brand.variants().join(", "));
        for url in &plan.urls {
            match plan.denylist.matching_pattern(url) {
                Some(pattern) => println!("[dry-run]   skip  {url} (denylist '{pattern}')"),
                None => println!("[dry-run]   fetch {url}"),
            }
        }
        println!(
            "[dry-run] would fetch {} of {} URLs",
            to_fetch.len(),
            plan.urls.len()
        );
        return Ok(());
    }

    let options = AnalysisOptions {
        require_mention: plan.require_mention,
        excerpt_radius: config.excerpt_radius,
        top_domains: config.top_domains,
    };
    let lexicon = IndicatorLexicon::new().with_neutral_exclusion(config.exclude_neutral_terms);
    let analyzer = PageAnalyzer::new(&brand, &lexicon, options);

    let client = PageClient::new(
        config.fetch_timeout_secs,
        &config.fetch_user_agent,
        config.fetch_max_retries,
        config.fetch_backoff_base_ms,
    )?
    .with_delay(config.fetch_delay_ms);

    tracing::info!(
        brand = %plan.brand,
        total = plan.urls.len(),
        fetching = to_fetch.len(),
        denylist = !plan.denylist.is_empty(),
        neutral_exclusion = lexicon.excludes_neutral_terms(),
        "starting analysis"
    );
    let fetched = client.fetch_all(&to_fetch).await;
    let pages = assemble_pages(&plan.urls, &plan.denylist, fetched, &analyzer);
    let insights = analyzer.aggregate(&pages);

    tracing::info!(
        pages = insights.total_pages,
        errors = insights.status.error,
        skipped = insights.status.skipped,
        mentions = insights.total_mentions,
        "analysis complete"
    );
    if insights.status.error > 0 {
        tracing::warn!(
            errors = insights.status.error,
            "some pages could not be analyzed"
        );
    }

    let report = Report {
        brand: plan.brand,
        variants: brand.variants().to_vec(),
        generated_at: Utc::now(),
        pages,
        insights,
    };
    let rendered = render(&report, args.format)?;
    write_report(&rendered, args.output.as_deref())
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
