//! Report assembly and rendering (JSON and Markdown).

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use brandlens_sentiment::{AggregatedInsights, PageAnalysis, PageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    Json,
    Markdown,
}

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub brand: String,
    pub variants: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub pages: Vec<PageAnalysis>,
    pub insights: AggregatedInsights,
}

pub(crate) fn render(report: &Report, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report")
        }
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}

/// Write `rendered` to `output`, or stdout when no path is given.
pub(crate) fn write_report(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_markdown(report: &Report) -> String {
    let insights = &report.insights;
    let dist = &insights.distribution;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Brand Context Report: {}", report.brand));
    lines.push(String::new());
    lines.push(format!(
        "**Generated**: {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!("**Variants**: {}", report.variants.join(", ")));
    lines.push(format!(
        "**Pages**: {} ({} analyzed, {} errors, {} skipped)",
        insights.total_pages, insights.status.success, insights.status.error, insights.status.skipped
    ));
    lines.push(format!(
        "**Mentions**: {} across {} pages ({} high-mention, {} low-mention)",
        insights.total_mentions,
        insights.pages_with_mentions,
        insights.high_mention_pages,
        insights.low_mention_pages
    ));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    lines.push("## Sentiment Distribution".to_string());
    lines.push(String::new());
    lines.push("| Positive | Neutral | Negative |".to_string());
    lines.push("|----------|---------|----------|".to_string());
    lines.push(format!(
        "| {} | {} | {} |",
        dist.positive, dist.neutral, dist.negative
    ));
    lines.push(String::new());

    lines.push("## Top Domains".to_string());
    lines.push(String::new());
    if insights.top_domains.is_empty() {
        lines.push("_No domains mention the brand._".to_string());
    } else {
        lines.push("| Domain | Mentions | Pages | Positive | Neutral | Negative |".to_string());
        lines.push("|--------|----------|-------|----------|---------|----------|".to_string());
        for d in &insights.top_domains {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                cell(&d.domain),
                d.mentions,
                d.pages,
                d.classifications.positive,
                d.classifications.neutral,
                d.classifications.negative
            ));
        }
    }
    lines.push(String::new());

    lines.push("## High-Impact Pages".to_string());
    lines.push(String::new());
    if insights.high_impact_pages.is_empty() {
        lines.push("_No page mentions the brand 3 or more times._".to_string());
    } else {
        lines.push("| URL | Mentions | Classification |".to_string());
        lines.push("|-----|----------|----------------|".to_string());
        for p in &insights.high_impact_pages {
            let label = p
                .classification
                .map_or_else(|| "n/a".to_string(), |c| c.to_string());
            lines.push(format!("| {} | {} | {} |", cell(&p.url), p.mention_count, label));
        }
    }
    lines.push(String::new());

    lines.push("## Pages".to_string());
    for page in &report.pages {
        lines.push(String::new());
        lines.push(format!("### {}", page.url));
        lines.push(String::new());
        lines.push(format!("- **Status**: {}", page.status));
        if page.status == PageStatus::Success {
            lines.push(format!("- **Mentions**: {}", page.mention_count));
        }
        if let Some(s) = &page.sentiment {
            lines.push(format!(
                "- **Classification**: {} (score {}, +{} / -{})",
                s.classification, s.score, s.positive_count, s.negative_count
            ));
        }
        lines.push(format!("- **Rationale**: {}", page.rationale));
        if !page.excerpts.is_empty() {
            lines.push(String::new());
            for excerpt in &page.excerpts {
                lines.push(format!("> {excerpt}"));
                lines.push(String::new());
            }
        }
    }

    lines.join("\n")
}
