mod analyze;
mod report;
mod score;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;
use crate::report::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "brandlens")]
#[command(about = "Classify how web pages portray a brand")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch target pages and report how they portray the brand
    Analyze {
        /// Targets YAML file (defaults to `BRANDLENS_TARGETS_PATH`)
        #[arg(long)]
        targets: Option<PathBuf>,

        /// Brand name; overrides the targets file
        #[arg(long)]
        brand: Option<String>,

        /// Page URL to analyze; repeatable, replaces the targets file URLs
        #[arg(long = "url")]
        urls: Vec<String>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the brand variants and URL plan without fetching
        #[arg(long)]
        dry_run: bool,
    },
    /// Analyze local text files (or stdin) without fetching anything
    Score {
        #[arg(long)]
        brand: String,

        /// Text files to analyze; reads stdin when omitted
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the name variants used to find a brand in text
    Variants {
        #[arg(long)]
        brand: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brandlens_core::load_app_config()?;

    // Logs go to stderr so reports on stdout stay machine-readable.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Analyze {
            targets,
            brand,
            urls,
            format,
            output,
            dry_run,
        }) => {
            let args = AnalyzeArgs {
                targets,
                brand,
                urls,
                format,
                output,
                dry_run,
            };
            analyze::run_analyze(&config, args).await?;
        }
        Some(Commands::Score {
            brand,
            files,
            format,
            output,
        }) => score::run_score(&config, &brand, &files, format, output.as_deref())?,
        Some(Commands::Variants { brand }) => {
            let query = brandlens_sentiment::BrandQuery::new(&brand)?;
            for variant in query.variants() {
                println!("{variant}");
            }
        }
        None => println!("no command given; run `brandlens --help` for usage"),
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
