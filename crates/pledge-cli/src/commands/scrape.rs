//! Scrape command - fetch campaign pages and extract project records.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};
use url::Url;

use pledge_core::{BatchPolicy, BatchRunner, OutputFormat, PageParser, parse_url_list};

use super::load_config;
use super::output::{FormatArg, extension, format_projects, write_summary};
use crate::fetch::HttpFetcher;

/// Arguments for the scrape command.
#[derive(Args)]
pub struct ScrapeArgs {
    /// Campaign page URLs
    urls: Vec<String>,

    /// File with one URL per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Number of pages fetched at once (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: ScrapeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let urls = collect_urls(&args)?;
    if urls.is_empty() {
        anyhow::bail!("No URLs given. Pass them as arguments or with --input.");
    }

    let policy = if args.continue_on_error {
        BatchPolicy::BestEffort
    } else {
        config.batch.policy()
    };
    let concurrency = args.jobs.unwrap_or(config.batch.concurrency);
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);

    eprintln!(
        "{} Scraping {} pages",
        style("ℹ").blue(),
        urls.len()
    );

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let runner = BatchRunner::new(HttpFetcher::new(&config.fetch)?, PageParser::new())
        .with_policy(policy)
        .with_concurrency(concurrency);

    let report = runner
        .run_with_progress(&urls, |outcome| {
            pb.set_message(outcome.url.to_string());
            pb.inc(1);
        })
        .await;

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output
            .as_ref()
            .and_then(|p| p.parent())
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &report.outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if policy == BatchPolicy::FailFast {
        if let Some(failed) = report.failures().next() {
            let message = failed
                .result
                .as_ref()
                .err()
                .map(ToString::to_string)
                .unwrap_or_default();
            error!("Failed to scrape {}: {}", failed.url, message);
            anyhow::bail!("Scraping failed for {}: {}", failed.url, message);
        }
    }

    let projects: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .collect();

    let content = format_projects(&projects, format, config.output.pretty)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        debug!("Wrote {} output to {}", extension(format), output_path.display());
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    eprintln!();
    eprintln!(
        "{} Processed {} pages in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(report.succeeded()).green(),
        style(report.failed()).red()
    );

    if report.failed() > 0 {
        eprintln!();
        eprintln!("{}", style("Failed pages:").red());
        for outcome in report.failures() {
            if let Err(e) = &outcome.result {
                eprintln!("  - {}: {}", outcome.url, e);
            }
        }
    }

    Ok(())
}

fn collect_urls(args: &ScrapeArgs) -> anyhow::Result<Vec<Url>> {
    let mut urls = args
        .urls
        .iter()
        .map(|raw| Url::parse(raw).with_context(|| format!("Invalid URL: {}", raw)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        urls.extend(parse_url_list(&text)?);
    }

    Ok(urls)
}
