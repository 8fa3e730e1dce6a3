//! Extract command - run extraction over saved campaign pages.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, info, warn};

use pledge_core::{CampaignParser, OutputFormat, PageParser, Project};

use super::load_config;
use super::output::{FormatArg, format_projects};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// HTML files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;
    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "html" | "htm")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    info!("Extracting from {} files", files.len());

    let parser = PageParser::new();
    let mut projects = Vec::with_capacity(files.len());
    let mut failed = Vec::new();

    for path in &files {
        match extract_file(&parser, path) {
            Ok(project) => projects.push(project),
            Err(e) if continue_on_error => {
                warn!("Failed to extract {}: {}", path.display(), e);
                failed.push((path, e.to_string()));
            }
            Err(e) => anyhow::bail!("Extraction failed for {}: {}", path.display(), e),
        }
    }

    let refs: Vec<&Project> = projects.iter().collect();
    let content = format_projects(&refs, format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            eprintln!("  - {}: {}", path.display(), error);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn extract_file(parser: &PageParser, path: &Path) -> anyhow::Result<Project> {
    let markup = fs::read_to_string(path)?;
    let result = parser.parse_markup(&markup)?;
    debug!(
        "Extracted {} from {} in {}ms",
        result.project.name,
        path.display(),
        result.processing_time_ms
    );
    Ok(result.project)
}
