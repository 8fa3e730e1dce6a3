//! Rendering of extracted projects as JSON, CSV or text.

use std::path::Path;

use pledge_core::{OutputFormat, PageOutcome, Project};

/// Output format flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub fn format_projects(
    projects: &[&Project],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(projects)?),
        OutputFormat::Json => Ok(serde_json::to_string(projects)?),
        OutputFormat::Csv => format_csv(projects),
        OutputFormat::Text => Ok(format_text(projects)),
    }
}

fn format_csv(projects: &[&Project]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "name",
        "company",
        "category",
        "currency",
        "total_funding",
        "funding_goal",
        "backers",
        "funding_succeeded",
        "start_date",
        "end_date",
        "link",
        "levels",
        "level_money",
    ])?;

    for project in projects {
        let level_money = project
            .levels
            .iter()
            .map(|l| l.money.to_string())
            .collect::<Vec<_>>()
            .join(";");

        wtr.write_record([
            project.name.as_str(),
            &project.company,
            &project.category,
            &project.currency,
            &project.total_funding.to_string(),
            &project.funding_goal.to_string(),
            &project.backers.to_string(),
            &project.funding_succeeded.to_string(),
            &project.start_date.to_string(),
            &project.end_date.to_string(),
            project.link.as_str(),
            &project.levels.len().to_string(),
            &level_money,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(projects: &[&Project]) -> String {
    let mut output = String::new();

    for (i, project) in projects.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        output.push_str(&format!("{}\n", project.name));
        output.push_str(&format!("  by {} ({})\n", project.company, project.category));
        output.push_str(&format!("  {}\n", project.link));
        output.push('\n');

        let ratio = project
            .funding_ratio()
            .map(|r| format!(" ({}%)", (r * rust_decimal::Decimal::ONE_HUNDRED).round_dp(1)))
            .unwrap_or_default();
        output.push_str(&format!(
            "  Pledged: {} {} of {}{}\n",
            project.total_funding, project.currency, project.funding_goal, ratio
        ));
        output.push_str(&format!("  Backers: {}\n", project.backers));
        output.push_str(&format!(
            "  Status:  {}\n",
            if project.funding_succeeded { "funded" } else { "not funded" }
        ));
        output.push_str(&format!(
            "  Runs:    {} to {}\n",
            project.start_date.format("%Y-%m-%d %H:%M"),
            project.end_date.format("%Y-%m-%d %H:%M")
        ));

        if !project.levels.is_empty() {
            output.push_str("\n  Rewards:\n");
            for level in &project.levels {
                let availability = if level.is_sold_out {
                    "sold out".to_string()
                } else if level.is_limited() {
                    format!(
                        "{} of {} left",
                        level.remaining_backers_allowed, level.max_backers_allowed
                    )
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "    {:>8}  {:>6} backers  {:<16} {}\n",
                    level.money, level.backers, availability, level.description
                ));
            }
        }
    }

    output
}

/// File extension for `format`.
pub fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    }
}

/// Write one summary row per processed page.
pub fn write_summary(path: &Path, outcomes: &[PageOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "index",
        "url",
        "status",
        "name",
        "total_funding",
        "funding_goal",
        "backers",
        "currency",
        "levels",
        "error",
    ])?;

    for outcome in outcomes {
        let index = outcome.index.to_string();
        match &outcome.result {
            Ok(project) => wtr.write_record([
                index.as_str(),
                outcome.url.as_str(),
                "success",
                &project.name,
                &project.total_funding.to_string(),
                &project.funding_goal.to_string(),
                &project.backers.to_string(),
                &project.currency,
                &project.levels.len().to_string(),
                "",
            ])?,
            Err(e) => wtr.write_record([
                index.as_str(),
                outcome.url.as_str(),
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &e.to_string(),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
