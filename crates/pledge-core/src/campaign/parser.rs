//! Campaign record assembly from a parsed page.

use std::time::Instant;

use tracing::{debug, info};

use crate::html::Document;
use crate::models::campaign::Project;

use super::rules::{
    extract_backers, extract_category, extract_company, extract_currency, extract_description,
    extract_end_date, extract_funding_goal, extract_funding_succeeded, extract_link, extract_name,
    extract_start_date, extract_total_funding, FieldExtractor, LevelsExtractor,
};
use super::Result;

/// Result of campaign extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Extracted project record.
    pub project: Project,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for campaign page parsing.
pub trait CampaignParser: Send + Sync {
    /// Assemble one project from a parsed page.
    fn parse(&self, document: &Document) -> Result<ExtractionResult>;

    /// Parse raw markup, then assemble.
    fn parse_markup(&self, markup: &str) -> crate::Result<ExtractionResult> {
        let document = Document::parse(markup)?;
        Ok(self.parse(&document)?)
    }
}

/// Rule-based parser for campaign pages.
///
/// Every field is required apart from the success flag and the sold-out
/// markers, so the first failing rule aborts the whole record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParser;

impl PageParser {
    /// Create a new page parser.
    pub fn new() -> Self {
        Self
    }
}

impl CampaignParser for PageParser {
    fn parse(&self, document: &Document) -> Result<ExtractionResult> {
        let start = Instant::now();
        let root = document.root();

        let name = extract_name(root)?;
        info!("Extracting campaign {:?}", name);

        let levels = LevelsExtractor.extract(root)?;
        debug!("Found {} reward tiers", levels.len());

        let project = Project::builder()
            .name(name)
            .company(extract_company(root)?)
            .description(extract_description(root)?)
            .total_funding(extract_total_funding(root)?)
            .funding_goal(extract_funding_goal(root)?)
            .backers(extract_backers(root)?)
            .currency(extract_currency(root)?)
            .link(extract_link(root)?)
            .funding_succeeded(extract_funding_succeeded(root)?)
            .start_date(extract_start_date(root)?)
            .end_date(extract_end_date(root)?)
            .category(extract_category(root)?)
            .levels(levels)
            .build()?;

        debug!(
            "Extracted {} ({} {} of {}, {} backers)",
            project.name,
            project.total_funding,
            project.currency,
            project.funding_goal,
            project.backers
        );

        Ok(ExtractionResult {
            project,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, ParseError, PledgeError};
    use crate::models::campaign::BackingLevel;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const WIDGET: &str = r#"<html><head>
<meta property="og:title" content="Widget">
<meta property="og:description" content="A better widget.">
<meta property="og:url" content="https://www.kickstarter.com/projects/acme/widget">
</head><body>
<a data-modal-class="modal_project_by" href="/profile/acme">Acme</a>
<div id="pledged" data-goal="2000.0" data-pledged="1500.00">
<data data-currency="USD">$1,500</data>
</div>
<div id="backers_count" data-backers-count="42">42</div>
<ul>
<li class="posted">
<span>calendar</span>
<b>Launched:</b>
2013-01-15T09:30:00
</li>
<li class="ends">
<span>clock</span>
<b>Funding ends:</b>
2013-02-14T20:59:00
</li>
<li class="category">
<a href="/discover/hardware"><span>tag</span>Hardware</a>
</li>
</ul>
<div class="NS-projects-reward">
<h5>Pledge $10 or more</h5>
<span class="num-backers">5 backers</span>
<div class="desc">
<p>A sticker.</p>
</div>
</div>
</body></html>"#;

    #[test]
    fn test_parse_widget_page() {
        let result = PageParser::new().parse_markup(WIDGET).unwrap();
        let project = result.project;

        assert_eq!(project.name, "Widget");
        assert_eq!(project.company, "Acme");
        assert_eq!(project.description, "A better widget.");
        assert_eq!(project.total_funding, Decimal::from_str("1500.00").unwrap());
        assert_eq!(project.funding_goal, 2000);
        assert_eq!(project.backers, 42);
        assert_eq!(project.currency, "USD");
        assert_eq!(project.link.as_str(), "https://www.kickstarter.com/projects/acme/widget");
        assert!(!project.funding_succeeded);
        assert_eq!(
            project.start_date,
            NaiveDate::from_ymd_opt(2013, 1, 15).unwrap().and_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            project.end_date,
            NaiveDate::from_ymd_opt(2013, 2, 14).unwrap().and_hms_opt(20, 59, 0).unwrap()
        );
        assert_eq!(project.category, "Hardware");
        assert_eq!(
            project.levels,
            vec![BackingLevel {
                money: 10,
                backers: 5,
                max_backers_allowed: 0,
                remaining_backers_allowed: 0,
                is_sold_out: false,
                description: "A sticker.".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_title_aborts_record() {
        let markup = WIDGET.replace(r#"<meta property="og:title" content="Widget">"#, "");
        let err = PageParser::new().parse_markup(&markup).unwrap_err();

        assert!(matches!(
            err,
            PledgeError::Extraction(ExtractionError::SelectorMiss { ref field, .. })
                if field == "name"
        ));
    }

    #[test]
    fn test_broken_tier_aborts_record() {
        let markup = WIDGET.replace("Pledge $10 or more", "Pledge anything");
        let document = Document::parse(&markup).unwrap();

        assert!(matches!(
            PageParser.parse(&document),
            Err(ExtractionError::Format { ref field, .. }) if field == "level.money"
        ));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let document = Document::parse(WIDGET).unwrap();
        let first = PageParser.parse(&document).unwrap().project;
        let second = PageParser.parse(&document).unwrap().project;

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_markup() {
        assert!(matches!(
            PageParser.parse_markup("  \n "),
            Err(PledgeError::Parse(ParseError::Empty))
        ));
    }
}
