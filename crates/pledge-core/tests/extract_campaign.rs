//! End-to-end extraction against a saved campaign page.

use std::str::FromStr;

use chrono::NaiveDate;
use pledge_core::{
    BackingLevel, CampaignParser, Document, ExtractionError, PageParser, PledgeError, Project,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use url::Url;

const CAMPAIGN: &str = include_str!("fixtures/campaign.html");

fn expected() -> Project {
    let level = |money, backers, max, remaining, sold_out, description: &str| BackingLevel {
        money,
        backers,
        max_backers_allowed: max,
        remaining_backers_allowed: remaining,
        is_sold_out: sold_out,
        description: description.to_string(),
    };

    Project {
        name: "Hexapod Desk Lamp".to_string(),
        company: "Lumen Works".to_string(),
        description: "A six-legged lamp that stands anywhere & folds flat.".to_string(),
        total_funding: Decimal::from_str("32150.47").unwrap(),
        funding_goal: 20000,
        backers: 402,
        currency: "USD".to_string(),
        link: Url::parse("https://www.kickstarter.com/projects/lumenworks/hexapod-desk-lamp")
            .unwrap(),
        funding_succeeded: true,
        start_date: NaiveDate::from_ymd_opt(2013, 3, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        end_date: NaiveDate::from_ymd_opt(2013, 4, 3)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap(),
        category: "Product Design".to_string(),
        levels: vec![
            level(
                1,
                231,
                0,
                0,
                false,
                "Our thanks, and every backer update as the lamp comes together.",
            ),
            level(25, 3, 6, 3, false, "Early bird: one Hexapod lamp in raw aluminium."),
            level(
                5000,
                1,
                1,
                0,
                true,
                "A dinner with the team and a lamp engraved with your name.",
            ),
        ],
    }
}

#[test]
fn test_extract_full_campaign() {
    let result = PageParser::new().parse_markup(CAMPAIGN).unwrap();
    assert_eq!(result.project, expected());
}

#[test]
fn test_sold_out_tier_capacity_is_its_backers() {
    let project = PageParser::new().parse_markup(CAMPAIGN).unwrap().project;
    let sold_out: Vec<_> = project.levels.iter().filter(|l| l.is_sold_out).collect();

    assert_eq!(sold_out.len(), 1);
    assert_eq!(sold_out[0].max_backers_allowed, sold_out[0].backers);
}

#[test]
fn test_same_document_gives_equal_projects() {
    let document = Document::parse(CAMPAIGN).unwrap();
    let parser = PageParser::new();

    let first = parser.parse(&document).unwrap().project;
    let second = parser.parse(&document).unwrap().project;
    assert_eq!(first, second);
}

#[test]
fn test_missing_banner_means_not_funded() {
    let markup = CAMPAIGN.replace("funding-successful-banner", "funding-status");
    let project = PageParser::new().parse_markup(&markup).unwrap().project;

    assert!(!project.funding_succeeded);
}

#[test]
fn test_missing_title_is_an_error() {
    let markup = CAMPAIGN.replace("og:title", "og:headline");
    let err = PageParser::new().parse_markup(&markup).unwrap_err();

    match err {
        PledgeError::Extraction(ExtractionError::SelectorMiss { field, selector }) => {
            assert_eq!(field, "name");
            assert_eq!(selector, "meta[property*=\"og:title\"]");
        }
        other => panic!("expected a selector miss, got {other:?}"),
    }
}

#[test]
fn test_project_round_trips_through_json() {
    let project = PageParser::new().parse_markup(CAMPAIGN).unwrap().project;
    let json = serde_json::to_string(&project).unwrap();
    let back: Project = serde_json::from_str(&json).unwrap();

    assert_eq!(back, project);
}
