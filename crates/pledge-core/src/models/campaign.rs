//! Crowdfunding campaign data models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ExtractionError;

/// A complete campaign record, one per project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Campaign title.
    pub name: String,

    /// Campaign owner or organization.
    pub company: String,

    /// Short campaign blurb.
    pub description: String,

    /// Amount pledged so far, in `currency`.
    pub total_funding: Decimal,

    /// Target pledge total.
    pub funding_goal: u64,

    /// Number of backers across all tiers.
    pub backers: u64,

    /// Currency code as shown on the page (e.g. "USD").
    pub currency: String,

    /// Canonical page URL.
    pub link: Url,

    /// Whether the page shows the funding-successful banner.
    pub funding_succeeded: bool,

    /// Campaign launch.
    pub start_date: NaiveDateTime,

    /// Campaign close.
    pub end_date: NaiveDateTime,

    /// Category label.
    pub category: String,

    /// Reward tiers in page order.
    #[serde(default)]
    pub levels: Vec<BackingLevel>,
}

impl Project {
    /// Start building a project record.
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    /// Pledged total as a fraction of the goal, `None` when the goal is 0.
    pub fn funding_ratio(&self) -> Option<Decimal> {
        if self.funding_goal == 0 {
            return None;
        }
        Some(self.total_funding / Decimal::from(self.funding_goal))
    }
}

/// A single reward tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingLevel {
    /// Minimum pledge for this tier.
    pub money: u64,

    /// Backers who chose this tier.
    pub backers: u64,

    /// Tier capacity; 0 when unlimited and not sold out.
    pub max_backers_allowed: u64,

    /// Places left; 0 when unlimited.
    pub remaining_backers_allowed: u64,

    /// Tier no longer available.
    pub is_sold_out: bool,

    /// Reward description.
    pub description: String,
}

impl BackingLevel {
    /// Start building a tier record.
    pub fn builder() -> BackingLevelBuilder {
        BackingLevelBuilder::default()
    }

    /// Whether the tier has a capacity at all.
    pub fn is_limited(&self) -> bool {
        self.max_backers_allowed > 0
    }
}

/// Accumulates validated field values for a [`Project`].
///
/// `build` only succeeds once every field has been supplied, so a
/// half-populated project cannot exist.
#[derive(Debug, Clone, Default)]
pub struct ProjectBuilder {
    name: Option<String>,
    company: Option<String>,
    description: Option<String>,
    total_funding: Option<Decimal>,
    funding_goal: Option<u64>,
    backers: Option<u64>,
    currency: Option<String>,
    link: Option<Url>,
    funding_succeeded: Option<bool>,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    category: Option<String>,
    levels: Vec<BackingLevel>,
}

impl ProjectBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn total_funding(mut self, total_funding: Decimal) -> Self {
        self.total_funding = Some(total_funding);
        self
    }

    pub fn funding_goal(mut self, funding_goal: u64) -> Self {
        self.funding_goal = Some(funding_goal);
        self
    }

    pub fn backers(mut self, backers: u64) -> Self {
        self.backers = Some(backers);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn link(mut self, link: Url) -> Self {
        self.link = Some(link);
        self
    }

    pub fn funding_succeeded(mut self, funding_succeeded: bool) -> Self {
        self.funding_succeeded = Some(funding_succeeded);
        self
    }

    pub fn start_date(mut self, start_date: NaiveDateTime) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDateTime) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Append tiers, keeping their order.
    pub fn levels(mut self, levels: impl IntoIterator<Item = BackingLevel>) -> Self {
        self.levels.extend(levels);
        self
    }

    /// Finish the record.
    pub fn build(self) -> Result<Project, ExtractionError> {
        Ok(Project {
            name: required(self.name, "name")?,
            company: required(self.company, "company")?,
            description: required(self.description, "description")?,
            total_funding: required(self.total_funding, "total_funding")?,
            funding_goal: required(self.funding_goal, "funding_goal")?,
            backers: required(self.backers, "backers")?,
            currency: required(self.currency, "currency")?,
            link: required(self.link, "link")?,
            funding_succeeded: required(self.funding_succeeded, "funding_succeeded")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
            category: required(self.category, "category")?,
            levels: self.levels,
        })
    }
}

/// Accumulates field values for a [`BackingLevel`].
#[derive(Debug, Clone, Default)]
pub struct BackingLevelBuilder {
    money: Option<u64>,
    backers: Option<u64>,
    availability: Option<(u64, u64)>,
    is_sold_out: bool,
    description: Option<String>,
}

impl BackingLevelBuilder {
    pub fn money(mut self, money: u64) -> Self {
        self.money = Some(money);
        self
    }

    pub fn backers(mut self, backers: u64) -> Self {
        self.backers = Some(backers);
        self
    }

    /// Limited-quantity figures: places left and total capacity.
    pub fn availability(mut self, remaining: u64, max: u64) -> Self {
        self.availability = Some((remaining, max));
        self
    }

    pub fn sold_out(mut self, is_sold_out: bool) -> Self {
        self.is_sold_out = is_sold_out;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Finish the tier. A sold-out tier's capacity is its backer count,
    /// whatever limited-quantity figures were supplied.
    pub fn build(self) -> Result<BackingLevel, ExtractionError> {
        let backers = required(self.backers, "level.backers")?;
        let (remaining, mut max) = self.availability.unwrap_or_default();
        if self.is_sold_out {
            max = backers;
        }

        Ok(BackingLevel {
            money: required(self.money, "level.money")?,
            backers,
            max_backers_allowed: max,
            remaining_backers_allowed: remaining,
            is_sold_out: self.is_sold_out,
            description: required(self.description, "level.description")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ExtractionError> {
    value.ok_or_else(|| ExtractionError::MissingField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn complete_builder() -> ProjectBuilder {
        Project::builder()
            .name("Widget")
            .company("Widget Co")
            .description("A widget")
            .total_funding(Decimal::from_str("1500.00").unwrap())
            .funding_goal(2000)
            .backers(42)
            .currency("USD")
            .link(Url::parse("https://example.com/projects/widget").unwrap())
            .funding_succeeded(false)
            .start_date(midnight(2013, 1, 15))
            .end_date(midnight(2013, 2, 14))
            .category("Hardware")
    }

    #[test]
    fn test_project_builder_complete() {
        let project = complete_builder().build().unwrap();
        assert_eq!(project.name, "Widget");
        assert_eq!(project.funding_goal, 2000);
        assert!(project.levels.is_empty());
    }

    #[test]
    fn test_project_builder_reports_first_missing_field() {
        let err = Project::builder().name("Widget").build().unwrap_err();
        assert_eq!(err, ExtractionError::MissingField("company".to_string()));
    }

    #[test]
    fn test_levels_keep_order() {
        let levels = [10, 25, 100].map(|money| BackingLevel {
            money,
            ..Default::default()
        });
        let project = complete_builder().levels(levels).build().unwrap();

        let money: Vec<u64> = project.levels.iter().map(|l| l.money).collect();
        assert_eq!(money, vec![10, 25, 100]);
    }

    #[test]
    fn test_sold_out_overrides_capacity() {
        let level = BackingLevel::builder()
            .money(25)
            .backers(12)
            .availability(3, 6)
            .sold_out(true)
            .description("Sticker")
            .build()
            .unwrap();

        assert_eq!(level.max_backers_allowed, 12);
        assert_eq!(level.remaining_backers_allowed, 3);
        assert!(level.is_sold_out);
    }

    #[test]
    fn test_unlimited_level_defaults_to_zero() {
        let level = BackingLevel::builder()
            .money(10)
            .backers(5)
            .description("Thanks")
            .build()
            .unwrap();

        assert_eq!(level.max_backers_allowed, 0);
        assert_eq!(level.remaining_backers_allowed, 0);
        assert!(!level.is_limited());
    }

    #[test]
    fn test_funding_ratio() {
        let project = complete_builder().build().unwrap();
        assert_eq!(project.funding_ratio(), Some(Decimal::from_str("0.75").unwrap()));

        let project = complete_builder().funding_goal(0).build().unwrap();
        assert_eq!(project.funding_ratio(), None);
    }

    #[test]
    fn test_project_json_round_trip() {
        let project = complete_builder().build().unwrap();
        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back, project);
    }
}
