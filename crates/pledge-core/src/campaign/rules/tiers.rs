//! Reward tier extraction.

use super::numbers::{parse_count, parse_pledge_amount};
use super::selectors::{
    REWARD_TIER, TIER_BACKERS, TIER_DESCRIPTION, TIER_HEADING, TIER_LIMITED, TIER_SOLD_OUT,
};
use super::FieldExtractor;
use crate::campaign::Result;
use crate::error::ExtractionError;
use crate::html::Node;
use crate::models::campaign::BackingLevel;

const MONEY: &str = "level.money";
const BACKERS: &str = "level.backers";
const AVAILABILITY: &str = "level.availability";
const DESCRIPTION: &str = "level.description";

/// Collects every reward tier of a page, in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelsExtractor;

impl FieldExtractor for LevelsExtractor {
    type Output = Vec<BackingLevel>;

    fn field(&self) -> &'static str {
        "levels"
    }

    fn extract(&self, root: Node<'_>) -> Result<Vec<BackingLevel>> {
        extract_levels(root).collect()
    }
}

/// Lazily extract each reward tier below `root`, in document order.
pub fn extract_levels<'a>(root: Node<'a>) -> impl Iterator<Item = Result<BackingLevel>> + use<'a> {
    root.select_iter(&REWARD_TIER).map(extract_level)
}

/// Build one tier record from its container node.
pub fn extract_level(tier: Node<'_>) -> Result<BackingLevel> {
    let mut level = BackingLevel::builder()
        .money(extract_money(tier)?)
        .backers(extract_tier_backers(tier)?);

    if let Some((remaining, max)) = extract_availability(tier)? {
        level = level.availability(remaining, max);
    }

    level
        .sold_out(TIER_SOLD_OUT.is_present(tier))
        .description(extract_tier_description(tier)?)
        .build()
}

/// Pledge threshold from the tier heading.
pub fn extract_money(tier: Node<'_>) -> Result<u64> {
    let heading = TIER_HEADING.first(tier, MONEY)?;
    let text = heading.inner_text();
    parse_pledge_amount(&text)
        .ok_or_else(|| ExtractionError::format(MONEY, text.trim(), "no amount in pledge heading"))
}

/// Backer count from the leading token of the backers label.
pub fn extract_tier_backers(tier: Node<'_>) -> Result<u64> {
    let label = TIER_BACKERS.first(tier, BACKERS)?;
    let text = label.inner_text();
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| ExtractionError::format(BACKERS, text.as_str(), "empty backers label"))?;
    parse_count(BACKERS, token)
}

/// Remaining and total places of a limited tier, `None` when unlimited.
pub fn extract_availability(tier: Node<'_>) -> Result<Option<(u64, u64)>> {
    let Some(label) = TIER_LIMITED.find(tier) else {
        return Ok(None);
    };

    let text = label.inner_text();
    parse_availability(&text)
        .map(Some)
        .ok_or_else(|| {
            ExtractionError::format(AVAILABILITY, text.trim(), "expected \"(N of M left)\"")
        })
}

/// Parse a limited-quantity label such as `"(3 of 6 left)"` into
/// `(remaining, max)`.
pub fn parse_availability(text: &str) -> Option<(u64, u64)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let remaining = tokens.first()?.trim_start_matches('(');
    let max = tokens.get(2)?;

    let remaining = remaining.replace(',', "").parse().ok()?;
    let max = max.replace(',', "").parse().ok()?;
    Some((remaining, max))
}

/// Reward text: the node following the first descendant of the
/// description container.
pub fn extract_tier_description(tier: Node<'_>) -> Result<String> {
    let container = TIER_DESCRIPTION.first(tier, DESCRIPTION)?;
    let node = container
        .descendant_nodes()
        .into_iter()
        .nth(1)
        .ok_or_else(|| {
            ExtractionError::selector_miss(
                DESCRIPTION,
                format!("{} second descendant", TIER_DESCRIPTION),
            )
        })?;
    Ok(node.inner_text().trim().to_string())
}
