//! Funding status: pledged total, goal, backer count and success banner.

use rust_decimal::Decimal;

use super::numbers::{parse_decimal, parse_truncated};
use super::selectors::{BACKERS_COUNT, PLEDGED, SUCCESS_BANNER};
use super::{AttributeExtractor, FieldExtractor, PresenceExtractor};
use crate::campaign::Result;
use crate::html::Node;

pub const TOTAL_FUNDING: AttributeExtractor =
    AttributeExtractor::new("total_funding", PLEDGED, "data-pledged");
pub const FUNDING_GOAL: AttributeExtractor =
    AttributeExtractor::new("funding_goal", PLEDGED, "data-goal");
pub const BACKERS: AttributeExtractor =
    AttributeExtractor::new("backers", BACKERS_COUNT, "data-backers-count");
pub const FUNDING_SUCCEEDED: PresenceExtractor =
    PresenceExtractor::new("funding_succeeded", SUCCESS_BANNER);

/// Amount pledged so far.
pub fn extract_total_funding(root: Node<'_>) -> Result<Decimal> {
    let raw = TOTAL_FUNDING.extract(root)?;
    parse_decimal(TOTAL_FUNDING.field(), &raw)
}

/// Funding target, fractional part dropped.
pub fn extract_funding_goal(root: Node<'_>) -> Result<u64> {
    let raw = FUNDING_GOAL.extract(root)?;
    parse_truncated(FUNDING_GOAL.field(), &raw)
}

/// Total backers, fractional part dropped.
pub fn extract_backers(root: Node<'_>) -> Result<u64> {
    let raw = BACKERS.extract(root)?;
    parse_truncated(BACKERS.field(), &raw)
}

/// Whether the success banner is on the page. Absence means `false`.
pub fn extract_funding_succeeded(root: Node<'_>) -> Result<bool> {
    FUNDING_SUCCEEDED.extract(root)
}
