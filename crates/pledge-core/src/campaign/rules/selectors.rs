//! Node selectors for campaign page markup.

use crate::html::NodeSelector;

// Page metadata
pub const OG_TITLE: NodeSelector = NodeSelector::attr_contains("meta", "property", "og:title");
pub const OG_DESCRIPTION: NodeSelector =
    NodeSelector::attr_contains("meta", "property", "og:description");
pub const OG_URL: NodeSelector = NodeSelector::attr_contains("meta", "property", "og:url");
pub const PROJECT_BY: NodeSelector =
    NodeSelector::attr_contains("a", "data-modal-class", "modal_project_by");
pub const CURRENCY: NodeSelector = NodeSelector::attr_present("data", "data-currency");

// Funding status
pub const PLEDGED: NodeSelector = NodeSelector::attr_contains("div", "id", "pledged");
pub const BACKERS_COUNT: NodeSelector = NodeSelector::attr_contains("div", "id", "backers_count");
pub const SUCCESS_BANNER: NodeSelector =
    NodeSelector::attr_contains("div", "id", "funding-successful-banner");

// Positional containers
pub const POSTED: NodeSelector = NodeSelector::attr_contains("li", "class", "posted");
pub const ENDS: NodeSelector = NodeSelector::attr_contains("li", "class", "ends");
pub const CATEGORY: NodeSelector = NodeSelector::attr_contains("li", "class", "category");

// Reward tiers
pub const REWARD_TIER: NodeSelector =
    NodeSelector::attr_contains("div", "class", "NS-projects-reward");
pub const TIER_HEADING: NodeSelector = NodeSelector::tag("h5");
pub const TIER_BACKERS: NodeSelector = NodeSelector::attr_contains("span", "class", "num-backers");
pub const TIER_LIMITED: NodeSelector =
    NodeSelector::attr_contains("span", "class", "limited-number");
pub const TIER_SOLD_OUT: NodeSelector = NodeSelector::attr_contains("span", "class", "sold-out");
pub const TIER_DESCRIPTION: NodeSelector = NodeSelector::attr_contains("div", "class", "desc");
