//! Common regex patterns for campaign text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Pledge amount in a tier heading, e.g. "Pledge $5,000 or more"
    pub static ref PLEDGE_AMOUNT: Regex = Regex::new(
        r"[0-9]+(,[0-9]+)*"
    ).unwrap();

    // Trailing time zone abbreviation, e.g. "EST" or "UTC"
    pub static ref ZONE_SUFFIX: Regex = Regex::new(
        r"\s+[A-Z]{2,5}$"
    ).unwrap();

    // Ordinal day suffix, e.g. "15th"
    pub static ref ORDINAL_DAY: Regex = Regex::new(
        r"\b(\d{1,2})(?:st|nd|rd|th)\b"
    ).unwrap();
}
