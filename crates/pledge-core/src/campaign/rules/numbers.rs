//! Numeric parsing for funding figures, counts and pledge headings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use super::patterns::PLEDGE_AMOUNT;
use crate::campaign::Result;
use crate::error::ExtractionError;

/// Parse a non-negative decimal amount, e.g. `"1500.00"`.
pub fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|e| ExtractionError::format(field, text, e.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ExtractionError::format(field, text, "negative amount"));
    }
    Ok(value)
}

/// Parse a decimal and drop its fractional part, e.g. `"2000.75"` -> 2000.
pub fn parse_truncated(field: &str, text: &str) -> Result<u64> {
    parse_decimal(field, text)?
        .trunc()
        .to_u64()
        .ok_or_else(|| ExtractionError::format(field, text, "out of range"))
}

/// Parse a whole count, tolerating thousands separators, e.g. `"1,204"`.
pub fn parse_count(field: &str, text: &str) -> Result<u64> {
    let digits = text.trim().replace(',', "");
    digits
        .parse::<u64>()
        .map_err(|e| ExtractionError::format(field, text, e.to_string()))
}

/// Amount from a pledge heading: the first run of digits, optionally
/// grouped with commas.
///
/// `"Pledge $5,000 or more"` gives 5000.
pub fn parse_pledge_amount(text: &str) -> Option<u64> {
    let run = PLEDGE_AMOUNT.find(text)?;
    run.as_str().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(
            parse_decimal("total_funding", "1500.00").unwrap(),
            Decimal::from_str("1500.00").unwrap()
        );
        assert_eq!(
            parse_decimal("total_funding", " 12.5 ").unwrap(),
            Decimal::from_str("12.5").unwrap()
        );
        assert_eq!(parse_decimal("total_funding", "0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_decimal("total_funding", "n/a"),
            Err(ExtractionError::Format { .. })
        ));
        assert!(matches!(
            parse_decimal("total_funding", "-5"),
            Err(ExtractionError::Format { .. })
        ));
    }

    #[test]
    fn test_parse_truncated() {
        assert_eq!(parse_truncated("funding_goal", "2000").unwrap(), 2000);
        assert_eq!(parse_truncated("funding_goal", "2000.0").unwrap(), 2000);
        assert_eq!(parse_truncated("funding_goal", "2000.99").unwrap(), 2000);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("backers", "5").unwrap(), 5);
        assert_eq!(parse_count("backers", "1,204").unwrap(), 1204);
        assert!(parse_count("backers", "five").is_err());
    }

    #[test]
    fn test_parse_pledge_amount() {
        assert_eq!(parse_pledge_amount("Pledge $5,000 or more"), Some(5000));
        assert_eq!(parse_pledge_amount("Pledge $25 or more"), Some(25));
        assert_eq!(parse_pledge_amount("Pledge €1,250,000 or more"), Some(1_250_000));
        assert_eq!(parse_pledge_amount("Pledge what you like"), None);
    }
}
