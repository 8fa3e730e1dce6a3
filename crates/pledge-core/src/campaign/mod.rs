//! Campaign record extraction module.

mod parser;
pub mod rules;

pub use parser::{CampaignParser, ExtractionResult, PageParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
