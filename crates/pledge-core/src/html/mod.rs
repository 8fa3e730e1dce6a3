//! HTML document module.
//!
//! Wraps `scraper` behind a small capability surface: selecting
//! descendants by tag and attribute, reading attributes, reading text and
//! walking child nodes by position. Extraction rules only ever see these
//! types, never `scraper` directly.

mod document;
mod selector;

pub use document::{ChildNode, Document, Node};
pub use selector::{AttributeMatch, NodeSelector};

use crate::error::ParseError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, ParseError>;
