//! Error types for the pledge-core library.

use thiserror::Error;

/// Main error type for the pledge library.
#[derive(Error, Debug)]
pub enum PledgeError {
    /// Page retrieval error.
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// Markup parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Campaign field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A page URL that does not parse.
    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        source: url::ParseError,
    },
}

/// Errors raised while fetching a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Connection, TLS or body read failure.
    #[error("network failure for {url}: {message}")]
    Network { url: String, message: String },

    /// The request did not complete in time.
    #[error("timed out fetching {url}")]
    Timeout { url: String },
}

/// Errors raised while turning markup into a document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Markup was empty or whitespace only.
    #[error("markup is empty")]
    Empty,

    /// The parsed tree has no root element.
    #[error("document has no root element")]
    NoRoot,
}

/// Errors related to campaign field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No node matched a selector whose match is required.
    #[error("no node matching `{selector}` for {field}")]
    SelectorMiss { field: String, selector: String },

    /// The node was found but lacks the attribute holding the value.
    #[error("attribute `{attribute}` missing for {field}")]
    MissingAttribute { field: String, attribute: String },

    /// The node text does not have the expected shape.
    #[error("failed to parse {field} from {value:?}: {reason}")]
    Format {
        field: String,
        value: String,
        reason: String,
    },

    /// A record builder was finished with a field left unset.
    #[error("missing required field: {0}")]
    MissingField(String),
}

impl ExtractionError {
    pub fn selector_miss(field: impl Into<String>, selector: impl std::fmt::Display) -> Self {
        Self::SelectorMiss {
            field: field.into(),
            selector: selector.to_string(),
        }
    }

    pub fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for the pledge library.
pub type Result<T> = std::result::Result<T, PledgeError>;
