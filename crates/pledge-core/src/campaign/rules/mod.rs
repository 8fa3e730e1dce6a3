//! Rule-based field extractors for campaign pages.
//!
//! Every rule selects candidate nodes with a [`NodeSelector`] and takes the
//! first one in document order. A missing node is fatal unless the rule is
//! a presence check.

pub mod dates;
pub mod funding;
pub mod metadata;
pub mod numbers;
pub mod patterns;
pub mod selectors;
pub mod structure;
pub mod tiers;

pub use dates::parse_timestamp;
pub use funding::{
    extract_backers, extract_funding_goal, extract_funding_succeeded, extract_total_funding,
};
pub use metadata::{
    extract_company, extract_currency, extract_description, extract_link, extract_name,
};
pub use numbers::{parse_count, parse_decimal, parse_pledge_amount, parse_truncated};
pub use structure::{extract_category, extract_end_date, extract_start_date};
pub use tiers::{extract_level, extract_levels, LevelsExtractor};

use super::Result;
use crate::html::{Node, NodeSelector};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Field name used in error reports.
    fn field(&self) -> &'static str;

    /// Extract the field from the subtree rooted at `root`.
    fn extract(&self, root: Node<'_>) -> Result<Self::Output>;
}

/// Reads one attribute off the first matching node.
#[derive(Debug, Clone, Copy)]
pub struct AttributeExtractor {
    field: &'static str,
    selector: NodeSelector,
    attribute: &'static str,
}

impl AttributeExtractor {
    pub const fn new(field: &'static str, selector: NodeSelector, attribute: &'static str) -> Self {
        Self {
            field,
            selector,
            attribute,
        }
    }
}

impl FieldExtractor for AttributeExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.field
    }

    fn extract(&self, root: Node<'_>) -> Result<String> {
        let node = self.selector.first(root, self.field)?;
        Ok(node.attr(self.attribute, self.field)?.to_string())
    }
}

/// Reads the trimmed text of the first matching node.
#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    field: &'static str,
    selector: NodeSelector,
}

impl TextExtractor {
    pub const fn new(field: &'static str, selector: NodeSelector) -> Self {
        Self { field, selector }
    }
}

impl FieldExtractor for TextExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.field
    }

    fn extract(&self, root: Node<'_>) -> Result<String> {
        let node = self.selector.first(root, self.field)?;
        Ok(node.inner_text().trim().to_string())
    }
}

/// True iff any node matches. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct PresenceExtractor {
    field: &'static str,
    selector: NodeSelector,
}

impl PresenceExtractor {
    pub const fn new(field: &'static str, selector: NodeSelector) -> Self {
        Self { field, selector }
    }
}

impl FieldExtractor for PresenceExtractor {
    type Output = bool;

    fn field(&self) -> &'static str {
        self.field
    }

    fn extract(&self, root: Node<'_>) -> Result<bool> {
        Ok(self.selector.is_present(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::html::Document;

    const MARKUP: &str = r#"<html><head>
<meta property="og:title" content="Widget">
<meta property="og:image">
</head><body><a data-modal-class="modal_project_by"> Widget Co </a></body></html>"#;

    #[test]
    fn test_attribute_extractor() {
        let doc = Document::parse(MARKUP).unwrap();
        let name = AttributeExtractor::new("name", selectors::OG_TITLE, "content");
        assert_eq!(name.extract(doc.root()).unwrap(), "Widget");
    }

    #[test]
    fn test_attribute_extractor_missing_attribute() {
        let doc = Document::parse(MARKUP).unwrap();
        let image = AttributeExtractor::new(
            "image",
            NodeSelector::attr_contains("meta", "property", "og:image"),
            "content",
        );

        assert!(matches!(
            image.extract(doc.root()),
            Err(ExtractionError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_text_extractor_trims() {
        let doc = Document::parse(MARKUP).unwrap();
        let company = TextExtractor::new("company", selectors::PROJECT_BY);
        assert_eq!(company.extract(doc.root()).unwrap(), "Widget Co");
    }

    #[test]
    fn test_presence_extractor() {
        let doc = Document::parse(MARKUP).unwrap();
        let banner = PresenceExtractor::new("funding_succeeded", selectors::SUCCESS_BANNER);
        let title = PresenceExtractor::new("has_title", selectors::OG_TITLE);

        assert!(!banner.extract(doc.root()).unwrap());
        assert!(title.extract(doc.root()).unwrap());
    }
}
