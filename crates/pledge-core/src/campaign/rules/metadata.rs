//! Page metadata: name, description, link, company and currency.

use url::Url;

use super::selectors::{CURRENCY, OG_DESCRIPTION, OG_TITLE, OG_URL, PROJECT_BY};
use super::{AttributeExtractor, FieldExtractor, TextExtractor};
use crate::campaign::Result;
use crate::error::ExtractionError;
use crate::html::Node;

pub const NAME: AttributeExtractor = AttributeExtractor::new("name", OG_TITLE, "content");
pub const DESCRIPTION: AttributeExtractor =
    AttributeExtractor::new("description", OG_DESCRIPTION, "content");
pub const LINK: AttributeExtractor = AttributeExtractor::new("link", OG_URL, "content");
pub const CURRENCY_CODE: AttributeExtractor =
    AttributeExtractor::new("currency", CURRENCY, "data-currency");
pub const COMPANY: TextExtractor = TextExtractor::new("company", PROJECT_BY);

/// Campaign title from the `og:title` meta tag.
pub fn extract_name(root: Node<'_>) -> Result<String> {
    NAME.extract(root)
}

/// Campaign blurb from the `og:description` meta tag.
pub fn extract_description(root: Node<'_>) -> Result<String> {
    DESCRIPTION.extract(root)
}

/// Canonical page URL from the `og:url` meta tag.
pub fn extract_link(root: Node<'_>) -> Result<Url> {
    let raw = LINK.extract(root)?;
    Url::parse(raw.trim())
        .map_err(|e| ExtractionError::format(LINK.field(), raw.as_str(), e.to_string()))
}

/// Currency code, unnormalized.
pub fn extract_currency(root: Node<'_>) -> Result<String> {
    CURRENCY_CODE.extract(root)
}

/// Name on the "project by" link.
pub fn extract_company(root: Node<'_>) -> Result<String> {
    COMPANY.extract(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::Document;

    const MARKUP: &str = r#"<html><head>
<meta property="og:title" content="Widget &amp; Co">
<meta property="og:description" content="The best widget.">
<meta property="og:url" content="https://www.kickstarter.com/projects/widget/widget">
</head><body>
<a href="/profile/widget-labs" data-modal-class="modal_project_by" data-modal-title="About">
  Widget Labs
</a>
<data itemprop="Project[pledged]" data-currency="GBP" data-value="1500.0">£1,500</data>
</body></html>"#;

    #[test]
    fn test_metadata_fields() {
        let doc = Document::parse(MARKUP).unwrap();
        let root = doc.root();

        assert_eq!(extract_name(root).unwrap(), "Widget & Co");
        assert_eq!(extract_description(root).unwrap(), "The best widget.");
        assert_eq!(extract_company(root).unwrap(), "Widget Labs");
        assert_eq!(extract_currency(root).unwrap(), "GBP");
        assert_eq!(
            extract_link(root).unwrap().as_str(),
            "https://www.kickstarter.com/projects/widget/widget"
        );
    }

    #[test]
    fn test_missing_title_is_selector_miss() {
        let doc = Document::parse("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(matches!(
            extract_name(doc.root()),
            Err(ExtractionError::SelectorMiss { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_malformed_link_is_format_error() {
        let doc = Document::parse(
            r#"<html><head><meta property="og:url" content="not a url"></head></html>"#,
        )
        .unwrap();

        assert!(matches!(
            extract_link(doc.root()),
            Err(ExtractionError::Format { ref field, .. }) if field == "link"
        ));
    }
}
