//! Tag + attribute-substring node selection.

use std::fmt;

use scraper::node::Element;
use tracing::trace;

use super::Node;
use crate::error::ExtractionError;

/// Attribute predicate of a [`NodeSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeMatch {
    /// Attribute name.
    pub name: &'static str,
    /// Substring the attribute value must contain. Empty means the
    /// attribute only has to be present.
    pub needle: &'static str,
}

/// Selects descendant elements by tag name and, optionally, by a
/// substring of one attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSelector {
    tag: &'static str,
    attribute: Option<AttributeMatch>,
}

impl NodeSelector {
    /// Match every element with the given tag.
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            attribute: None,
        }
    }

    /// Match elements with the given tag whose `name` attribute contains
    /// `needle`.
    pub const fn attr_contains(
        tag: &'static str,
        name: &'static str,
        needle: &'static str,
    ) -> Self {
        Self {
            tag,
            attribute: Some(AttributeMatch { name, needle }),
        }
    }

    /// Match elements with the given tag carrying attribute `name`.
    pub const fn attr_present(tag: &'static str, name: &'static str) -> Self {
        Self::attr_contains(tag, name, "")
    }

    /// Whether `element` satisfies this selector.
    pub fn matches(&self, element: &Element) -> bool {
        if !element.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }

        match self.attribute {
            None => true,
            Some(AttributeMatch { name, needle }) => element
                .attr(name)
                .is_some_and(|value| value.contains(needle)),
        }
    }

    /// All matching descendants of `root` in document order.
    pub fn select<'a>(&self, root: Node<'a>) -> Vec<Node<'a>> {
        root.select(self)
    }

    /// First matching descendant of `root`; no match is a
    /// [`ExtractionError::SelectorMiss`] reported against `field`.
    pub fn first<'a>(&self, root: Node<'a>, field: &str) -> Result<Node<'a>, ExtractionError> {
        root.select_iter(self).next().ok_or_else(|| {
            trace!("Selector {} matched nothing for {}", self, field);
            ExtractionError::selector_miss(field, self)
        })
    }

    /// First matching descendant of `root`, for nodes that may be absent.
    pub fn find<'a>(&self, root: Node<'a>) -> Option<Node<'a>> {
        root.select_iter(self).next()
    }

    /// Whether at least one descendant of `root` matches. Absence is a
    /// normal outcome, not an error.
    pub fn is_present(&self, root: Node<'_>) -> bool {
        root.select_iter(self).next().is_some()
    }
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            None => write!(f, "{}", self.tag),
            Some(AttributeMatch { name, needle: "" }) => write!(f, "{}[{}]", self.tag, name),
            Some(AttributeMatch { name, needle }) => {
                write!(f, "{}[{}*=\"{}\"]", self.tag, name, needle)
            }
        }
    }
}
