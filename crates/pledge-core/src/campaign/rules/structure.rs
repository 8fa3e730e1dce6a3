//! Structural extraction: values found by child position rather than by a
//! marker of their own.
//!
//! These rules depend on the exact shape of the page markup, whitespace
//! text nodes included. Every index lives here so that a markup change is
//! a change to this module only.

use chrono::NaiveDateTime;

use super::dates::parse_timestamp;
use super::selectors::{CATEGORY, ENDS, POSTED};
use super::FieldExtractor;
use crate::campaign::Result;
use crate::error::ExtractionError;
use crate::html::{ChildNode, Node, NodeSelector};

/// Position of the date text among the child nodes of the launch and
/// close containers.
pub const DATE_CHILD_INDEX: usize = 4;

/// Path from the category container to the label: second child node of
/// its second child node.
pub const CATEGORY_LABEL_PATH: [usize; 2] = [1, 1];

pub const START_DATE: ChildPathExtractor =
    ChildPathExtractor::new("start_date", POSTED, &[DATE_CHILD_INDEX]);
pub const END_DATE: ChildPathExtractor =
    ChildPathExtractor::new("end_date", ENDS, &[DATE_CHILD_INDEX]);
pub const CATEGORY_LABEL: ChildPathExtractor =
    ChildPathExtractor::new("category", CATEGORY, &CATEGORY_LABEL_PATH);

/// Follows a fixed path of child-node indices below the first matching
/// container and returns the inner HTML found there.
#[derive(Debug, Clone, Copy)]
pub struct ChildPathExtractor {
    field: &'static str,
    selector: NodeSelector,
    path: &'static [usize],
}

impl ChildPathExtractor {
    pub const fn new(field: &'static str, selector: NodeSelector, path: &'static [usize]) -> Self {
        Self {
            field,
            selector,
            path,
        }
    }

    fn walk<'a>(&self, container: Node<'a>) -> Option<ChildNode<'a>> {
        let (first, rest) = self.path.split_first()?;
        rest.iter()
            .try_fold(container.child(*first)?, |node, index| node.child(*index))
    }
}

impl FieldExtractor for ChildPathExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        self.field
    }

    fn extract(&self, root: Node<'_>) -> Result<String> {
        let container = self.selector.first(root, self.field)?;
        let node = self.walk(container).ok_or_else(|| {
            ExtractionError::selector_miss(
                self.field,
                format!("{} child path {:?}", self.selector, self.path),
            )
        })?;
        Ok(node.inner_html())
    }
}

/// Campaign launch date.
pub fn extract_start_date(root: Node<'_>) -> Result<NaiveDateTime> {
    extract_timestamp(&START_DATE, root)
}

/// Campaign close date.
pub fn extract_end_date(root: Node<'_>) -> Result<NaiveDateTime> {
    extract_timestamp(&END_DATE, root)
}

/// Category label.
pub fn extract_category(root: Node<'_>) -> Result<String> {
    Ok(CATEGORY_LABEL.extract(root)?.trim().to_string())
}

fn extract_timestamp(extractor: &ChildPathExtractor, root: Node<'_>) -> Result<NaiveDateTime> {
    let raw = extractor.extract(root)?;
    let text = raw.replace('\n', "");
    parse_timestamp(&text).ok_or_else(|| {
        ExtractionError::format(extractor.field(), text.as_str(), "unrecognized date")
    })
}
