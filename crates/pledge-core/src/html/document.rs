//! Parsed document and node handles backed by `scraper`.

use std::ops::Deref;

use scraper::{ElementRef, Html};
use tracing::trace;

use super::{NodeSelector, Result};
use crate::error::{ExtractionError, ParseError};

/// Raw tree node as exposed by `scraper`.
type TreeNode<'a> = <ElementRef<'a> as Deref>::Target;

/// An immutable parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup into a document tree.
    ///
    /// The HTML5 parser recovers from nearly everything, so only markup
    /// with no content at all is rejected.
    pub fn parse(markup: &str) -> Result<Self> {
        if markup.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let html = Html::parse_document(markup);
        let has_root = html.tree.root().children().any(|c| c.value().is_element());
        if !has_root {
            return Err(ParseError::NoRoot);
        }

        trace!("Parsed document with {} parser diagnostics", html.errors.len());
        Ok(Self { html })
    }

    /// The root element of the document (`<html>`).
    pub fn root(&self) -> Node<'_> {
        Node::new(self.html.root_element())
    }

    /// Select all descendants of the root matching `selector`.
    pub fn select(&self, selector: &NodeSelector) -> Vec<Node<'_>> {
        self.root().select(selector)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root().tag())
            .finish()
    }
}

/// Handle on one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &'a str {
        self.element.value().name()
    }

    /// Attribute value, if present.
    pub fn attr_opt(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Attribute value; absence is an extraction failure for `field`.
    pub fn attr(&self, name: &str, field: &str) -> std::result::Result<&'a str, ExtractionError> {
        self.attr_opt(name)
            .ok_or_else(|| ExtractionError::MissingAttribute {
                field: field.to_string(),
                attribute: name.to_string(),
            })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn inner_text(&self) -> String {
        self.element.text().collect()
    }

    /// Serialized markup of the children.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Descendant elements matching `selector`, in document order.
    /// The node itself is never part of the result.
    pub fn select(&self, selector: &NodeSelector) -> Vec<Node<'a>> {
        self.select_iter(selector).collect()
    }

    pub(crate) fn select_iter(
        &self,
        selector: &NodeSelector,
    ) -> impl Iterator<Item = Node<'a>> + use<'a> {
        let selector = *selector;
        self.element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(move |el| selector.matches(el.value()))
            .map(Node::new)
    }

    /// All child nodes, text and comments included, in document order.
    pub fn child_nodes(&self) -> Vec<ChildNode<'a>> {
        self.element.children().map(ChildNode::from_tree).collect()
    }

    /// Child node at `index`, counting text and comment nodes.
    pub fn child(&self, index: usize) -> Option<ChildNode<'a>> {
        self.element.children().nth(index).map(ChildNode::from_tree)
    }

    /// All descendant nodes (text included) in document order, excluding
    /// the node itself.
    pub fn descendant_nodes(&self) -> Vec<ChildNode<'a>> {
        self.element
            .descendants()
            .skip(1)
            .map(ChildNode::from_tree)
            .collect()
    }
}

/// Any node of the tree, as reached by positional navigation.
#[derive(Debug, Clone, Copy)]
pub enum ChildNode<'a> {
    /// An element.
    Element(Node<'a>),
    /// A text node, whitespace-only runs included.
    Text(&'a str),
    /// Comments, doctypes and processing instructions.
    Other,
}

impl<'a> ChildNode<'a> {
    fn from_tree(node: TreeNode<'a>) -> Self {
        match node.value() {
            scraper::Node::Text(text) => ChildNode::Text(&**text),
            scraper::Node::Element(_) => ElementRef::wrap(node)
                .map(|el| ChildNode::Element(Node::new(el)))
                .unwrap_or(ChildNode::Other),
            _ => ChildNode::Other,
        }
    }

    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<Node<'a>> {
        match self {
            ChildNode::Element(node) => Some(*node),
            _ => None,
        }
    }

    /// Child node at `index`; text and comment nodes have no children.
    pub fn child(&self, index: usize) -> Option<ChildNode<'a>> {
        self.as_element().and_then(|node| node.child(index))
    }

    /// Inner markup for elements, raw text for text nodes.
    pub fn inner_html(&self) -> String {
        match self {
            ChildNode::Element(node) => node.inner_html(),
            ChildNode::Text(text) => (*text).to_string(),
            ChildNode::Other => String::new(),
        }
    }

    /// Text content of the node.
    pub fn inner_text(&self) -> String {
        match self {
            ChildNode::Element(node) => node.inner_text(),
            ChildNode::Text(text) => (*text).to_string(),
            ChildNode::Other => String::new(),
        }
    }
}
