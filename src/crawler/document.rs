//! Navigable document tree handed from the page fetcher to link extraction
//!
//! Only the element structure of a page is kept: tag names, attributes in
//! source order and children in document order. Text and comments carry no
//! links and are dropped during conversion.

use scraper::{ElementRef, Html};

/// A single `key="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// What a node in the tree represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root above `<html>`
    Document,

    /// An element with its tag name and attributes
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
}

/// A node and its ordered children
///
/// Trees built from real pages can be nested arbitrarily deep, so nothing in
/// this module walks them recursively, dropping included.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an element node without children
    pub fn element(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            kind: NodeKind::Element {
                name: name.into(),
                attributes,
            },
            children: Vec::new(),
        }
    }

    /// Appends a child, builder style
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the tag name if this node is an element
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Document => None,
        }
    }

    /// Returns the attributes of an element, empty for the document root
    pub fn attributes(&self) -> &[Attribute] {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Document => &[],
        }
    }
}

/// A parsed page. The root is absent when the fetcher had nothing to parse.
#[derive(Debug, Default)]
pub struct Document {
    root: Option<Node>,
}

impl Document {
    /// A document with no content at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an already built tree
    pub fn from_root(root: Node) -> Self {
        Self { root: Some(root) }
    }

    /// Parses HTML text into a document tree
    ///
    /// HTML parsing is error tolerant, so this never fails: malformed markup
    /// yields whatever tree the parser recovers.
    pub fn parse_html(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let root = Node {
            kind: NodeKind::Document,
            children: vec![convert_tree(parsed.root_element())],
        };
        Self::from_root(root)
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Copies the element structure below `root` without recursing
fn convert_tree(root: ElementRef<'_>) -> Node {
    // Pre-order list of (parent index, node); a parent always precedes its children
    let mut nodes: Vec<(usize, Node)> = vec![(0, convert_element(root))];
    let mut pending: Vec<(usize, ElementRef<'_>)> = child_elements(root)
        .into_iter()
        .rev()
        .map(|child| (0, child))
        .collect();

    while let Some((parent, element)) = pending.pop() {
        let index = nodes.len();
        nodes.push((parent, convert_element(element)));
        pending.extend(child_elements(element).into_iter().rev().map(|child| (index, child)));
    }

    // Every descendant sits after its ancestor, so popping from the back
    // completes a node before it is attached. Children arrive last first.
    while nodes.len() > 1 {
        let Some((parent, mut node)) = nodes.pop() else {
            break;
        };
        node.children.reverse();
        nodes[parent].1.children.push(node);
    }

    let (_, mut root) = nodes.remove(0);
    root.children.reverse();
    root
}

fn child_elements(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap).collect()
}

fn convert_element(element: ElementRef<'_>) -> Node {
    let value = element.value();
    Node::element(
        value.name(),
        value
            .attrs()
            .map(|(key, value)| Attribute::new(key, value))
            .collect(),
    )
}
