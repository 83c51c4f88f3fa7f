//! Tag filtering pre-pass
//!
//! Removes every element whose tag is in a [`FilterSet`], together with its
//! whole subtree, before the tree reaches the renderer. Text nodes are never
//! removed, sibling order is untouched and adjacent text nodes are not merged.

use std::collections::BTreeSet;

use crate::node::{Element, Node};

/// Elements whose content never reads as prose
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "meta", "link"];

/// An immutable set of lowercase tag names
///
/// An empty set disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    tags: BTreeSet<String>,
}

impl FilterSet {
    /// An empty set (no filtering)
    pub fn new() -> Self {
        Self::default()
    }

    /// The non-content tags: `script`, `style`, `noscript`, `meta`, `link`
    pub fn non_content() -> Self {
        NON_CONTENT_TAGS.iter().collect()
    }

    /// Check whether a tag is filtered (case-insensitive)
    pub fn contains(&self, tag: &str) -> bool {
        if tag.bytes().any(|b| b.is_ascii_uppercase()) {
            self.tags.contains(&tag.to_ascii_lowercase())
        } else {
            self.tags.contains(tag)
        }
    }

    /// True when the set disables filtering
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Return a new set containing the tags of both sets
    pub fn union(&self, other: &FilterSet) -> FilterSet {
        Self {
            tags: self.tags.union(&other.tags).cloned().collect(),
        }
    }

    /// Iterate over the tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

/// Remove filtered elements and their subtrees
///
/// Returns the pruned tree. If the root itself is filtered the result is an
/// empty text node, which renders to nothing.
///
/// # Examples
///
/// ```
/// use html_markdown_converter::filter::{filter, FilterSet};
/// use html_markdown_converter::node::Node;
///
/// let tree = Node::element("body")
///     .with_child(Node::element("script").with_child(Node::text("alert(1)")))
///     .with_child(Node::element("p").with_child(Node::text("Hi")));
///
/// let tags: FilterSet = ["script"].into_iter().collect();
/// let pruned = filter(tree, &tags);
/// assert_eq!(pruned.text_content(), "Hi");
/// ```
pub fn filter(tree: Node, tags: &FilterSet) -> Node {
    if tags.is_empty() {
        return tree;
    }

    match tree {
        Node::Element(element) if tags.contains(&element.tag) => Node::Text(String::new()),
        Node::Element(mut element) => {
            let removed = prune(&mut element, tags);
            tracing::debug!(removed, "filtered elements");
            Node::Element(element)
        }
        text => text,
    }
}

/// Drop filtered children recursively, returning how many subtrees were removed
fn prune(element: &mut Element, tags: &FilterSet) -> usize {
    let before = element.children.len();
    element.children.retain(|child| match child {
        Node::Element(child) => !tags.contains(&child.tag),
        Node::Text(_) => true,
    });
    let mut removed = before - element.children.len();

    for child in element.children.iter_mut() {
        if let Node::Element(child) = child {
            removed += prune(child, tags);
        }
    }
    removed
}
