//! Node tree consumed by the filter and the renderer.
//!
//! The parser lowers html5ever's reference-counted DOM into this owned tree:
//! a parent exclusively owns its children, there is no sharing and no parent
//! pointers. Trees can also be built by hand, which is how most renderer tests
//! are written.

use std::collections::BTreeMap;

/// A unit of the parsed HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with tag name, attributes and children
    Element(Element),
    /// A run of entity-decoded text
    Text(String),
}

/// Element payload of [`Node::Element`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name (e.g. `"p"`, `"h1"`)
    pub tag: String,
    /// Attribute name to value
    pub attributes: BTreeMap<String, String>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create an element node with no attributes or children
    pub fn element(tag: &str) -> Self {
        Node::Element(Element::new(tag))
    }

    /// Create a text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Builder: add a child (no-op on text nodes)
    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Element(ref mut element) = self {
            element.children.push(child);
        }
        self
    }

    /// Builder: add several children (no-op on text nodes)
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element(ref mut element) = self {
            element.children.extend(children);
        }
        self
    }

    /// Builder: set an attribute (no-op on text nodes)
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let Node::Element(ref mut element) = self {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
        self
    }

    /// The element payload, if this is an element
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Tag name for elements, `None` for text
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|element| element.tag.as_str())
    }

    /// True for text nodes consisting only of HTML whitespace
    pub fn is_blank_text(&self) -> bool {
        match self {
            Node::Text(content) => content.chars().all(|c| c.is_ascii_whitespace()),
            Node::Element(_) => false,
        }
    }

    /// All descendant text concatenated, without any normalization
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Element(element) => element.text_content(),
        }
    }
}

impl Element {
    /// Create an empty element; the tag is stored lowercase
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over element children only
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// All descendant text concatenated, without any normalization
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text(&mut output);
        output
    }

    fn collect_text(&self, output: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(content) => output.push_str(content),
                Node::Element(element) => element.collect_text(output),
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
