//! HTML5 parser using html5ever
//!
//! html5ever implements the WHATWG parsing algorithm, so malformed markup
//! (unclosed tags, misnested inline elements, stray end tags) is repaired the
//! same way a browser would repair it. The resulting `RcDom` is lowered into
//! the owned [`Node`] tree the rest of the crate works on.
//!
//! # Examples
//!
//! ```rust
//! use html_markdown_converter::parser::parse_html;
//!
//! let tree = parse_html("<h1>Hello").expect("parser repairs unclosed tags");
//! assert_eq!(tree.tag(), Some("html"));
//! assert_eq!(tree.text_content(), "Hello");
//! ```
//!
//! Comments, doctypes and processing instructions are dropped during lowering.
//! Entities are already decoded in text and attribute values.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ConversionError;
use crate::limits::InputLimits;
use crate::node::{Element, Node};

/// Parse an HTML document into a node tree with default limits
///
/// The root of the returned tree is always the `html` element.
///
/// # Errors
///
/// Returns `ConversionError::ParseError` when element nesting exceeds
/// [`DEFAULT_MAX_NESTING_DEPTH`](crate::limits::DEFAULT_MAX_NESTING_DEPTH).
pub fn parse_html(html: &str) -> Result<Node, ConversionError> {
    parse_html_with_limits(html, &InputLimits::default())
}

/// Parse an HTML document into a node tree
///
/// Only the nesting limit is applied here; input size is checked by callers
/// before the text is decoded.
pub fn parse_html_with_limits(html: &str, limits: &InputLimits) -> Result<Node, ConversionError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|child| is_element(child, "html"))
        .cloned();

    match root {
        Some(html_element) => lower(&html_element, 1, limits),
        None => Ok(Node::element("html")),
    }
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(handle.data, NodeData::Element { ref name, .. } if name.local.as_ref() == tag)
}

/// Convert an RcDom handle into an owned node, or `None` for node kinds that
/// never render (comments, doctypes, processing instructions)
fn lower_child(
    handle: &Handle,
    depth: usize,
    limits: &InputLimits,
) -> Result<Option<Node>, ConversionError> {
    match handle.data {
        NodeData::Text { ref contents } => Ok(Some(Node::Text(contents.borrow().to_string()))),
        NodeData::Element { .. } => lower(handle, depth, limits).map(Some),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => Ok(None),
    }
}

fn lower(handle: &Handle, depth: usize, limits: &InputLimits) -> Result<Node, ConversionError> {
    limits.check_depth(depth)?;

    let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    else {
        return Ok(Node::Text(String::new()));
    };

    let mut element = Element::new(name.local.as_ref());
    for attr in attrs.borrow().iter() {
        element.attributes.insert(
            attr.name.local.as_ref().to_ascii_lowercase(),
            attr.value.to_string(),
        );
    }

    for child in handle.children.borrow().iter() {
        if let Some(node) = lower_child(child, depth + 1, limits)? {
            element.children.push(node);
        }
    }

    Ok(Node::Element(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(tree: &Node) -> &Element {
        tree.as_element()
            .and_then(|html| html.element_children().find(|e| e.tag == "body"))
            .expect("body element")
    }

    #[test]
    fn test_parse_simple_html() {
        let tree = parse_html("<html><body><h1>Hello</h1></body></html>").expect("parse");
        let body = body(&tree);
        assert_eq!(body.children, vec![Node::element("h1").with_child(Node::text("Hello"))]);
    }

    #[test]
    fn test_parse_fragment_gets_html_root() {
        let tree = parse_html("<div><p>Content</p></div>").expect("parse");
        assert_eq!(tree.tag(), Some("html"));
        assert_eq!(body(&tree).children[0].tag(), Some("div"));
    }

    #[test]
    fn test_parse_empty_input() {
        let tree = parse_html("").expect("empty input is a valid document");
        assert_eq!(tree.tag(), Some("html"));
        assert_eq!(tree.text_content(), "");
    }

    #[test]
    fn test_parse_malformed_html() {
        let tree = parse_html("<p>one<p>two").expect("parse");
        let body = body(&tree);
        assert_eq!(body.element_children().count(), 2);
    }

    #[test]
    fn test_parse_misnested_tags() {
        let tree = parse_html("<b><i>text</b></i>").expect("parse");
        assert_eq!(tree.text_content(), "text");
    }

    #[test]
    fn test_entities_are_decoded() {
        let tree = parse_html("<p>&lt;tag&gt; &amp; &quot;q&quot;</p>").expect("parse");
        assert_eq!(tree.text_content(), "<tag> & \"q\"");
    }

    #[test]
    fn test_comments_and_doctype_are_dropped() {
        let tree =
            parse_html("<!DOCTYPE html><html><!-- c --><body><p>Text<!-- x --></p></body></html>")
                .expect("parse");
        let p = &body(&tree).children[0];
        assert_eq!(p.as_element().expect("p").children, vec![Node::text("Text")]);
    }

    #[test]
    fn test_attributes_are_kept() {
        let tree = parse_html("<a HREF=\"/x\" title=\"T\">link</a>").expect("parse");
        let a = body(&tree).element_children().next().expect("a");
        assert_eq!(a.attr("href"), Some("/x"));
        assert_eq!(a.attr("title"), Some("T"));
    }

    #[test]
    fn test_preformatted_text_is_verbatim() {
        let tree = parse_html("<pre>  a\n    b</pre>").expect("parse");
        assert_eq!(tree.text_content(), "  a\n    b");
    }

    #[test]
    fn test_nesting_limit() {
        let limits = InputLimits {
            max_nesting_depth: 10,
            ..Default::default()
        };
        let html = "<div>".repeat(20);
        let result = parse_html_with_limits(&html, &limits);
        assert!(matches!(result, Err(ConversionError::ParseError(_))));

        let shallow = "<div>".repeat(3);
        assert!(parse_html_with_limits(&shallow, &limits).is_ok());
    }

    proptest! {
        #[test]
        fn prop_malformed_html_no_crash(
            tag in prop::sample::select(vec!["div", "p", "span", "h1", "ul", "li", "table", "tr", "td"]),
            content in "[a-zA-Z0-9 ]{0,100}",
            close_tag in prop::bool::ANY,
            add_invalid_nesting in prop::bool::ANY,
        ) {
            let mut html = format!("<{}>{}", tag, content);
            if close_tag {
                html.push_str(&format!("</{}>", tag));
            }
            if add_invalid_nesting {
                html.push_str("<p><div>Invalid nesting</div></p>");
            }

            let tree = parse_html(&html);
            prop_assert!(tree.is_ok(), "Parser should repair: {}", html);
        }

        #[test]
        fn prop_text_survives_parsing(content in "[a-zA-Z0-9]{1,50}") {
            let html = format!("<html><body><p>{}</p></body></html>", content);
            let tree = parse_html(&html).expect("parse");
            prop_assert_eq!(tree.text_content(), content);
        }

        #[test]
        fn prop_deeply_nested_handled(depth in 1usize..100usize) {
            let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
            let tree = parse_html(&html);
            prop_assert!(tree.is_ok(), "Parser should handle depth {}", depth);
        }
    }
}
