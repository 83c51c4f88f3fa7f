//! Tag filtering tests
//!
//! Filtered elements must vanish from the output together with everything
//! inside them, while the surrounding content renders unchanged.

use html_markdown_converter::node::Node;
use html_markdown_converter::{ConversionOptions, FilterSet, convert, filter, parse_html, render};

fn md_filtered(html: &str, tags: &[&str]) -> String {
    let options = ConversionOptions {
        filter_tags: tags.iter().collect(),
        ..Default::default()
    };
    convert(html, &options).expect("Failed to convert")
}

#[test]
fn test_script_sibling_removed() {
    let html = r#"<html><body>
        <p>Before dangerous element</p>
        <script>alert('xss')</script>
        <p>After dangerous element</p>
    </body></html>"#;

    let markdown = md_filtered(html, &["script"]);
    assert!(!markdown.contains("alert"));
    assert_eq!(
        markdown,
        "Before dangerous element\n\nAfter dangerous element\n\n"
    );
}

#[test]
fn test_inline_script_removed() {
    let markdown = md_filtered(
        "<p>Text <script>malicious()</script> more text</p>",
        &["script"],
    );
    assert_eq!(markdown, "Text more text\n\n");
}

#[test]
fn test_unfiltered_script_renders_as_text() {
    assert_eq!(md_filtered("<p>a<script>b()</script></p>", &[]), "ab()\n\n");
}

#[test]
fn test_nested_subtree_removed() {
    let html = "<div><nav><ul><li>Home</li><li>About</li></ul></nav><p>Body</p></div>";
    assert_eq!(md_filtered(html, &["nav"]), "Body\n\n");
}

#[test]
fn test_filter_is_case_insensitive() {
    let html = "<p>keep</p><STYLE>p { color: red }</STYLE>";
    assert_eq!(md_filtered(html, &["Style"]), "keep\n\n");
}

#[test]
fn test_non_content_set() {
    let html = r#"<html><head><meta charset="utf-8"><link rel="stylesheet" href="a.css">
        <style>.class{}</style></head>
        <body><noscript>Enable JavaScript</noscript><p>Text</p>
        <script>track()</script></body></html>"#;
    let options = ConversionOptions {
        filter_tags: FilterSet::non_content(),
        ..Default::default()
    };
    assert_eq!(convert(html, &options).expect("Failed to convert"), "Text\n\n");
}

#[test]
fn test_filter_inside_list_item_keeps_empty_item() {
    let html = "<ol><li>one</li><li class=\"ad\"><aside>ad</aside></li><li>two</li></ol>";
    assert_eq!(md_filtered(html, &["aside"]), "1. one\n2.\n3. two\n\n");
    assert_eq!(md_filtered(html, &["li"]), "");
}

#[test]
fn test_filter_then_render_by_hand() {
    let tree = parse_html("<p>Hello<span>, hidden</span> world</p>").expect("Failed to parse");
    let tags: FilterSet = ["span"].into_iter().collect();
    let pruned = filter(tree, &tags);
    assert_eq!(render(&pruned), "Hello world\n\n");
}

#[test]
fn test_filtered_root_renders_nothing() {
    let tree = Node::element("section").with_child(Node::text("gone"));
    let tags: FilterSet = ["section"].into_iter().collect();
    assert_eq!(render(&filter(tree, &tags)), "");
}

#[test]
fn test_text_nodes_are_never_filtered() {
    let tree = Node::element("div").with_children([Node::text("script"), Node::text(" style")]);
    let tags: FilterSet = ["script", "style"].into_iter().collect();
    assert_eq!(render(&filter(tree, &tags)), "script style\n\n");
}
