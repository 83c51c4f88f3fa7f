//! Markdown converter - renders a node tree as Markdown
//!
//! The renderer is a depth-first recursive walk over the (filtered) node tree.
//! Every call receives a [`RenderContext`] by value and returns the text for
//! its own subtree, which the caller appends to its output. Nothing is edited
//! after it has been appended: whitespace is normalized per text fragment
//! before it reaches the output, never in a pass over the finished document.
//!
//! # Block and inline content
//!
//! Elements are either *block* (headings, paragraphs, lists, fenced code,
//! blockquotes, tables, rules and containers such as `div`) or *inline*
//! (text, emphasis, links, code spans, images, line breaks). Loose inline
//! content inside a block container forms an implicit paragraph. Every block
//! ends with exactly one blank line, so blank lines never accumulate.
//!
//! Inline content is gathered into an inline run. A whitespace run between two
//! fragments becomes one space, whitespace at either end of a block disappears,
//! and adjacent fragments are concatenated with nothing in between, so CJK text
//! never picks up spurious spaces:
//!
//! ```rust
//! use html_markdown_converter::converter::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let markdown = converter.convert("<p>行1<br>行2</p>").expect("convert");
//! assert_eq!(markdown, "行1  \n行2\n\n");
//! ```
//!
//! # Lists
//!
//! Each `ul`/`ol` pushes a frame onto the context's list stack. Indentation is
//! four spaces per level beyond the first, derived only from the stack depth:
//!
//! ```rust
//! use html_markdown_converter::converter::MarkdownConverter;
//!
//! let markdown = MarkdownConverter::new()
//!     .convert("<ul><li>A<ul><li>B</li></ul></li></ul>")
//!     .expect("convert");
//! assert_eq!(markdown, "- A\n    - B\n\n");
//! ```
//!
//! With [`ConversionOptions::max_list_depth`] set, deeper levels are clamped
//! to the indentation of the deepest allowed level; their items are still
//! emitted.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::charset::decode_html;
use crate::error::ConversionError;
use crate::filter::{FilterSet, filter};
use crate::limits::InputLimits;
use crate::node::{Element, Node};
use crate::parser::parse_html_with_limits;
use crate::whitespace;

/// Elements that always start a new block
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "center",
    "dd",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "html",
    "li",
    "main",
    "menu",
    "nav",
    "noscript",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements that stay inline even when they wrap block content
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "big", "br", "cite", "code", "data", "del", "dfn", "em",
    "font", "i", "img", "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span",
    "strike", "strong", "sub", "sup", "time", "tt", "u", "var", "wbr",
];

/// Elements that are never rendered
const SKIPPED_TAGS: &[&str] = &["head", "title", "template"];

/// Blocks kept as indented continuation blocks inside list items
const CONTINUATION_TAGS: &[&str] = &["pre", "blockquote", "table", "hr"];

/// Spaces per list nesting level
const LIST_INDENT: usize = 4;

/// Conversion options
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Elements removed together with their subtrees before rendering
    pub filter_tags: FilterSet,
    /// Deepest list level that gets its own indentation (`None` = unlimited)
    pub max_list_depth: Option<usize>,
    /// Input size and nesting limits
    pub limits: InputLimits,
}

/// Inline emphasis kinds tracked to avoid nested markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn marker(self) -> &'static str {
        match self {
            Emphasis::Bold => "**",
            Emphasis::Italic => "*",
        }
    }
}

/// One open list level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListFrame {
    ordered: bool,
    index: i64,
}

/// Per-call rendering state
///
/// Passed down the traversal by value. A child call that needs different
/// state gets a modified copy, so state never leaks between sibling subtrees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    list_stack: Vec<ListFrame>,
    in_preformatted: bool,
    emphasis: BTreeSet<Emphasis>,
}

impl RenderContext {
    /// Number of currently open lists
    pub fn depth(&self) -> usize {
        self.list_stack.len()
    }

    /// True inside `pre`
    pub fn in_preformatted(&self) -> bool {
        self.in_preformatted
    }

    /// True inside an inline run already wrapped in `emphasis` markers
    pub fn is_emphasized(&self, emphasis: Emphasis) -> bool {
        self.emphasis.contains(&emphasis)
    }

    fn enter_list(&self, ordered: bool, start: i64) -> Self {
        let mut next = self.clone();
        next.list_stack.push(ListFrame {
            ordered,
            index: start.saturating_sub(1),
        });
        next
    }

    fn next_item(&self) -> Self {
        let mut next = self.clone();
        if let Some(frame) = next.list_stack.last_mut() {
            frame.index = frame.index.saturating_add(1);
        }
        next
    }

    fn marker(&self) -> String {
        match self.list_stack.last() {
            Some(ListFrame {
                ordered: true,
                index,
            }) => format!("{index}."),
            _ => "-".to_string(),
        }
    }

    fn preformatted(&self) -> Self {
        Self {
            in_preformatted: true,
            ..self.clone()
        }
    }

    fn with_emphasis(&self, emphasis: Emphasis) -> Self {
        let mut next = self.clone();
        next.emphasis.insert(emphasis);
        next
    }

    fn without_lists(&self) -> Self {
        Self {
            list_stack: Vec::new(),
            ..self.clone()
        }
    }
}

/// Whitespace between two inline fragments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    #[default]
    None,
    Space,
    /// Number of hard breaks, one per `<br>`
    Break(usize),
}

impl Gap {
    /// Breaks add up, anything else keeps the stronger gap
    fn merge(self, other: Gap) -> Gap {
        match (self, other) {
            (Gap::Break(a), Gap::Break(b)) => Gap::Break(a.saturating_add(b)),
            _ => self.max(other),
        }
    }
}

/// Rendered inline text with the whitespace found at either end kept aside
///
/// Whether boundary whitespace survives depends on what ends up next to it,
/// which only the enclosing run knows.
#[derive(Debug, Default)]
struct Fragment {
    lead: Gap,
    text: String,
    trail: Gap,
}

impl Fragment {
    fn plain(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    fn from_text(raw: &str) -> Self {
        let normalized = whitespace::normalize(raw, false);
        let gap = |present: bool| if present { Gap::Space } else { Gap::None };
        Self {
            lead: gap(normalized.starts_with(' ')),
            text: normalized.trim_matches(' ').to_string(),
            trail: gap(normalized.ends_with(' ')),
        }
    }

    fn wrap(self, open: &str, close: &str) -> Self {
        Self {
            lead: self.lead,
            text: format!("{open}{}{close}", self.text),
            trail: self.trail,
        }
    }
}

/// Accumulates inline fragments into one line of text
///
/// A pending gap is written only once more text follows it, so whitespace and
/// hard breaks at the ends of a run are dropped. With `breaks` disabled
/// (headings, table cells) a hard break degrades to a space.
#[derive(Debug)]
struct InlineRun {
    text: String,
    lead: Gap,
    pending: Gap,
    breaks: bool,
}

impl InlineRun {
    fn new(breaks: bool) -> Self {
        Self {
            text: String::new(),
            lead: Gap::None,
            pending: Gap::None,
            breaks,
        }
    }

    fn gap(&mut self, gap: Gap) {
        let gap = match gap {
            Gap::Break(_) if !self.breaks => Gap::Space,
            gap => gap,
        };
        if self.text.is_empty() {
            self.lead = self.lead.merge(gap);
        } else {
            self.pending = self.pending.merge(gap);
        }
    }

    fn push_break(&mut self) {
        self.gap(Gap::Break(1));
    }

    fn push(&mut self, fragment: Fragment) {
        self.gap(fragment.lead);
        if !fragment.text.is_empty() {
            match std::mem::take(&mut self.pending) {
                Gap::None => {}
                Gap::Space => self.text.push(' '),
                Gap::Break(count) => self.text.push_str(&"  \n".repeat(count)),
            }
            self.text.push_str(&fragment.text);
        }
        self.gap(fragment.trail);
    }

    fn finish(self) -> Fragment {
        Fragment {
            lead: self.lead,
            text: self.text,
            trail: self.pending,
        }
    }

    fn take_text(&mut self) -> String {
        let breaks = self.breaks;
        std::mem::replace(self, InlineRun::new(breaks)).finish().text
    }
}

/// Output of one list item: its marker line, continuation lines and any
/// nested list lines, in document order
struct ListItem {
    prefix: String,
    content_indent: String,
    out: String,
    started: bool,
    after_block: bool,
    run: InlineRun,
}

impl ListItem {
    fn new(prefix: String) -> Self {
        let content_indent = " ".repeat(prefix.chars().count() + 1);
        Self {
            prefix,
            content_indent,
            out: String::new(),
            started: false,
            after_block: false,
            run: InlineRun::new(true),
        }
    }

    /// Write the pending inline text as the marker line or a continuation line
    ///
    /// A continuation line after a nested block is set off by a blank line,
    /// otherwise it would read as part of that block.
    fn flush_line(&mut self) {
        let text = self.run.take_text();
        let text = text.replace('\n', &format!("\n{}", self.content_indent));
        let line = if !self.started {
            self.started = true;
            format!("{} {}", self.prefix, text)
        } else if !text.is_empty() {
            if std::mem::take(&mut self.after_block) {
                self.out.push('\n');
            }
            format!("{}{}", self.content_indent, text)
        } else {
            return;
        };
        self.out.push_str(line.trim_end());
        self.out.push('\n');
    }

    fn push_lines(&mut self, lines: &str) {
        self.flush_line();
        if !lines.is_empty() {
            self.out.push_str(lines);
            self.after_block = true;
        }
    }

    fn push_block(&mut self, block: &str) {
        let block = block.trim_end_matches('\n');
        if block.is_empty() {
            return;
        }
        self.flush_line();
        for line in block.split('\n') {
            if !line.is_empty() {
                self.out.push_str(&self.content_indent);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
        self.after_block = true;
    }

    fn finish(mut self) -> String {
        self.flush_line();
        self.out
    }
}

/// Table column alignment (GFM)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableAlignment {
    Left,
    Center,
    Right,
}

/// HTML to Markdown converter
///
/// Holds the options only; every conversion owns its own state, so one
/// converter can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConversionOptions,
}

impl MarkdownConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html_markdown_converter::converter::{ConversionOptions, MarkdownConverter};
    /// use html_markdown_converter::filter::FilterSet;
    ///
    /// let options = ConversionOptions {
    ///     filter_tags: ["script"].into_iter().collect::<FilterSet>(),
    ///     ..Default::default()
    /// };
    /// let converter = MarkdownConverter::with_options(options);
    /// let markdown = converter
    ///     .convert("<script>alert(1)</script><p>Text</p>")
    ///     .expect("convert");
    /// assert_eq!(markdown, "Text\n\n");
    /// ```
    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// The options this converter was built with
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an HTML document to Markdown
    ///
    /// Runs the size check, parsing, tag filtering and rendering.
    ///
    /// # Errors
    ///
    /// - `ConversionError::InputTooLarge` when `html` exceeds the size limit
    /// - `ConversionError::ParseError` when element nesting exceeds the depth limit
    pub fn convert(&self, html: &str) -> Result<String, ConversionError> {
        let span = tracing::debug_span!("convert", input_bytes = html.len());
        let _guard = span.enter();

        self.options.limits.check_size(html.len())?;
        let tree = parse_html_with_limits(html, &self.options.limits)?;
        let tree = filter(tree, &self.options.filter_tags);
        let markdown = self.render(&tree);

        tracing::debug!(output_bytes = markdown.len(), "conversion complete");
        Ok(markdown)
    }

    /// Convert raw HTML bytes, detecting the character encoding first
    ///
    /// # Errors
    ///
    /// As [`convert`](Self::convert), plus `ConversionError::EncodingError`
    /// when the bytes are invalid for the detected encoding.
    pub fn convert_bytes(&self, html: &[u8]) -> Result<String, ConversionError> {
        self.options.limits.check_size(html.len())?;
        let text = decode_html(html)?;
        self.convert(&text)
    }

    /// Read and convert an HTML file
    ///
    /// # Errors
    ///
    /// As [`convert_bytes`](Self::convert_bytes), plus
    /// `ConversionError::IoError` carrying `path` when the file cannot be read.
    pub fn convert_file(&self, path: &Path) -> Result<String, ConversionError> {
        let bytes = fs::read(path).map_err(|e| ConversionError::io(path, e))?;
        self.convert_bytes(&bytes)
    }

    /// Render a node tree as Markdown
    ///
    /// Total over any tree: missing attributes, empty lists and empty
    /// headings produce empty content, never an error.
    pub fn render(&self, tree: &Node) -> String {
        self.render_blocks(std::slice::from_ref(tree), &RenderContext::default())
    }

    fn render_blocks(&self, nodes: &[Node], ctx: &RenderContext) -> String {
        let mut output = String::new();
        let mut paragraph = InlineRun::new(true);

        for node in nodes {
            match node {
                Node::Element(element) if is_block(element) => {
                    push_paragraph(&mut output, &mut paragraph);
                    output.push_str(&self.render_block(element, ctx));
                }
                _ => self.render_inline(node, ctx, &mut paragraph),
            }
        }

        push_paragraph(&mut output, &mut paragraph);
        output
    }

    fn render_block(&self, element: &Element, ctx: &RenderContext) -> String {
        match element.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.render_heading(element, ctx),
            "ul" | "ol" => end_block(self.render_list(element, ctx)),
            "li" => {
                let ctx = ctx.enter_list(false, 1).next_item();
                end_block(self.render_item(&element.children, &ctx))
            }
            "pre" => self.render_preformatted(element, ctx),
            "blockquote" => self.render_blockquote(element, ctx),
            "hr" => "---\n\n".to_string(),
            "table" => end_block(self.render_table(element, ctx)),
            _ => self.render_blocks(&element.children, ctx),
        }
    }

    fn render_heading(&self, element: &Element, ctx: &RenderContext) -> String {
        let level = element.tag[1..].parse::<usize>().unwrap_or(1);
        let text = self.render_inline_children(element, ctx, false).text;

        let mut output = "#".repeat(level);
        if !text.is_empty() {
            output.push(' ');
            output.push_str(&text);
        }
        output.push_str("\n\n");
        output
    }

    /// Render a list as item lines, without the trailing blank line
    fn render_list(&self, list: &Element, ctx: &RenderContext) -> String {
        let ordered = list.tag == "ol";
        let start = if ordered {
            list.attr("start")
                .and_then(|start| start.trim().parse::<i64>().ok())
                .map(|start| start.max(0))
                .unwrap_or(1)
        } else {
            1
        };

        let mut ctx = ctx.enter_list(ordered, start);
        let mut lines = String::new();
        for child in &list.children {
            match child {
                Node::Element(nested) if nested.tag == "ul" || nested.tag == "ol" => {
                    lines.push_str(&self.render_list(nested, &ctx));
                }
                Node::Element(skipped) if SKIPPED_TAGS.contains(&skipped.tag.as_str()) => {}
                Node::Text(_) if child.is_blank_text() => {}
                Node::Element(item) if item.tag == "li" => {
                    ctx = ctx.next_item();
                    lines.push_str(&self.render_item(&item.children, &ctx));
                }
                other => {
                    ctx = ctx.next_item();
                    lines.push_str(&self.render_item(std::slice::from_ref(other), &ctx));
                }
            }
        }
        lines
    }

    fn render_item(&self, children: &[Node], ctx: &RenderContext) -> String {
        let level = self.effective_depth(ctx.depth());
        let indent = " ".repeat(LIST_INDENT * level.saturating_sub(1));
        let mut item = ListItem::new(format!("{indent}{}", ctx.marker()));
        self.collect_item(children, ctx, &mut item);
        item.finish()
    }

    fn collect_item(&self, children: &[Node], ctx: &RenderContext, item: &mut ListItem) {
        for child in children {
            let Node::Element(element) = child else {
                self.render_inline(child, ctx, &mut item.run);
                continue;
            };
            match element.tag.as_str() {
                "ul" | "ol" => {
                    let lines = self.render_list(element, ctx);
                    item.push_lines(&lines);
                }
                tag if CONTINUATION_TAGS.contains(&tag) => {
                    let block = self.render_block(element, &ctx.without_lists());
                    item.push_block(&block);
                }
                _ if is_block(element) => {
                    item.run.gap(Gap::Space);
                    self.collect_item(&element.children, ctx, item);
                    item.run.gap(Gap::Space);
                }
                _ => self.render_inline(child, ctx, &mut item.run),
            }
        }
    }

    fn effective_depth(&self, depth: usize) -> usize {
        match self.options.max_list_depth {
            Some(max) => depth.min(max.max(1)),
            None => depth,
        }
    }

    fn render_preformatted(&self, pre: &Element, ctx: &RenderContext) -> String {
        let ctx = ctx.preformatted();
        let mut body = String::new();
        for child in &pre.children {
            render_verbatim(child, &ctx, &mut body);
        }

        let fence = "`".repeat(longest_backtick_run(&body).max(2) + 1);
        let mut output = format!("{fence}{}\n", code_language(pre).unwrap_or_default());
        output.push_str(&body);
        if !body.is_empty() && !body.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&fence);
        output.push_str("\n\n");
        output
    }

    fn render_blockquote(&self, quote: &Element, ctx: &RenderContext) -> String {
        let inner = self.render_blocks(&quote.children, &ctx.without_lists());
        let inner = inner.trim_end_matches('\n');
        if inner.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        for line in inner.split('\n') {
            if line.is_empty() {
                output.push_str(">\n");
            } else {
                output.push_str("> ");
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push('\n');
        output
    }

    /// Render a GFM table; the first row is the header
    fn render_table(&self, table: &Element, ctx: &RenderContext) -> String {
        let mut rows = Vec::new();
        collect_rows(table, &mut rows);

        let rendered: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                table_cells(row)
                    .map(|cell| {
                        self.render_inline_children(cell, ctx, false)
                            .text
                            .replace('|', "\\|")
                    })
                    .collect()
            })
            .collect();

        let width = rendered.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return String::new();
        }

        let mut alignments: Vec<TableAlignment> = rows
            .first()
            .map(|header| table_cells(header).map(extract_alignment).collect())
            .unwrap_or_default();
        alignments.resize(width, TableAlignment::Left);

        let mut output = String::new();
        for (i, cells) in rendered.iter().enumerate() {
            write_table_row(&mut output, cells, width);
            if i == 0 {
                output.push('|');
                for alignment in &alignments {
                    output.push_str(match alignment {
                        TableAlignment::Left => " --- |",
                        TableAlignment::Center => " :---: |",
                        TableAlignment::Right => " ---: |",
                    });
                }
                output.push('\n');
            }
        }
        output
    }

    fn render_inline_children(
        &self,
        element: &Element,
        ctx: &RenderContext,
        breaks: bool,
    ) -> Fragment {
        let mut run = InlineRun::new(breaks);
        for child in &element.children {
            self.render_inline(child, ctx, &mut run);
        }
        run.finish()
    }

    fn render_inline(&self, node: &Node, ctx: &RenderContext, run: &mut InlineRun) {
        let element = match node {
            Node::Text(text) => {
                run.push(Fragment::from_text(text));
                return;
            }
            Node::Element(element) => element,
        };

        let breaks = run.breaks;
        match element.tag.as_str() {
            tag if SKIPPED_TAGS.contains(&tag) => {}
            "br" => run.push_break(),
            "strong" | "b" => {
                run.push(self.render_emphasis(element, ctx, Emphasis::Bold, breaks));
            }
            "em" | "i" => {
                run.push(self.render_emphasis(element, ctx, Emphasis::Italic, breaks));
            }
            "code" | "pre" => run.push(code_span(&element.text_content())),
            "a" => {
                let href = element.attr("href").unwrap_or("");
                let label = self.render_inline_children(element, ctx, breaks);
                run.push(label.wrap("[", &format!("]({href})")));
            }
            "img" => run.push(render_image(element)),
            tag if BLOCK_TAGS.contains(&tag) => {
                run.gap(Gap::Space);
                for child in &element.children {
                    self.render_inline(child, ctx, run);
                }
                run.gap(Gap::Space);
            }
            _ => {
                for child in &element.children {
                    self.render_inline(child, ctx, run);
                }
            }
        }
    }

    fn render_emphasis(
        &self,
        element: &Element,
        ctx: &RenderContext,
        emphasis: Emphasis,
        breaks: bool,
    ) -> Fragment {
        if ctx.is_emphasized(emphasis) {
            return self.render_inline_children(element, ctx, breaks);
        }
        let marker = emphasis.marker();
        self.render_inline_children(element, &ctx.with_emphasis(emphasis), breaks)
            .wrap(marker, marker)
    }
}

fn is_block(element: &Element) -> bool {
    let tag = element.tag.as_str();
    if SKIPPED_TAGS.contains(&tag) || INLINE_TAGS.contains(&tag) {
        return false;
    }
    BLOCK_TAGS.contains(&tag) || has_block_descendant(element)
}

fn has_block_descendant(element: &Element) -> bool {
    element
        .element_children()
        .any(|child| BLOCK_TAGS.contains(&child.tag.as_str()) || has_block_descendant(child))
}

fn push_paragraph(output: &mut String, paragraph: &mut InlineRun) {
    let text = paragraph.take_text();
    if !text.is_empty() {
        output.push_str(&text);
        output.push_str("\n\n");
    }
}

/// Terminate a run of lines with a blank line, unless it is empty
fn end_block(mut lines: String) -> String {
    if !lines.is_empty() {
        lines.push('\n');
    }
    lines
}

fn render_verbatim(node: &Node, ctx: &RenderContext, output: &mut String) {
    match node {
        Node::Text(text) => output.push_str(&whitespace::normalize(text, ctx.in_preformatted())),
        Node::Element(element) if element.tag == "br" => output.push('\n'),
        Node::Element(element) if SKIPPED_TAGS.contains(&element.tag.as_str()) => {}
        Node::Element(element) => {
            for child in &element.children {
                render_verbatim(child, ctx, output);
            }
        }
    }
}

/// Language from a `language-*` or `lang-*` class on `pre` or its `code` child
fn code_language(pre: &Element) -> Option<&str> {
    std::iter::once(pre)
        .chain(pre.element_children().filter(|child| child.tag == "code"))
        .filter_map(|element| element.attr("class"))
        .flat_map(str::split_ascii_whitespace)
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .filter(|language| !language.is_empty())
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Inline code keeps its whitespace, except line breaks, which a code span
/// cannot contain
fn code_span(raw: &str) -> Fragment {
    if raw.is_empty() {
        return Fragment::default();
    }
    let fragment = Fragment::plain(raw.replace("\r\n", " ").replace(['\n', '\r'], " "));

    let fence = "`".repeat(longest_backtick_run(&fragment.text) + 1);
    let pad = if fragment.text.starts_with('`') || fragment.text.ends_with('`') {
        " "
    } else {
        ""
    };
    fragment.wrap(&format!("{fence}{pad}"), &format!("{pad}{fence}"))
}

fn render_image(img: &Element) -> Fragment {
    let src = whitespace::trim(img.attr("src").unwrap_or(""));
    if src.is_empty() || src.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:")) {
        return Fragment::default();
    }
    let alt = whitespace::normalize(img.attr("alt").unwrap_or(""), false);
    Fragment::plain(format!("![{}]({src})", whitespace::trim(&alt)))
}

fn collect_rows<'a>(element: &'a Element, rows: &mut Vec<&'a Element>) {
    for child in element.element_children() {
        match child.tag.as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => collect_rows(child, rows),
            _ => {}
        }
    }
}

fn table_cells(row: &Element) -> impl Iterator<Item = &Element> {
    row.element_children()
        .filter(|cell| cell.tag == "th" || cell.tag == "td")
}

/// Alignment from the `align` attribute, then from `text-align` in `style`
fn extract_alignment(cell: &Element) -> TableAlignment {
    if let Some(align) = cell.attr("align") {
        return match align.trim().to_ascii_lowercase().as_str() {
            "center" => TableAlignment::Center,
            "right" => TableAlignment::Right,
            _ => TableAlignment::Left,
        };
    }

    if let Some(style) = cell.attr("style") {
        let style = style.to_ascii_lowercase();
        if style.contains("text-align") {
            if style.contains("center") {
                return TableAlignment::Center;
            } else if style.contains("right") {
                return TableAlignment::Right;
            }
        }
    }

    TableAlignment::Left
}

fn write_table_row(output: &mut String, cells: &[String], width: usize) {
    output.push('|');
    for i in 0..width {
        output.push(' ');
        if let Some(cell) = cells.get(i) {
            output.push_str(cell);
        }
        output.push_str(" |");
    }
    output.push('\n');
}
