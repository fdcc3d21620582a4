//! Syntax extensions layered on top of comrak.

use comrak::nodes::{Ast, AstNode, LineColumn, NodeValue};
use comrak::{Arena, Options};
use regex::{Captures, Regex};
use std::cell::RefCell;
use std::sync::LazyLock;

use super::escape::{escape_block_starts, reference_definitions};

/// Delimiter run surrounding highlighted text.
const MARK_DELIMITER: &str = "==";

/// Heading with the permalink anchor comrak injects before its text.
static HEADING_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r##"(?s)<h([1-6])><a href="#[^"]*" aria-hidden="true" class="anchor" id="([^"]*)"></a>(.*?)</h[1-6]>"##,
    )
    .expect("heading anchor pattern is valid")
});

static ABBREVIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((c|tm|r)\)").expect("abbreviation pattern is valid"));

static DOTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("dots pattern is valid"));

static TERMINAL_ELLIPSIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?!])\u{2026}").expect("ellipsis pattern is valid"));

static REPEATED_TERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?!]){4,}").expect("terminal pattern is valid"));

static COMMAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",{2,}").expect("commas pattern is valid"));

/// Markdown syntax extension registered on a renderer.
///
/// Extensions are applied in registration order. Some map directly onto
/// comrak options, others rewrite the parsed tree before it is formatted
/// or the HTML after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// `==text==` rendered as `<mark>text</mark>`.
    Mark,
    /// Reference style footnotes with back-links.
    Footnote,
    /// GitHub style ids on headings with a trailing permalink.
    HeadingAnchor(HeadingAnchor),
}

/// Heading anchor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingAnchor {
    /// Prepended to every generated heading id.
    pub prefix: String,
}

impl Extension {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mark => "mark",
            Self::Footnote => "footnote",
            Self::HeadingAnchor(_) => "heading-anchor",
        }
    }

    /// Enables the comrak options this extension relies on.
    pub(super) fn configure(&self, options: &mut Options<'_>) {
        match self {
            Self::Mark => {}
            Self::Footnote => options.extension.footnotes = true,
            Self::HeadingAnchor(anchor) => {
                options.extension.header_ids = Some(anchor.prefix.clone());
            }
        }
    }

    /// Rewrites the parsed document tree.
    pub(super) fn transform<'a>(&self, arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
        if let Self::Mark = self {
            highlight_marks(arena, root);
        }
    }

    /// Rewrites formatted HTML.
    ///
    /// Heading anchors move the id from comrak's leading empty anchor onto
    /// the heading itself and append a `¶` permalink after the text.
    pub(super) fn finish(&self, html: String) -> String {
        match self {
            Self::HeadingAnchor(_) if HEADING_ANCHOR_RE.is_match(&html) => HEADING_ANCHOR_RE
                .replace_all(
                    &html,
                    r##"<h${1} id="${2}" tabindex="-1">${3} <a class="header-anchor" href="#${2}" aria-hidden="true">¶</a></h${1}>"##,
                )
                .into_owned(),
            _ => html,
        }
    }
}

/// Replaces indented code blocks with paragraphs of their text.
///
/// Block markers inside the block stay literal, so `    # x` is a paragraph
/// reading `# x`, not a heading. Link reference definitions from the whole
/// document are carried along so references inside the block resolve.
/// Fenced blocks are left alone.
pub(super) fn unindent_code_blocks<'a>(
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    source: &str,
    options: &Options<'_>,
) {
    let blocks: Vec<_> = root
        .descendants()
        .filter(|node| {
            matches!(&node.data.borrow().value, NodeValue::CodeBlock(code) if !code.fenced)
        })
        .collect();

    if blocks.is_empty() {
        return;
    }

    let references = reference_definitions(source);

    for block in blocks {
        let literal = match &block.data.borrow().value {
            NodeValue::CodeBlock(code) => code.literal.clone(),
            _ => continue,
        };

        let text = format!("{}\n\n{}", escape_block_starts(&literal), references);
        let document = comrak::parse_document(arena, &text, options);

        let children: Vec<_> = document.children().collect();
        for child in children {
            block.insert_before(child);
        }
        block.detach();
    }
}

/// Applies typographer symbol replacements to text.
///
/// `(c)`, `(r)` and `(tm)` become ©, ® and ™, `+-` becomes ±, runs of dots
/// become an ellipsis, and repeated `?`, `!` or `,` are collapsed. Text of
/// autolinked URLs is left alone.
pub(super) fn replace_symbols<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let replaced = match &node.data.borrow().value {
            NodeValue::Text(text) if !is_autolink_text(node, text) => typeset_symbols(text),
            _ => continue,
        };

        if let Some(text) = replaced {
            set_value(node, NodeValue::Text(text));
        }
    }
}

fn typeset_symbols(text: &str) -> Option<String> {
    let replaced = ABBREVIATION_RE.replace_all(text, |caps: &Captures<'_>| {
        match caps[1].to_ascii_lowercase().as_str() {
            "c" => "\u{A9}",
            "r" => "\u{AE}",
            _ => "\u{2122}",
        }
    });
    let replaced = replaced.replace("+-", "\u{B1}");
    let replaced = DOTS_RE.replace_all(&replaced, "\u{2026}");
    let replaced = TERMINAL_ELLIPSIS_RE.replace_all(&replaced, "$1..");
    let replaced = REPEATED_TERMINAL_RE.replace_all(&replaced, "$1$1$1");
    let replaced = COMMAS_RE.replace_all(&replaced, ",");

    (replaced != text).then(|| replaced.into_owned())
}

fn is_autolink_text(node: &AstNode<'_>, text: &str) -> bool {
    node.parent().is_some_and(|parent| {
        matches!(&parent.data.borrow().value, NodeValue::Link(link) if link.url.ends_with(text))
    })
}

/// Turns paired `==` delimiters into `<mark>` elements.
///
/// Every inline container is handled on its own, so a highlight never
/// spans two paragraphs or crosses out of a link.
fn highlight_marks<'a>(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
    let containers: Vec<_> = root
        .descendants()
        .filter(|node| node.children().any(contains_delimiter))
        .collect();

    for container in containers {
        let delimiters = split_delimiters(arena, container);
        pair_delimiters(&delimiters);
    }
}

fn contains_delimiter(node: &AstNode<'_>) -> bool {
    matches!(&node.data.borrow().value, NodeValue::Text(text) if text.contains(MARK_DELIMITER))
}

/// Splits text children around `==` runs.
///
/// Each run becomes an empty text node that is later turned into an
/// opening tag, a closing tag, or the literal delimiter. Tags are escaped
/// tag nodes, which the formatter writes verbatim even when raw HTML is
/// omitted.
fn split_delimiters<'a>(
    arena: &'a Arena<AstNode<'a>>,
    container: &'a AstNode<'a>,
) -> Vec<&'a AstNode<'a>> {
    let mut delimiters = Vec::new();
    let children: Vec<_> = container.children().collect();

    for child in children {
        let (text, start) = {
            let ast = child.data.borrow();
            match &ast.value {
                NodeValue::Text(text) if text.contains(MARK_DELIMITER) => {
                    (text.clone(), ast.sourcepos.start)
                }
                _ => continue,
            }
        };

        for (index, segment) in text.split(MARK_DELIMITER).enumerate() {
            if index > 0 {
                let delimiter = alloc(arena, NodeValue::Text(String::new()), start);
                child.insert_before(delimiter);
                delimiters.push(delimiter);
            }
            if !segment.is_empty() {
                child.insert_before(alloc(arena, NodeValue::Text(segment.to_owned()), start));
            }
        }
        child.detach();
    }

    delimiters
}

/// Pairs delimiters left to right.
///
/// An opener must not be followed by whitespace and a closer must not be
/// preceded by whitespace. Empty pairs and leftovers stay literal.
fn pair_delimiters<'a>(delimiters: &[&'a AstNode<'a>]) {
    let mut opener: Option<&'a AstNode<'a>> = None;

    for &delimiter in delimiters {
        match opener {
            Some(open) if can_close(delimiter) && !adjacent(open, delimiter) => {
                set_value(open, NodeValue::EscapedTag("<mark>".to_owned()));
                set_value(delimiter, NodeValue::EscapedTag("</mark>".to_owned()));
                opener = None;
            }
            _ if can_open(delimiter) => {
                if let Some(stale) = opener.replace(delimiter) {
                    set_value(stale, NodeValue::Text(MARK_DELIMITER.to_owned()));
                }
            }
            _ => set_value(delimiter, NodeValue::Text(MARK_DELIMITER.to_owned())),
        }
    }

    if let Some(stale) = opener {
        set_value(stale, NodeValue::Text(MARK_DELIMITER.to_owned()));
    }
}

fn can_open(delimiter: &AstNode<'_>) -> bool {
    delimiter
        .next_sibling()
        .is_some_and(|next| !is_whitespace_edge(next, |text| text.starts_with(char::is_whitespace)))
}

fn can_close(delimiter: &AstNode<'_>) -> bool {
    delimiter
        .previous_sibling()
        .is_some_and(|prev| !is_whitespace_edge(prev, |text| text.ends_with(char::is_whitespace)))
}

fn is_whitespace_edge(node: &AstNode<'_>, edge: fn(&str) -> bool) -> bool {
    match &node.data.borrow().value {
        NodeValue::Text(text) => edge(text),
        NodeValue::SoftBreak | NodeValue::LineBreak => true,
        _ => false,
    }
}

fn adjacent<'a>(first: &AstNode<'a>, second: &AstNode<'a>) -> bool {
    first
        .next_sibling()
        .is_some_and(|next| std::ptr::eq(next, second))
}

fn set_value(node: &AstNode<'_>, value: NodeValue) {
    node.data.borrow_mut().value = value;
}

fn alloc<'a>(
    arena: &'a Arena<AstNode<'a>>,
    value: NodeValue,
    start: LineColumn,
) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, start))))
}
