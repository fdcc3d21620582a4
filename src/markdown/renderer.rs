//! Markdown rendering with site typography extensions.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeCode, NodeValue};
use comrak::{Arena, Options};
use std::path::Path;
use tracing::debug;

use super::escape::escape_block_starts;
use super::extensions::{Extension, HeadingAnchor, replace_symbols, unindent_code_blocks};

/// Behavioral switches for the markdown parser and HTML formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Pass raw HTML in the source through unescaped.
    pub html: bool,
    /// Render single newlines as `<br />`.
    pub breaks: bool,
    /// Turn bare URLs into links.
    pub linkify: bool,
    /// Replace straight quotes, dashes and ellipses while parsing, along
    /// with `(c)`, `(tm)`, `+-` and similar symbol shorthands.
    pub typographer: bool,
    /// Recognise indented code blocks. When off, indented text is read as
    /// ordinary markdown.
    pub code_blocks: bool,
}

impl RendererConfig {
    /// Configuration used for site content.
    ///
    /// Raw HTML passes through, bare URLs are linked, punctuation is
    /// smartened and indented code blocks are disabled.
    pub fn site() -> Self {
        Self {
            html: true,
            breaks: false,
            linkify: true,
            typographer: true,
            code_blocks: false,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            html: false,
            breaks: false,
            linkify: false,
            typographer: false,
            code_blocks: true,
        }
    }
}

/// Renders markdown to HTML with an ordered chain of extensions.
///
/// The renderer is plain configuration: comrak options and the parse arena
/// are built per call, so one instance can be shared freely across threads
/// and heading slug deduplication never leaks between documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRenderer {
    config: RendererConfig,
    extensions: Vec<Extension>,
}

impl MarkdownRenderer {
    /// Creates renderer with the given configuration and no extensions.
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            extensions: Vec::new(),
        }
    }

    /// Creates renderer used for site content.
    ///
    /// Uses [`RendererConfig::site`] and registers, in order:
    /// - `==mark==` highlighting
    /// - Footnotes with back-links
    /// - Heading ids with permalink anchors
    pub fn site() -> Self {
        Self::new(RendererConfig::site())
            .with_extension(Extension::Mark)
            .with_extension(Extension::Footnote)
            .with_extension(Extension::HeadingAnchor(HeadingAnchor::default()))
    }

    /// Appends extension to the chain.
    ///
    /// # Arguments
    ///
    /// * `extension`: Extension applied after those already registered
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Returns parser and formatter configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Returns registered extensions in application order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Builds comrak options from configuration and extensions.
    fn options(&self) -> Options<'static> {
        let mut options = Options::default();

        options.render.unsafe_ = self.config.html;
        options.render.hardbreaks = self.config.breaks;
        options.extension.autolink = self.config.linkify;
        options.parse.smart = self.config.typographer;

        for extension in &self.extensions {
            extension.configure(&mut options);
        }

        options
    }

    /// Parses content into the arena and applies tree rewrites.
    fn parse<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        content: &str,
        options: &Options<'_>,
    ) -> &'a AstNode<'a> {
        let root = comrak::parse_document(arena, content, options);

        if !self.config.code_blocks {
            unindent_code_blocks(arena, root, content, options);
        }

        if self.config.typographer {
            replace_symbols(root);
        }

        for extension in &self.extensions {
            debug!(extension = extension.name(), "applying markdown extension");
            extension.transform(arena, root);
        }

        root
    }

    /// Renders markdown content to HTML string.
    ///
    /// Malformed markdown never fails; comrak emits best effort HTML.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML fragment without document wrapper
    ///
    /// # Errors
    ///
    /// Returns error if formatted output is not valid UTF8
    pub fn render(&self, content: &str) -> Result<String> {
        let arena = Arena::new();
        let options = self.options();
        let root = self.parse(&arena, content, &options);

        let mut html = Vec::with_capacity(content.len() * 2);
        comrak::format_html(root, &options, &mut html)
            .context("Failed to format markdown document")?;

        self.finish(html)
    }

    /// Renders markdown content without block level wrappers.
    ///
    /// Only inline syntax is interpreted: line-leading `#`, `>`, list
    /// markers and rules stay literal text. Paragraphs separated by blank
    /// lines are joined with a blank line, raw HTML blocks contribute their
    /// literal markup and fenced code an inline code span.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown fragment to render
    ///
    /// # Returns
    ///
    /// Inline HTML without `<p>` or other block elements
    ///
    /// # Errors
    ///
    /// Returns error if formatted output is not valid UTF8
    pub fn render_inline(&self, content: &str) -> Result<String> {
        let arena = Arena::new();
        let options = self.options();
        let root = self.parse(&arena, &escape_block_starts(content), &options);

        let mut runs = Vec::new();
        collect_inline_runs(root, &mut runs);

        let mut html = Vec::with_capacity(content.len() * 2);
        for (index, run) in runs.iter().enumerate() {
            if index > 0 {
                html.extend_from_slice(b"\n\n");
            }
            for &node in run {
                comrak::format_html(node, &options, &mut html)
                    .context("Failed to format inline markdown")?;
            }
        }

        self.finish(html)
    }

    /// Decodes formatted output and applies extension rewrites.
    fn finish(&self, html: Vec<u8>) -> Result<String> {
        let html = String::from_utf8(html).context("Rendered markdown is not valid UTF8")?;

        Ok(self
            .extensions
            .iter()
            .fold(html, |html, extension| extension.finish(html)))
    }

    /// Renders markdown file at given path.
    ///
    /// Convenience method that reads file and renders content.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to markdown file
    ///
    /// # Returns
    ///
    /// Rendered HTML string
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::site()
    }
}

/// Groups inline nodes by the block they came from.
fn collect_inline_runs<'a>(node: &'a AstNode<'a>, runs: &mut Vec<Vec<&'a AstNode<'a>>>) {
    for child in node.children() {
        let literal = match &child.data.borrow().value {
            NodeValue::Paragraph | NodeValue::Heading(_) => {
                runs.push(child.children().collect());
                continue;
            }
            NodeValue::FootnoteDefinition(_) | NodeValue::ThematicBreak => continue,
            NodeValue::HtmlBlock(block) => {
                Some(NodeValue::HtmlInline(block.literal.trim_end().to_owned()))
            }
            NodeValue::CodeBlock(code) => Some(NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: code.literal.trim_end().to_owned(),
            })),
            _ => None,
        };

        match literal {
            Some(value) => {
                child.data.borrow_mut().value = value;
                runs.push(vec![child]);
            }
            None => collect_inline_runs(child, runs),
        }
    }
}
