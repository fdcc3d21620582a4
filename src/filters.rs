//! Template filters over a shared site renderer.
//!
//! Every filter takes optional content and passes absent or empty content
//! through unchanged. Filters never fail: renderer errors are logged and
//! the source text is returned as is.

use maud::Markup;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::components::callout::{CalloutKind, callout};
use crate::markdown::MarkdownRenderer;
use crate::typography::typogrify;

/// Literal ampersand wrapped for styling.
const AMP_SPAN: &str = r#"<span class="amp">&</span>"#;

static RENDERER: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::site);

/// Whether rendered markdown is passed through the typography pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Typography {
    /// Run [`typogrify`] over the rendered HTML.
    #[default]
    Apply,
    /// Return the renderer output untouched.
    Skip,
}

/// Returns the process wide site renderer.
///
/// Built on first use and never mutated afterwards.
pub fn renderer() -> &'static MarkdownRenderer {
    &RENDERER
}

/// Renders a markdown document.
///
/// # Arguments
///
/// * `content`: Markdown source, possibly absent
/// * `typography`: Whether to typeset the rendered HTML
///
/// # Returns
///
/// Rendered HTML, or `content` itself when absent or empty
pub fn render(content: Option<&str>, typography: Typography) -> Option<Cow<'_, str>> {
    let source = match content {
        Some(source) if !source.is_empty() => source,
        other => return other.map(Cow::Borrowed),
    };

    let html = renderer().render(source).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Markdown rendering failed, passing source through");
        source.to_owned()
    });

    Some(Cow::Owned(typeset(html, typography)))
}

/// Renders markdown without block level wrappers.
///
/// # Arguments
///
/// * `content`: Markdown fragment, possibly absent
/// * `typography`: Whether to typeset the rendered HTML
///
/// # Returns
///
/// Inline HTML, or `content` itself when absent or empty
pub fn inline(content: Option<&str>, typography: Typography) -> Option<Cow<'_, str>> {
    let source = match content {
        Some(source) if !source.is_empty() => source,
        other => return other.map(Cow::Borrowed),
    };

    let html = renderer().render_inline(source).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Inline markdown rendering failed, passing source through");
        source.to_owned()
    });

    Some(Cow::Owned(typeset(html, typography)))
}

/// Applies the typography pipeline to HTML or plain text.
pub fn set(content: Option<&str>) -> Option<Cow<'_, str>> {
    match content {
        Some(source) if !source.is_empty() => Some(Cow::Owned(typogrify(source))),
        other => other.map(Cow::Borrowed),
    }
}

/// Wraps every ampersand in `<span class="amp">`.
///
/// Escaped `&amp;` entities are normalized first, so escaped and literal
/// input produce the same markup. This is a single pass: running it over
/// its own output wraps the ampersands again.
pub fn amp(content: Option<&str>) -> Option<Cow<'_, str>> {
    match content {
        Some(source) if !source.is_empty() => Some(Cow::Owned(
            source.replace("&amp;", "&").replace('&', AMP_SPAN),
        )),
        other => other.map(Cow::Borrowed),
    }
}

/// Builds a note callout around inline markdown.
pub fn note(content: Option<&str>) -> Markup {
    callout(CalloutKind::Note, content)
}

/// Builds a warning callout around inline markdown.
pub fn warn(content: Option<&str>) -> Markup {
    callout(CalloutKind::Warning, content)
}

fn typeset(html: String, typography: Typography) -> String {
    match typography {
        Typography::Apply => typogrify(&html),
        Typography::Skip => html,
    }
}
