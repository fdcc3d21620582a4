//! Callout aside component

use maud::{Markup, PreEscaped, html};

use crate::filters::{Typography, inline};

/// Kind of callout, selecting its label and `data-alert` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Note,
    Warning,
}

impl CalloutKind {
    /// Value of the `data-alert` attribute.
    pub fn alert(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warn",
        }
    }

    /// Bold label opening the callout.
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note:",
            Self::Warning => "Warning:",
        }
    }
}

/// Renders callout aside
///
/// Content is rendered as inline markdown with typography applied, so
/// emphasis and links work without introducing paragraph tags. Missing
/// content renders the label alone.
///
/// Markup is compact: no line breaks or indentation inside the aside, and
/// a single space between label and body only when a body is present.
///
/// # Arguments
///
/// * `kind`: Note or warning
/// * `content`: Inline markdown body, possibly absent
///
/// # Returns
///
/// Aside markup tagged with `data-alert`
pub fn callout(kind: CalloutKind, content: Option<&str>) -> Markup {
    let body = inline(content, Typography::Apply).unwrap_or_default();

    html! {
        aside data-alert=(kind.alert()) {
            strong { (kind.label()) }
            @if !body.is_empty() {
                " " (PreEscaped(body.as_ref()))
            }
        }
    }
}
