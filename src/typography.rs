//! Typographic refinement of rendered HTML.
//!
//! A typogrify style pipeline: ampersand and caps styling hooks, widow
//! prevention, smart punctuation, initial quote hooks and ordinal
//! suffixes. Text level passes leave tags alone and skip the contents of
//! code like elements (`pre`, `code`, `kbd`, `math`, `script`, `style`,
//! `textarea`).

mod smartypants;
mod tokens;

use regex::{Captures, Regex};
use std::sync::LazyLock;

use tokens::map_text;

pub use smartypants::educate as smartypants;

/// Ampersand surrounded by whitespace, literal or escaped.
static AMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s|&nbsp;)(&|&amp;|&#38;)(\s|&nbsp;)").expect("ampersand pattern is valid")
});

/// Last space of a block with at least three words.
///
/// Inline tags bordering a word count as part of it; the block must end
/// in a closing `p`, heading, `li`, `dt` or `dd` tag, or the input must end.
static WIDONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let inline = r"(?:a|em|span|strong|i|b)";
    let word = format!(r"(?:<{inline}(?:\s[^>]*?)?>)*?[^\s<>]+(?:</{inline}>)*?");
    Regex::new(&format!(
        r"(?i)(\s+{word}\s+{word})\s+([^<>\s]+(?:\s*</{inline}>\s*\.*)*?(?:\s*?</(?:p|h[1-6]|li|dt|dd)>|$))"
    ))
    .expect("widont pattern is valid")
});

/// Runs of capitals, or dotted initialisms such as `U.S.A.`.
static CAPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z0-9]*[A-Z][0-9]*[A-Z][A-Z0-9']*)\b|\b([A-Z]+\.\s?(?:[A-Z]+\.\s?)+)")
        .expect("caps pattern is valid")
});

/// Quote opening a block, optionally behind inline tags.
static INITIAL_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)((?:<(?:p|h[1-6]|li|dt|dd)(?:\s[^>]*)?>|^)\s*(?:<(?:a|em|span|strong|i|b)(?:\s[^>]*)?>\s*)*)(?:("|&ldquo;|&#8220;|“)|('|&lsquo;|&#8216;|‘))"#,
    )
    .expect("initial quote pattern is valid")
});

/// Number followed by an English ordinal suffix.
static ORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]+)(st|nd|rd|th)\b").expect("ordinal pattern is valid")
});

/// Applies the full typography pipeline.
///
/// Runs, in order: [`amp`], [`widont`], [`smartypants`], [`caps`],
/// [`initial_quotes`] and [`ord`].
///
/// # Arguments
///
/// * `html`: HTML fragment or plain text
///
/// # Returns
///
/// Refined HTML
pub fn typogrify(html: &str) -> String {
    let html = amp(html);
    let html = widont(&html);
    let html = smartypants(&html);
    let html = caps(&html);
    let html = initial_quotes(&html);
    ord(&html)
}

/// Wraps whitespace separated ampersands in `<span class="amp">`.
pub fn amp(html: &str) -> String {
    map_text(html, |text| {
        AMP_RE
            .replace_all(text, r#"${1}<span class="amp">&amp;</span>${3}"#)
            .into_owned()
    })
}

/// Joins the last two words of each block with a non-breaking space.
pub fn widont(html: &str) -> String {
    WIDONT_RE.replace_all(html, "${1}&nbsp;${2}").into_owned()
}

/// Wraps runs of capitals in `<span class="caps">`.
pub fn caps(html: &str) -> String {
    map_text(html, |text| {
        CAPS_RE
            .replace_all(text, |captures: &Captures<'_>| {
                if let Some(run) = captures.get(1) {
                    return format!(r#"<span class="caps">{}</span>"#, run.as_str());
                }

                let dotted = captures.get(2).map_or("", |m| m.as_str());
                let trimmed = dotted.trim_end();
                let tail = &dotted[trimmed.len()..];
                format!(r#"<span class="caps">{trimmed}</span>{tail}"#)
            })
            .into_owned()
    })
}

/// Wraps a quote opening a block in `<span class="dquo">` or
/// `<span class="quo">`.
pub fn initial_quotes(html: &str) -> String {
    INITIAL_QUOTE_RE
        .replace_all(html, |captures: &Captures<'_>| {
            let lead = captures.get(1).map_or("", |m| m.as_str());
            match (captures.get(2), captures.get(3)) {
                (Some(double), _) => {
                    format!(r#"{lead}<span class="dquo">{}</span>"#, double.as_str())
                }
                (None, Some(single)) => {
                    format!(r#"{lead}<span class="quo">{}</span>"#, single.as_str())
                }
                (None, None) => captures[0].to_owned(),
            }
        })
        .into_owned()
}

/// Wraps ordinal suffixes in `<span class="ord">`.
pub fn ord(html: &str) -> String {
    map_text(html, |text| {
        ORD_RE
            .replace_all(text, r#"${1}<span class="ord">${2}</span>"#)
            .into_owned()
    })
}
