//! Integration tests for Typeset.
//!
//! Tests the public filter API against site rendering behavior.

use std::borrow::Cow;
use typeset::{
    CalloutKind, Extension, MarkdownRenderer, RendererConfig, Typography, amp, callout, inline,
    note, render, renderer, set, warn,
};

/// Tests every filter returns absent input unchanged.
#[test]
fn test_absent_input_identity() {
    assert_eq!(render(None, Typography::Apply), None);
    assert_eq!(render(None, Typography::Skip), None);
    assert_eq!(inline(None, Typography::Apply), None);
    assert_eq!(inline(None, Typography::Skip), None);
    assert_eq!(set(None), None);
    assert_eq!(amp(None), None);
}

/// Tests every filter returns empty input unchanged without rendering.
#[test]
fn test_empty_input_identity() {
    assert_eq!(render(Some(""), Typography::Apply), Some(Cow::Borrowed("")));
    assert_eq!(inline(Some(""), Typography::Apply), Some(Cow::Borrowed("")));
    assert_eq!(set(Some("")), Some(Cow::Borrowed("")));
    assert_eq!(amp(Some("")), Some(Cow::Borrowed("")));
}

/// Tests heading ids and permalink anchors.
#[test]
fn test_heading_slug_and_permalink() {
    // Arrange
    let markdown = "# Hello World";

    // Act
    let html = render(Some(markdown), Typography::Apply).expect("Should render");

    // Assert
    assert!(
        html.starts_with("<h1 id=\"hello-world\""),
        "Should set id on heading: {}",
        html
    );
    assert!(
        html.contains("<a class=\"header-anchor\" href=\"#hello-world\""),
        "Should append permalink: {}",
        html
    );
}

/// Tests repeated headings get distinct ids.
#[test]
fn test_duplicate_heading_slugs() {
    // Arrange
    let markdown = "# Foo\n\nText\n\n# Foo\n";

    // Act
    let html = render(Some(markdown), Typography::Skip).expect("Should render");

    // Assert
    assert!(html.contains("id=\"foo\""), "First heading: {}", html);
    assert!(html.contains("id=\"foo-1\""), "Second heading: {}", html);
}

/// Tests mark syntax.
#[test]
fn test_mark_syntax() {
    // Arrange & Act
    let html = render(Some("==marked text=="), Typography::Apply).expect("Should render");

    // Assert
    assert!(
        html.contains("<mark>marked text</mark>"),
        "Should highlight: {}",
        html
    );
}

/// Tests note callout renders inline markdown without paragraph tags.
#[test]
fn test_note_callout() {
    // Arrange & Act
    let html = note(Some("Hello **world**")).into_string();

    // Assert
    assert!(html.starts_with("<aside data-alert=\"note\">"), "{}", html);
    assert!(html.contains("<strong>Note:</strong>"), "{}", html);
    assert!(html.contains("Hello <strong>world</strong>"), "{}", html);
    assert!(!html.contains("<p>"), "Should render inline: {}", html);
}

/// Tests warning callout without content.
#[test]
fn test_warning_callout_without_content() {
    // Arrange & Act
    let html = warn(None).into_string();

    // Assert
    assert_eq!(
        html,
        "<aside data-alert=\"warn\"><strong>Warning:</strong></aside>"
    );
}

/// Tests callout builder matches the named filters.
#[test]
fn test_callout_matches_filters() {
    assert_eq!(
        callout(CalloutKind::Note, Some("x")).into_string(),
        note(Some("x")).into_string()
    );
    assert_eq!(
        callout(CalloutKind::Warning, Some("x")).into_string(),
        warn(Some("x")).into_string()
    );
}

/// Tests raw inline HTML is preserved.
#[test]
fn test_raw_html_preserved() {
    // Arrange & Act
    let html = render(Some("E = mc<sup>2</sup>"), Typography::Apply).expect("Should render");

    // Assert
    assert!(html.contains("<sup>2</sup>"), "Should keep raw HTML: {}", html);
}

/// Tests fenced code output is plain and untouched by typography.
///
/// Golden output: comrak's default fenced block with a language class and
/// no highlighting markup.
#[test]
fn test_fenced_code_golden() {
    // Arrange
    let markdown = "```rust\nlet s = \"a\" -- b;\n```\n";

    // Act
    let html = render(Some(markdown), Typography::Apply).expect("Should render");

    // Assert
    assert_eq!(
        html,
        "<pre><code class=\"language-rust\">let s = &quot;a&quot; -- b;\n</code></pre>\n"
    );
}

/// Tests indented code is rendered as paragraph text.
///
/// Golden output for the disabled indented code rule.
#[test]
fn test_indented_code_golden() {
    // Arrange
    let markdown = "Para\n\n    four spaces\n";

    // Act
    let html = render(Some(markdown), Typography::Skip).expect("Should render");

    // Assert
    assert_eq!(html, "<p>Para</p>\n<p>four spaces</p>\n");
}

/// Tests callout bodies keep line-leading markers as text.
#[test]
fn test_callout_keeps_block_markers() {
    // Arrange & Act
    let dash = note(Some("- see docs")).into_string();
    let number = warn(Some("1. first")).into_string();

    // Assert
    assert!(dash.contains("</strong> - see"), "Should keep dash: {}", dash);
    assert!(number.contains("</strong> 1. first"), "Should keep number: {}", number);
}

/// Tests typographer symbol replacements in rendered documents.
#[test]
fn test_typographer_symbols() {
    // Arrange & Act
    let html = render(Some("Copyright (c) 2024"), Typography::Skip).expect("Should render");

    // Assert
    assert_eq!(html, "<p>Copyright \u{A9} 2024</p>\n");
}

/// Tests ampersand stylizing normalizes escaped entities.
#[test]
fn test_amp_escaped_equals_literal() {
    // Arrange & Act
    let escaped = amp(Some("A &amp; B")).expect("Should stylize");
    let literal = amp(Some("A & B")).expect("Should stylize");

    // Assert
    assert_eq!(escaped, literal);
    assert_eq!(literal, "A <span class=\"amp\">&</span> B");
}

/// Tests footnotes render with back-links.
#[test]
fn test_footnotes() {
    // Arrange
    let markdown = "Fact.[^1]\n\n[^1]: Source.\n";

    // Act
    let html = render(Some(markdown), Typography::Apply).expect("Should render");

    // Assert
    assert!(html.contains("footnote-ref"), "Reference: {}", html);
    assert!(html.contains("footnote-backref"), "Back-link: {}", html);
}

/// Tests bare URLs are linked.
#[test]
fn test_linkify() {
    // Arrange & Act
    let html = render(Some("See https://example.com"), Typography::Skip).expect("Should render");

    // Assert
    assert!(
        html.contains("<a href=\"https://example.com\">https://example.com</a>"),
        "Should link URL: {}",
        html
    );
}

/// Tests typography on rendered paragraphs.
#[test]
fn test_render_typography_pass() {
    // Arrange
    let markdown = "Meet the team at the 1st floor";

    // Act
    let html = render(Some(markdown), Typography::Apply).expect("Should render");

    // Assert
    assert!(
        html.contains("1<span class=\"ord\">st</span>"),
        "Should mark ordinal: {}",
        html
    );
    assert!(html.contains("1<span class=\"ord\">st</span>&nbsp;floor"), "{}", html);
}

/// Tests shared renderer configuration.
#[test]
fn test_shared_renderer_configuration() {
    // Arrange & Act
    let shared = renderer();

    // Assert
    assert_eq!(shared.config(), &RendererConfig::site());
    assert_eq!(
        shared.extensions().first(),
        Some(&Extension::Mark),
        "Mark should run first"
    );
}

/// Tests renderers with custom extension chains.
#[test]
fn test_custom_renderer_without_extensions() {
    // Arrange
    let renderer = MarkdownRenderer::new(RendererConfig::site());

    // Act
    let html = renderer
        .render("# Title\n\n==plain==")
        .expect("Should render");

    // Assert
    assert!(!html.contains("id="), "No heading anchors: {}", html);
    assert!(!html.contains("<mark>"), "No mark extension: {}", html);
}

/// Tests rendering from concurrent threads shares one renderer safely.
#[test]
fn test_concurrent_rendering() {
    // Arrange
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("# Section {i}\n\n# Section {i}");
                render(Some(&source), Typography::Skip)
                    .map(Cow::into_owned)
                    .unwrap_or_default()
            })
        })
        .collect();

    // Act
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread should finish"))
        .collect();

    // Assert
    for (i, html) in results.iter().enumerate() {
        assert!(html.contains(&format!("id=\"section-{i}\"")), "{}", html);
        assert!(html.contains(&format!("id=\"section-{i}-1\"")), "{}", html);
    }
}
