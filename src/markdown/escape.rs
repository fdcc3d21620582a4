//! Source rewriting that keeps text out of block constructs.

use regex::Regex;
use std::sync::LazyLock;

/// Line start that would open a heading, quote, list, rule or underline.
static BLOCK_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}(?:[ \t]|$)|>|[-+*](?:[ \t]|$)|(?:[-*_][ \t]*){3,}$|[-=]+[ \t]*$|~{3,})")
        .expect("block marker pattern is valid")
});

/// Ordered list marker; the delimiter is what gets escaped.
static ORDERED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,9}([.)])(?:[ \t]|$)").expect("ordered marker pattern is valid")
});

/// Single line link reference definition, excluding footnotes.
static REFERENCE_DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^ {0,3}\[[^\]^\n][^\]\n]*\]:[ \t]*\S.*$")
        .expect("reference definition pattern is valid")
});

/// Escapes line-leading block markers so every line parses as paragraph text.
///
/// Lines lose their leading indentation, so nothing becomes an indented code
/// block either. Backtick fences are left intact, including their contents.
pub(super) fn escape_block_starts(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 16);
    let mut in_fence = false;

    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            escaped.push('\n');
        }

        if in_fence {
            escaped.push_str(line);
            in_fence = !line.trim_start().starts_with("```");
            continue;
        }

        let line = line.trim_start();
        if is_fence(line) {
            in_fence = true;
            escaped.push_str(line);
        } else if let Some(delimiter) = ORDERED_MARKER_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
        {
            escaped.push_str(&line[..delimiter.start()]);
            escaped.push('\\');
            escaped.push_str(&line[delimiter.start()..]);
        } else {
            if BLOCK_MARKER_RE.is_match(line) {
                escaped.push('\\');
            }
            escaped.push_str(line);
        }
    }

    escaped
}

/// Collects the link reference definitions of a document, one per line.
pub(super) fn reference_definitions(source: &str) -> String {
    REFERENCE_DEFINITION_RE
        .find_iter(source)
        .map(|definition| definition.as_str().trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```") && !line.trim_start_matches('`').contains('`')
}
