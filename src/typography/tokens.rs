//! HTML tokenization for text level typography passes.

/// Elements whose text is never typeset.
const SKIP_TAGS: [&str; 7] = ["pre", "code", "kbd", "math", "script", "style", "textarea"];

/// Piece of an HTML fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Markup from `<` through the next `>`.
    Tag(&'a str),
    /// Character data between tags.
    Text(&'a str),
}

/// Splits HTML into tags and text.
///
/// A `<` without a closing `>` is treated as text.
pub(crate) fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => match rest.find('>') {
                Some(end) => {
                    tokens.push(Token::Tag(&rest[..=end]));
                    rest = &rest[end + 1..];
                }
                None => {
                    tokens.push(Token::Text(rest));
                    break;
                }
            },
            Some(start) => {
                tokens.push(Token::Text(&rest[..start]));
                rest = &rest[start..];
            }
            None => {
                tokens.push(Token::Text(rest));
                break;
            }
        }
    }

    tokens
}

/// Rewrites text outside tags and outside skipped elements.
///
/// Tags and the contents of `pre`, `code`, `kbd`, `math`, `script`,
/// `style` and `textarea` are copied unchanged.
///
/// # Arguments
///
/// * `html`: HTML fragment or plain text
/// * `transform`: Called once per text token, in document order
pub(crate) fn map_text(html: &str, mut transform: impl FnMut(&str) -> String) -> String {
    let mut result = String::with_capacity(html.len() + html.len() / 8);
    let mut skip_depth = 0usize;

    for token in tokenize(html) {
        match token {
            Token::Tag(tag) => {
                if let Some((closing, name)) = tag_name(tag) {
                    if SKIP_TAGS.contains(&name.as_str()) {
                        if closing {
                            skip_depth = skip_depth.saturating_sub(1);
                        } else {
                            skip_depth += 1;
                        }
                    }
                }
                result.push_str(tag);
            }
            Token::Text(text) if skip_depth > 0 => result.push_str(text),
            Token::Text(text) => result.push_str(&transform(text)),
        }
    }

    result
}

/// Returns whether tag closes an element and its lowercase name.
fn tag_name(tag: &str) -> Option<(bool, String)> {
    let inner = tag.strip_prefix('<')?;
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    let name: String = inner
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();

    if name.is_empty() {
        None
    } else {
        Some((closing, name.to_ascii_lowercase()))
    }
}
