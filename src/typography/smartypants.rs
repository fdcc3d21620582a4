//! Punctuation education: curly quotes, dashes and ellipses.

use super::tokens::map_text;

const OPEN_SINGLE: &str = "&#8216;";
const CLOSE_SINGLE: &str = "&#8217;";
const OPEN_DOUBLE: &str = "&#8220;";
const CLOSE_DOUBLE: &str = "&#8221;";
const EM_DASH: &str = "&#8212;";
const ELLIPSIS: &str = "&#8230;";

/// Educates punctuation in every text token of an HTML fragment.
///
/// Straight quotes and backtick pairs become curly quote entities, `--`
/// becomes an em dash and `...` an ellipsis. The last character of each
/// text token is carried over so a quote right after a tag is still
/// educated from its real context.
pub fn educate(html: &str) -> String {
    let mut previous = None;
    map_text(html, |text| educate_text(text, &mut previous))
}

fn educate_text(text: &str, previous: &mut Option<char>) -> String {
    let decoded = text.replace("&quot;", "\"").replace("&#39;", "'");
    let context = *previous;
    if let Some(last) = decoded.chars().last() {
        *previous = Some(last);
    }

    let backticks = decoded
        .replace("``", OPEN_DOUBLE)
        .replace("''", CLOSE_DOUBLE);

    educate_quotes(&backticks, context)
        .replace("--", EM_DASH)
        .replace(". . .", ELLIPSIS)
        .replace("...", ELLIPSIS)
}

fn educate_quotes(text: &str, previous: Option<char>) -> String {
    let chars: Vec<char> = text.chars().collect();

    // A lone quote between two tags only has the preceding text as context.
    if let [quote @ ('\'' | '"')] = chars.as_slice() {
        let closing = previous.is_some_and(|c| !c.is_whitespace());
        return match (quote, closing) {
            ('\'', true) => CLOSE_SINGLE,
            ('\'', false) => OPEN_SINGLE,
            (_, true) => CLOSE_DOUBLE,
            (_, false) => OPEN_DOUBLE,
        }
        .to_owned();
    }

    let mut result = String::with_capacity(text.len() + 16);

    for (index, &ch) in chars.iter().enumerate() {
        let prev = match index.checked_sub(1) {
            Some(before) => chars.get(before).copied(),
            None => previous,
        };
        let rest = chars.get(index + 1..).unwrap_or_default();

        match ch {
            '\'' => result.push_str(single_quote(prev, rest)),
            '"' => result.push_str(double_quote(prev, rest)),
            _ => result.push(ch),
        }
    }

    result
}

fn single_quote(prev: Option<char>, rest: &[char]) -> &'static str {
    let next = rest.first().copied();

    if let [first, second, 's', ..] = rest {
        if first.is_ascii_digit() && second.is_ascii_digit() {
            return CLOSE_SINGLE;
        }
    }
    if prev.is_none() && starts_with_punctuation(rest) {
        return CLOSE_SINGLE;
    }
    if opens_after(prev) && next.is_some_and(is_word) {
        return OPEN_SINGLE;
    }
    if prev.is_some_and(closes_after) {
        return CLOSE_SINGLE;
    }
    if next.is_none_or(char::is_whitespace) {
        return CLOSE_SINGLE;
    }
    if next == Some('s') && rest.get(1).is_none_or(|c| !is_word(*c)) {
        return CLOSE_SINGLE;
    }

    OPEN_SINGLE
}

fn double_quote(prev: Option<char>, rest: &[char]) -> &'static str {
    let next = rest.first().copied();

    if prev.is_none() && starts_with_punctuation(rest) {
        return CLOSE_DOUBLE;
    }
    if opens_after(prev) && next.is_some_and(is_word) {
        return OPEN_DOUBLE;
    }
    if prev.is_some_and(closes_after) {
        return CLOSE_DOUBLE;
    }
    if next.is_none_or(char::is_whitespace) {
        return CLOSE_DOUBLE;
    }

    OPEN_DOUBLE
}

/// Punctuation followed by more punctuation or whitespace, as in `".` at
/// the start of a token.
fn starts_with_punctuation(rest: &[char]) -> bool {
    match rest {
        [first, second, ..] => first.is_ascii_punctuation() && !is_word(*second),
        [first] => first.is_ascii_punctuation(),
        [] => false,
    }
}

fn opens_after(prev: Option<char>) -> bool {
    prev.is_none_or(|c| c.is_whitespace() || matches!(c, '-' | '\u{2013}' | '\u{2014}'))
}

fn closes_after(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '[' | '{' | '(' | '-' | '\u{2013}' | '\u{2014}'))
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
