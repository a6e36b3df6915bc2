use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner::{ends_with_continuation, strip_inline_comments};
use super::Line;

static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[;#]").expect("valid regex"));
static SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[([^\]]*)\]\s*$").expect("valid regex"));
static KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([^=]*)=(.*)$").expect("valid regex"));

/// Classify a single raw line. Precedence: comment, section header, then
/// key/value or free text after inline comments are stripped.
pub fn classify(raw: &str) -> Line {
    if COMMENT_LINE.is_match(raw) {
        return Line::Comment;
    }

    if let Some(caps) = SECTION.captures(raw) {
        return Line::Section(caps[1].trim().to_string());
    }

    let stripped = strip_inline_comments(raw);
    if stripped.is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = KEY_VALUE.captures(&stripped) {
        return Line::Pair {
            key: caps[1].trim().to_string(),
            value: caps[2].trim().to_string(),
        };
    }

    let continued = ends_with_continuation(&stripped);
    let mut text = stripped.into_owned();
    if continued {
        text.pop();
    }
    Line::Text { text, continued }
}
