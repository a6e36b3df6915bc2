// Author: Dustin Pilgrim
// License: MIT

/// Escape rules, applied once each, globally, in this order. Later rules
/// see the output of earlier ones, so `\\t` decodes to a tab.
const ESCAPES: &[(&str, &str)] = &[
    ("\\\"", "\""),
    ("\\'", "'"),
    ("\\\\", "\\"),
    ("\\t", "\t"),
    ("\\r", "\r"),
    ("\\n", "\n"),
    ("\\0", "\0"),
    ("\\b", "\u{8}"),
    ("\\f", "\u{c}"),
    ("\\#", "#"),
    ("\\=", "="),
    ("\\:", ":"),
];

/// Decode a trimmed raw value: strip one pair of surrounding quotes, then
/// apply the escape rules.
pub fn decode(raw: &str) -> String {
    let mut out = unquote(raw).to_string();
    for (pattern, replacement) in ESCAPES {
        if out.contains(pattern) {
            out = out.replace(pattern, replacement);
        }
    }
    out
}

/// Double quotes win over single quotes; only one pair is removed.
fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_are_stripped_once() {
        assert_eq!(decode("\"Hello\""), "Hello");
        assert_eq!(decode("'Henry'"), "Henry");
        assert_eq!(decode("\"'Henry'\""), "'Henry'");
        assert_eq!(decode("\""), "\"");
    }

    #[test]
    fn test_escaped_quotes_survive() {
        assert_eq!(decode(r#"\"Henry\""#), "\"Henry\"");
        assert_eq!(decode(r"\'Henry\'"), "'Henry'");
        assert_eq!(decode(r#"Henry\""#), "Henry\"");
        assert_eq!(decode(r#"\"Henry"#), "\"Henry");
        assert_eq!(decode(r#"Henry\"s hello"#), "Henry\"s hello");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(decode(r"Henry\thello"), "Henry\thello");
        assert_eq!(decode(r"Henry\rhello"), "Henry\rhello");
        assert_eq!(decode(r"Henry\nhello"), "Henry\nhello");
        assert_eq!(decode(r"Henry\0hello"), "Henry\0hello");
        assert_eq!(decode(r"Henry\bhello"), "Henry\u{8}hello");
        assert_eq!(decode(r"Henry\fhello"), "Henry\u{c}hello");
    }

    #[test]
    fn test_literal_escapes() {
        assert_eq!(decode(r"Henry\\s hello"), "Henry\\s hello");
        assert_eq!(decode(r"Henry\#hello"), "Henry#hello");
        assert_eq!(decode(r"Henry\=hello"), "Henry=hello");
        assert_eq!(decode(r"Henry\:hello"), "Henry:hello");
    }

    #[test]
    fn test_rules_apply_in_order() {
        // `\\` collapses before `\t` is considered
        assert_eq!(decode(r"a\\tb"), "a\tb");
    }
}
