use std::borrow::Cow;

/// Remove an inline comment from `line`.
///
/// An unescaped `#` or `;` ends the line content; `\#` and `\;` become the
/// literal marker. A marker at position 0 has no preceding backslash and
/// always starts a comment.
pub fn strip_inline_comments(line: &str) -> Cow<'_, str> {
    if !line.contains(['#', ';']) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        if ch == '#' || ch == ';' {
            if out.ends_with('\\') {
                out.pop();
                out.push(ch);
                continue;
            }
            break;
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// True when `line` ends in a backslash. Key/value lines are tested after
/// escape decoding, so `C:\\` continues there as well.
pub fn ends_with_continuation(line: &str) -> bool {
    line.ends_with('\\')
}
