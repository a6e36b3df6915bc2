use std::borrow::Cow;
use std::path::Path;

/// Expand a leading `~/` to the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> Cow<'_, Path> {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.join(rest));
    }
    Cow::Borrowed(path)
}

/// Split header text into comment lines. `Some("")` still yields one empty
/// line so the header marker is written.
pub fn header_lines(comments: &str) -> Vec<&str> {
    if comments.is_empty() {
        vec![""]
    } else {
        comments.lines().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/etc/app.ini");
        assert_eq!(expand_home(plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/app.ini")), home.join("app.ini"));
        }
    }

    #[test]
    fn test_header_lines() {
        assert_eq!(header_lines(""), vec![""]);
        assert_eq!(header_lines("one\ntwo"), vec!["one", "two"]);
        assert_eq!(header_lines("trailing\n"), vec!["trailing"]);
    }
}
