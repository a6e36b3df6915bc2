use std::fmt;

/// The main error type for INI loading, storing and typed retrieval.
///
/// Lookup misses are never errors; they surface as `None` or empty results.
#[derive(Debug, Clone, PartialEq)]
pub enum IniError {
    /// Raised before any parsing when the input source does not exist.
    SourceNotFound {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for read/write failures, including invalid UTF-8 input.
    Io {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a key filter pattern does not compile.
    PatternError {
        message: String,
        pattern: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl IniError {
    pub fn code(&self) -> Option<u32> {
        match self {
            IniError::SourceNotFound { code, .. }
            | IniError::Io { code, .. }
            | IniError::TypeError { code, .. }
            | IniError::PatternError { code, .. } => *code,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for IniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniError::SourceNotFound { message, path, hint, code } =>
                write!(f, "[INI] Source Not Found '{}': {}{}", path, message, suffix(hint, code)),
            IniError::Io { message, hint, code } =>
                write!(f, "[INI] I/O Error: {}{}", message, suffix(hint, code)),
            IniError::TypeError { message, hint, code } =>
                write!(f, "[INI] Type Error: {}{}", message, suffix(hint, code)),
            IniError::PatternError { message, pattern, hint, code } =>
                write!(f, "[INI] Invalid Pattern '{}': {}{}", pattern, message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for IniError {}

impl From<std::io::Error> for IniError {
    fn from(e: std::io::Error) -> Self {
        IniError::Io {
            message: e.to_string(),
            hint: None,
            code: Some(500),
        }
    }
}
