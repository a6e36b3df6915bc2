// Author: Dustin Pilgrim
// License: MIT

use std::io::{BufRead, Lines};

use crate::IniError;

mod scanner;
mod tokenizer;

pub use scanner::{ends_with_continuation, strip_inline_comments};
pub use tokenizer::classify;

/// One classified input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Empty after inline-comment stripping.
    Blank,
    Comment,
    /// A `[name]` header; the name is trimmed and may be empty.
    Section(String),
    /// A `key = value` line. `value` is trimmed but not yet decoded, so
    /// whether it continues is decided after decoding.
    Pair { key: String, value: String },
    /// Anything else: multi-line continuation text or a malformed line.
    /// A trailing backslash has already been removed when `continued`.
    Text { text: String, continued: bool },
}

/// Reads an input source line by line and classifies each line.
pub struct Lexer<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// The 1-based number of the last line returned.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_line(&mut self) -> Result<Option<Line>, IniError> {
        match self.lines.next() {
            None => Ok(None),
            Some(raw) => {
                let raw = raw.map_err(|e| IniError::Io {
                    message: format!("Failed to read line {}: {}", self.line + 1, e),
                    hint: Some("Input must be valid UTF-8 text".into()),
                    code: Some(501),
                })?;
                self.line += 1;
                Ok(Some(classify(&raw)))
            }
        }
    }
}
