// Author: Dustin Pilgrim
// License: MIT

use std::io::BufRead;

use indexmap::IndexMap;

use crate::ast::{Section, Value};
use crate::lexer::{ends_with_continuation, Lexer, Line};
use crate::macros::{debug, trace};
use crate::resolver::Resolver;
use crate::IniError;

pub mod escape;
pub mod number;

/// Section that holds keys appearing before any `[section]` header.
pub const NO_SECTION: &str = "_NO_SECTION";

/// A value whose lines end in a continuation backslash, still collecting.
#[derive(Debug)]
struct Pending {
    key: String,
    value: String,
    interpolate: bool,
}

/// State for a single load. Created per call and dropped at the end, so the
/// interpolation caches never outlive the input they were built for.
struct ParseState {
    section: String,
    pending: Option<Pending>,
    resolver: Option<Resolver>,
}

/// Feeds classified lines into an ordered section store.
pub struct Parser<'a> {
    sections: &'a mut IndexMap<String, Section>,
    state: ParseState,
}

impl<'a> Parser<'a> {
    pub fn new(sections: &'a mut IndexMap<String, Section>, interpolate: bool) -> Self {
        Self {
            sections,
            state: ParseState {
                section: NO_SECTION.to_string(),
                pending: None,
                resolver: interpolate.then(Resolver::new),
            },
        }
    }

    /// Consume `reader` to the end, storing every entry it defines.
    pub fn parse<R: BufRead>(mut self, reader: R) -> Result<(), IniError> {
        let mut lexer = Lexer::new(reader);
        while let Some(line) = lexer.next_line()? {
            trace!(line = lexer.line(), ?line, "Classified line");
            self.feed(line, lexer.line());
        }
        self.finish();
        Ok(())
    }

    /// Apply one classified line.
    ///
    /// A multi-line value is stored only when a non-continued text line
    /// ends it. A new key abandons it, and a section header switches the
    /// section it will be stored in.
    pub fn feed(&mut self, line: Line, line_no: usize) {
        match line {
            Line::Blank | Line::Comment => {}
            Line::Section(name) => {
                debug!(section = %name, "Entering section");
                self.state.section = name;
            }
            Line::Pair { key, value } => {
                self.abandon(line_no);
                let interpolate = value.contains("${");
                let mut value = escape::decode(&value);
                if ends_with_continuation(&value) {
                    value.pop();
                    value.push('\n');
                    self.state.pending = Some(Pending { key, value, interpolate });
                } else {
                    self.store(key, value, interpolate);
                }
            }
            Line::Text { text, continued } => match self.state.pending.as_mut() {
                Some(pending) => {
                    pending.interpolate |= text.contains("${");
                    pending.value.push_str(&text);
                    if continued {
                        pending.value.push('\n');
                    } else if let Some(Pending { key, value, interpolate }) = self.state.pending.take() {
                        trace!(key = %key, "Storing multi-line value");
                        self.store(key, value, interpolate);
                    }
                }
                None => {
                    debug!(line = line_no, "Skipping line outside of any value");
                }
            },
        }
    }

    /// End of input. A value still waiting for its closing line is dropped.
    pub fn finish(&mut self) {
        if let Some(pending) = self.state.pending.take() {
            debug!(key = %pending.key, "Dropping unterminated multi-line value at end of input");
        }
    }

    fn abandon(&mut self, line_no: usize) {
        if let Some(pending) = self.state.pending.take() {
            debug!(key = %pending.key, line = line_no, "Dropping multi-line value interrupted by a new key");
        }
    }

    fn store(&mut self, key: String, logical: String, interpolate: bool) {
        if key.is_empty() {
            debug!("Skipping entry with an empty key");
            return;
        }

        // numbers never interpolate
        let value = match number::normalize(&logical) {
            Value::String(text) if interpolate => match self.state.resolver.as_mut() {
                Some(resolver) => {
                    let section = self.sections.get(&self.state.section);
                    Value::String(resolver.resolve(&self.state.section, &text, section))
                }
                None => Value::String(text),
            },
            other => other,
        };

        self.sections
            .entry(self.state.section.clone())
            .or_default()
            .insert(key, value);
    }
}
