// Author: Dustin Pilgrim
// License: MIT

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::ast::Section;
use crate::macros::debug;
use crate::parser::Parser;
use crate::utils::expand_home;
use crate::IniError;

mod access;
mod conversion;

/// An INI document: ordered sections, each an ordered map of typed values.
///
/// Loads accumulate. Loading a second source into the same `Ini` adds its
/// sections and overwrites keys that already exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Ini {
    sections: IndexMap<String, Section>,
    interpolation: bool,
}

impl Default for Ini {
    fn default() -> Self {
        Self {
            sections: IndexMap::new(),
            interpolation: true,
        }
    }
}

impl Ini {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an INI file, expanding a leading `~/`.
    ///
    /// # Example
    /// ```ignore
    /// let ini = Ini::from_file("settings.ini")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IniError> {
        let mut ini = Self::new();
        ini.load_path(path)?;
        Ok(ini)
    }

    /// Enable or disable `${name}` substitution for subsequent loads.
    pub fn set_interpolation(&mut self, enabled: bool) -> &mut Self {
        self.interpolation = enabled;
        self
    }

    pub fn interpolation(&self) -> bool {
        self.interpolation
    }

    pub fn load_str(&mut self, content: &str) -> Result<(), IniError> {
        self.load_reader(content.as_bytes())
    }

    /// Parse `reader` to the end. Lines must be UTF-8.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<(), IniError> {
        debug!(interpolation = self.interpolation, "Loading INI source");
        Parser::new(&mut self.sections, self.interpolation).parse(reader)?;
        debug!(sections = self.sections.len(), "Loaded INI source");
        Ok(())
    }

    /// Load a file. Fails with `SourceNotFound` before parsing anything when
    /// the file does not exist.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IniError> {
        let path = expand_home(path.as_ref());

        let file = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IniError::SourceNotFound {
                    message: format!("Failed to open file: {}", e),
                    path: path.to_string_lossy().to_string(),
                    hint: Some("Check that the file exists and is readable".into()),
                    code: Some(301),
                }
            } else {
                IniError::Io {
                    message: format!("Failed to open '{}': {}", path.display(), e),
                    hint: None,
                    code: Some(500),
                }
            }
        })?;

        self.load_reader(BufReader::new(file))
    }

    /// Load from `primary`, or from `fallback` when `primary` does not exist.
    pub fn load_path_with_fallback<P: AsRef<Path>>(&mut self, primary: P, fallback: P) -> Result<(), IniError> {
        match self.load_path(&primary) {
            Ok(()) => Ok(()),
            Err(IniError::SourceNotFound { .. }) => {
                self.load_path(&fallback).map_err(|e| match e {
                    IniError::SourceNotFound { message, .. } => IniError::SourceNotFound {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Section names in insertion order.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub(crate) fn raw_sections(&self) -> &IndexMap<String, Section> {
        &self.sections
    }
}

impl FromStr for Ini {
    type Err = IniError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut ini = Self::new();
        ini.load_str(content)?;
        Ok(ini)
    }
}
