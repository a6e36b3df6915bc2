use std::collections::BTreeMap;

use regex::Regex;

use super::*;
use crate::ast::Value;

impl Ini {
    /// Get a stored value as-is.
    ///
    /// # Examples
    /// ```
    /// # use ini_cfg::{Ini, Value};
    /// let ini: Ini = "[A]\nx=1\n".parse().unwrap();
    /// assert_eq!(ini.get("A", "x"), Some(&Value::Integer(1)));
    /// assert_eq!(ini.get("A", "missing"), None);
    /// ```
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section)?.get(key)
    }

    /// Get a value converted to `T`. A missing section or key is `Ok(None)`;
    /// a value that cannot become `T` is a `TypeError`.
    ///
    /// # Examples
    /// ```
    /// # use ini_cfg::Ini;
    /// # fn main() -> Result<(), ini_cfg::IniError> {
    /// let ini: Ini = "[Numbers]\nlong = 922337203685775808\n".parse()?;
    /// let narrowed: Option<i32> = ini.get_as("Numbers", "long")?;
    /// assert_eq!(narrowed, Some(-858695232));
    /// let text: Option<String> = ini.get_as("Numbers", "long")?;
    /// assert_eq!(text.as_deref(), Some("922337203685775808"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_as<T>(&self, section: &str, key: &str) -> Result<Option<T>, IniError>
    where
        T: TryFrom<Value, Error = IniError>,
    {
        self.get(section, key)
            .cloned()
            .map(T::try_from)
            .transpose()
    }

    /// Get a converted value, or `default` when it is missing or unconvertible.
    pub fn get_or<T>(&self, section: &str, key: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = IniError>,
    {
        self.get_as(section, key).ok().flatten().unwrap_or(default)
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|s| s.contains_key(key))
    }

    /// Keys of a section in insertion order; empty for a missing section.
    pub fn keys(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|s| s.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// A read-only view of a section. `None` means the section does not
    /// exist, which is distinct from an empty section.
    pub fn section(&self, section: &str) -> Option<&Section> {
        self.sections.get(section)
    }

    pub fn section_sorted_by_key(&self, section: &str) -> Option<BTreeMap<String, Value>> {
        self.sections
            .get(section)
            .map(|s| s.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    /// Entries of a section accepted by `filter`, in section order. A
    /// missing section gives an empty result.
    pub fn section_matching<F>(&self, section: &str, mut filter: F) -> Section
    where
        F: FnMut(&str, &Value) -> bool,
    {
        self.sections
            .get(section)
            .map(|s| {
                s.iter()
                    .filter(|(k, v)| filter(k, v))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn section_with_prefix(&self, section: &str, prefix: &str) -> Section {
        self.section_matching(section, |key, _| key.starts_with(prefix))
    }

    /// Entries whose whole key matches `pattern`.
    pub fn section_with_regex(&self, section: &str, pattern: &str) -> Result<Section, IniError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| IniError::PatternError {
            message: e.to_string(),
            pattern: pattern.to_string(),
            hint: Some("Check the regular expression syntax".into()),
            code: Some(601),
        })?;
        Ok(self.section_matching(section, |key, _| regex.is_match(key)))
    }

    /// Insert or overwrite a value, creating the section if needed. Returns
    /// the previous value.
    pub fn put(&mut self, section: &str, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into())
    }

    /// Insert every entry in iteration order.
    pub fn put_all<I, K, V>(&mut self, section: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let target = self.sections.entry(section.to_string()).or_default();
        for (key, value) in entries {
            target.insert(key.into(), value.into());
        }
    }

    pub fn remove_section(&mut self, section: &str) -> Option<Section> {
        self.sections.shift_remove(section)
    }

    pub fn remove_key(&mut self, section: &str, key: &str) -> Option<Value> {
        self.sections.get_mut(section)?.shift_remove(key)
    }

    /// Apply every entry of `other` onto `self`; `other` wins on collisions.
    /// New sections and keys are appended in `other`'s order, overwritten
    /// keys keep their position.
    pub fn merge(&mut self, other: &Ini) {
        for (name, entries) in &other.sections {
            self.put_all(name, entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
}
