// Author: Dustin Pilgrim
// License: MIT

//! Process-wide configuration properties.
//!
//! Interpolation resolves `${name}` against this table as well as the process
//! environment. The table starts out with a few facts about the host and can
//! be extended at runtime with [`set_property`].

use std::sync::RwLock;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use sysinfo::System;

static PROPERTIES: Lazy<RwLock<IndexMap<String, String>>> =
    Lazy::new(|| RwLock::new(host_properties()));

fn host_properties() -> IndexMap<String, String> {
    let mut props = IndexMap::new();

    let mut put = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            props.insert(key.to_string(), value);
        }
    };

    put("os.name", System::name());
    put("os.version", System::os_version());
    put("os.arch", Some(System::cpu_arch()));
    put("kernel.version", System::kernel_version());
    put("host.name", System::host_name());
    put("user.home", dirs::home_dir().map(|p| p.to_string_lossy().to_string()));
    put(
        "user.dir",
        std::env::current_dir().ok().map(|p| p.to_string_lossy().to_string()),
    );
    put("file.separator", Some(std::path::MAIN_SEPARATOR.to_string()));
    put(
        "line.separator",
        Some(if cfg!(windows) { "\r\n" } else { "\n" }.to_string()),
    );

    props
}

/// Set a property, returning the previous value.
pub fn set_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    let mut props = PROPERTIES.write().unwrap_or_else(|e| e.into_inner());
    props.insert(key.into(), value.into())
}

pub fn property(key: &str) -> Option<String> {
    let props = PROPERTIES.read().unwrap_or_else(|e| e.into_inner());
    props.get(key).cloned()
}

pub fn remove_property(key: &str) -> Option<String> {
    let mut props = PROPERTIES.write().unwrap_or_else(|e| e.into_inner());
    props.shift_remove(key)
}

/// A copy of the current table. Loads take one snapshot per section and
/// never see later changes.
pub fn snapshot() -> IndexMap<String, String> {
    PROPERTIES.read().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_properties_are_seeded() {
        let props = snapshot();
        assert!(props.contains_key("os.arch"));
        assert!(props.contains_key("file.separator"));
        assert!(props.contains_key("line.separator"));
    }

    #[test]
    fn test_set_and_remove() {
        assert_eq!(set_property("test.properties.key", "one"), None);
        assert_eq!(property("test.properties.key"), Some("one".into()));
        assert_eq!(set_property("test.properties.key", "two"), Some("one".into()));
        assert_eq!(remove_property("test.properties.key"), Some("two".into()));
        assert_eq!(property("test.properties.key"), None);
    }
}
