// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::json;

use crate::config::Ini;
use crate::utils::{expand_home, header_lines};
use crate::IniError;

impl Ini {
    /// Write the document as INI text.
    ///
    /// Layout: an optional `#` header (one line per line of `comments`),
    /// then each section as `[name]` followed by `key = value` lines and a
    /// blank line. Numbers are written in canonical decimal form.
    ///
    /// # Examples
    /// ```
    /// # use ini_cfg::Ini;
    /// let mut ini = Ini::new();
    /// ini.put("z", "b", 1);
    /// ini.put("z", "a", 2.5);
    ///
    /// let mut out = Vec::new();
    /// ini.store(&mut out, Some("generated")).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "#generated\n[z]\nb = 1\na = 2.5\n\n");
    /// ```
    pub fn store<W: Write>(&self, writer: W, comments: Option<&str>) -> Result<(), IniError> {
        let mut writer = BufWriter::new(writer);

        if let Some(comments) = comments {
            for line in header_lines(comments) {
                writeln!(writer, "#{}", line)?;
            }
        }
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the document to a file, replacing it.
    pub fn store_path<P: AsRef<Path>>(&self, path: P, comments: Option<&str>) -> Result<(), IniError> {
        let path = expand_home(path.as_ref());
        let file = File::create(&path).map_err(|e| IniError::Io {
            message: format!("Failed to create '{}': {}", path.display(), e),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(502),
        })?;
        self.store(file, comments)
    }

    /// Export the document as pretty-printed JSON, one object per section.
    ///
    /// # Examples
    /// ```
    /// # use ini_cfg::Ini;
    /// let ini: Ini = "[server]\nhost = localhost\nport = 8080\n".parse().unwrap();
    /// let json = ini.to_json().unwrap();
    /// let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    /// assert_eq!(v["server"]["port"], 8080);
    /// ```
    pub fn to_json(&self) -> Result<String, IniError> {
        let sections = self
            .raw_sections()
            .iter()
            .map(|(name, entries)| (name.clone(), json!(entries)))
            .collect::<serde_json::Map<_, _>>();

        serde_json::to_string_pretty(&serde_json::Value::Object(sections)).map_err(|e| IniError::Io {
            message: format!("Failed to serialize JSON: {}", e),
            hint: None,
            code: Some(503),
        })
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, entries) in self.raw_sections() {
            writeln!(f, "[{}]", name)?;
            for (key, value) in entries {
                writeln!(f, "{} = {}", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    fn stored(ini: &Ini, comments: Option<&str>) -> String {
        let mut out = Vec::new();
        ini.store(&mut out, comments).expect("Failed to store ini");
        String::from_utf8(out).expect("stored text is UTF-8")
    }

    #[test]
    fn test_order_is_maintained() {
        let mut ini = Ini::new();
        for section in ["z", "c", "g"] {
            for key in ["z", "y", "x"] {
                ini.put(section, key, 1);
            }
        }

        assert_eq!(
            stored(&ini, Some("")),
            "#\n[z]\nz = 1\ny = 1\nx = 1\n\n[c]\nz = 1\ny = 1\nx = 1\n\n[g]\nz = 1\ny = 1\nx = 1\n\n"
        );
    }

    #[test]
    fn test_header_comments() {
        let ini = Ini::new();
        assert_eq!(stored(&ini, None), "");
        assert_eq!(stored(&ini, Some("line one\nline two")), "#line one\n#line two\n");
    }

    #[test]
    fn test_store_then_reload() {
        let mut ini = Ini::new();
        ini.put("String", "string", "Hello1");
        ini.put("Numbers", "double", 3.1455);
        ini.put("String", "string2", "Hello2");
        ini.put("Numbers", "double2", 3.12315);
        ini.put("Numbers", "big", 922337203685775808i64);

        let text = stored(&ini, Some("some comments at the top of the file"));
        let reloaded: Ini = text.parse().expect("Failed to reload stored ini");

        assert_eq!(reloaded.get("String", "string"), Some(&Value::String("Hello1".into())));
        assert_eq!(reloaded.get("String", "string2"), Some(&Value::String("Hello2".into())));
        assert_eq!(reloaded.get("Numbers", "double"), Some(&Value::Float(3.1455)));
        assert_eq!(reloaded.get("Numbers", "double2"), Some(&Value::Float(3.12315)));
        assert_eq!(reloaded.get("Numbers", "big"), Some(&Value::Integer(922337203685775808)));
        assert_eq!(reloaded.sections(), vec!["String", "Numbers"]);
    }

    #[test]
    fn test_store_path_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out.ini");

        let mut ini = Ini::new();
        ini.put("A", "x", 1);
        ini.store_path(&path, None).expect("Failed to store to file");

        let reloaded = Ini::from_file(&path).expect("Failed to reload file");
        assert_eq!(reloaded.get("A", "x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_export_json() {
        let ini: Ini = "[A]\nname = app\nport = 80\nratio = 0.5\n[B]\n"
            .parse()
            .expect("Failed to parse");
        let json_output = ini.to_json().expect("Failed to export JSON");
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        assert_eq!(v["A"]["name"], "app");
        assert_eq!(v["A"]["port"], 80);
        assert_eq!(v["A"]["ratio"], 0.5);
        // sections without entries are not created by a bare header
        assert!(v.get("B").is_none());
    }

    #[test]
    fn test_export_json_keeps_order() {
        let ini: Ini = "[zeta]\nb = 1\na = 2\n[alpha]\nx = 1\n"
            .parse()
            .expect("Failed to parse");
        let json_output = ini.to_json().expect("Failed to export JSON");
        let v: serde_json::Value = serde_json::from_str(&json_output).unwrap();

        let sections: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(sections, vec!["zeta", "alpha"]);
        let keys: Vec<&String> = v["zeta"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
