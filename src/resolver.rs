// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::env;

use indexmap::IndexMap;

use crate::ast::Section;
use crate::macros::debug;
use crate::properties;

/// Resolves `${name}` references while a document is being loaded.
///
/// Lookup order: keys already parsed into the current section, then the
/// process-wide properties, then the process environment. The properties and
/// environment are captured once per section, on first use, and dropped with
/// the resolver at the end of the load.
#[derive(Default)]
pub struct Resolver {
    contexts: HashMap<String, IndexMap<String, String>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute every reference in `text`. Unknown names are left as-is.
    pub fn resolve(&mut self, section_name: &str, text: &str, section: Option<&Section>) -> String {
        let context = self
            .contexts
            .entry(section_name.to_string())
            .or_insert_with(|| {
                debug!(section = section_name, "Building interpolation context");
                build_context()
            });

        let lookup = |name: &str| -> Option<String> {
            section
                .and_then(|s| s.get(name))
                .map(|v| v.to_string())
                .or_else(|| context.get(name).cloned())
        };

        substitute(text, &lookup, &mut Vec::new())
    }
}

fn build_context() -> IndexMap<String, String> {
    let mut context: IndexMap<String, String> = env::vars().collect();
    context.extend(properties::snapshot());
    context
}

/// Expand `${name}` and `${name:-default}` in `text`.
///
/// - names may themselves contain references (`${${which}}`)
/// - substituted values are expanded again
/// - `$${` produces a literal `${`
/// - references that are unknown, unclosed or cyclic stay literal
pub fn substitute<F>(text: &str, lookup: &F, stack: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains("${") {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        if rest.starts_with("$${") {
            out.push_str("${");
            i += 3;
            continue;
        }

        if rest.starts_with("${") {
            let Some(end) = find_close(text, i + 2) else {
                out.push_str(rest);
                break;
            };
            let inner = &text[i + 2..end];
            out.push_str(&expand_reference(inner, lookup, stack));
            i = end + 1;
            continue;
        }

        let ch = rest.chars().next().unwrap_or_default();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

fn expand_reference<F>(inner: &str, lookup: &F, stack: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let expr = substitute(inner, lookup, stack);
    let (name, default) = match expr.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (expr.as_str(), None),
    };

    if stack.iter().any(|n| n == name) {
        debug!(name, "Cyclic reference left unresolved");
        return format!("${{{}}}", inner);
    }

    match lookup(name) {
        Some(value) => {
            stack.push(name.to_string());
            let resolved = substitute(&value, lookup, stack);
            stack.pop();
            resolved
        }
        None => match default {
            Some(default) => default.to_string(),
            None => format!("${{{}}}", inner),
        },
    }
}

/// Byte index of the `}` closing a reference whose body starts at `from`.
fn find_close(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == b'}' {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    fn table(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let lookup = table(&[]);
        assert_eq!(substitute("no refs here", &lookup, &mut Vec::new()), "no refs here");
    }

    #[test]
    fn test_simple_and_recursive() {
        let lookup = table(&[("base", "hello"), ("full", "${base} world")]);
        assert_eq!(substitute("${base} world", &lookup, &mut Vec::new()), "hello world");
        assert_eq!(substitute("say ${full}!", &lookup, &mut Vec::new()), "say hello world!");
    }

    #[test]
    fn test_substitution_in_names() {
        let lookup = table(&[("which", "b"), ("b", "bee")]);
        assert_eq!(substitute("${${which}}", &lookup, &mut Vec::new()), "bee");
    }

    #[test]
    fn test_unknown_and_defaults() {
        let lookup = table(&[]);
        assert_eq!(substitute("${missing}", &lookup, &mut Vec::new()), "${missing}");
        assert_eq!(substitute("${missing:-fallback}", &lookup, &mut Vec::new()), "fallback");
        assert_eq!(substitute("open ${never", &lookup, &mut Vec::new()), "open ${never");
    }

    #[test]
    fn test_escape_and_cycles() {
        let lookup = table(&[("a", "${b}"), ("b", "${a}"), ("x", "1")]);
        assert_eq!(substitute("$${x}", &lookup, &mut Vec::new()), "${x}");
        assert_eq!(substitute("${a}", &lookup, &mut Vec::new()), "${a}");
    }

    #[test]
    fn test_multibyte_text() {
        let lookup = table(&[("name", "wörld")]);
        assert_eq!(substitute("héllo ${name} ✓", &lookup, &mut Vec::new()), "héllo wörld ✓");
    }

    #[test]
    fn test_section_keys_shadow_properties() {
        properties::set_property("resolver.test.shadowed", "from properties");
        let mut section = Section::new();
        section.insert("resolver.test.shadowed".into(), Value::String("from section".into()));
        section.insert("port".into(), Value::Integer(8080));

        let mut resolver = Resolver::new();
        assert_eq!(
            resolver.resolve("s", "${resolver.test.shadowed}:${port}", Some(&section)),
            "from section:8080"
        );
        assert_eq!(
            resolver.resolve("other", "${resolver.test.shadowed}", None),
            "from properties"
        );
        properties::remove_property("resolver.test.shadowed");
    }

    #[test]
    fn test_env_expansion() {
        let Some((name, value)) = env::vars()
            .find(|(k, v)| {
                !v.contains('$') && !k.contains(['$', '{', '}', ':']) && properties::property(k).is_none()
            })
        else {
            return;
        };
        let mut resolver = Resolver::new();
        assert_eq!(resolver.resolve("s", &format!("${{{}}}", name), None), value);
    }
}
