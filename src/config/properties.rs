use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::Result;

/// `key=value` settings with typed lookups.
///
/// Lines starting with `#` or `!` are comments. The key ends at the first
/// `=`, `:` or whitespace; later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        let mut properties = Self::default();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let split = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace());
            let (key, rest) = match split {
                Some(at) => (&line[..at], &line[at..]),
                None => (line, ""),
            };
            let rest = rest.trim_start();
            let value = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim_start();
            properties.set(key, value);
        }
        properties
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Parsed number, `None` when missing or not numeric.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key)?.trim().parse().ok()
    }

    pub fn get_double(&self, key: &str) -> f64 {
        self.get_number(key).unwrap_or(0.0)
    }

    /// True only for the literal value `true`.
    pub fn get_boolean(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
