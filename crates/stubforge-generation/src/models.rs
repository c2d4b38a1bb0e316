//! Core data models for stub generation

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Token name to replacement value
pub type Replacements = HashMap<String, String>;

/// A stub template as read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stub name (file name without `.stub`)
    pub name: String,
    /// Raw template text
    pub content: String,
}

impl Template {
    /// Create a template
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Distinct `{{token}}` names in order of first appearance.
    ///
    /// Scans the way compilation does: a span whose text starts with `{` is
    /// left to the `{{` one byte further on, so `{{{name}}}` reports `name`.
    pub fn placeholders(&self) -> Vec<String> {
        let text = self.content.as_str();
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut pos = 0;
        let mut close: Option<usize> = None;

        while let Some(found) = text[pos..].find("{{") {
            let open = pos + found;
            let start = open + 2;

            if close.map_or(true, |c| c < start) {
                close = text[start..].find("}}").map(|c| start + c);
            }
            let Some(end) = close else {
                break;
            };

            let token = &text[start..end];
            if token.starts_with('{') {
                pos = open + 1;
                continue;
            }
            if seen.insert(token) {
                names.push(token.to_string());
            }
            pos = end + 2;
        }

        names
    }
}
