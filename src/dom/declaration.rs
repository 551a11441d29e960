use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, StyleError};

/// A single `name: value [!important]` entry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// Ordered CSS declaration block, the equivalent of a `CSSStyleDeclaration`.
///
/// Inline styles are writable. Declarations handed out by a [`StyleHost`]
/// are computed snapshots and reject every mutation with
/// [`StyleError::ReadOnly`].
///
/// [`StyleHost`]: crate::dom::StyleHost
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssStyleDeclaration {
    declarations: Vec<Declaration>,
    read_only: bool,
}

/// Custom properties keep their case, everything else is ASCII case-insensitive
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the block into a computed, read-only snapshot
    pub fn into_computed(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Parse a declaration block such as `width: 10px; color: red !important`
    pub fn parse(css_text: &str) -> Result<Self> {
        let mut block = Self::new();

        for chunk in css_text.split(';') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }

            let (name, value) = chunk
                .split_once(':')
                .ok_or_else(|| StyleError::InvalidValue(chunk.to_string()))?;

            let value = value.trim();
            let (value, priority) = match value.to_ascii_lowercase().rfind("!important") {
                Some(pos) => (value[..pos].trim(), "important"),
                None => (value, ""),
            };

            if name.trim().is_empty() || value.is_empty() {
                return Err(StyleError::InvalidValue(chunk.to_string()));
            }

            block.set_property(name, value, priority)?;
        }

        Ok(block)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = normalize_name(name);
        self.declarations.iter().position(|d| d.name == name)
    }

    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|idx| self.declarations[idx].value.as_str())
    }

    /// Returns `"important"` or `""` for present properties
    pub fn get_property_priority(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| {
            if self.declarations[idx].important {
                "important"
            } else {
                ""
            }
        })
    }

    /// Set or replace a property. An empty value removes the property.
    pub fn set_property(&mut self, name: &str, value: &str, priority: &str) -> Result<()> {
        if self.read_only {
            return Err(StyleError::ReadOnly(name.to_string()));
        }

        let value = value.trim();
        if value.is_empty() {
            self.remove_property(name)?;
            return Ok(());
        }

        let important = match priority.trim().to_ascii_lowercase().as_str() {
            "" => false,
            "important" => true,
            other => return Err(StyleError::InvalidValue(format!("!{}", other))),
        };

        match self.position(name) {
            Some(idx) => {
                let decl = &mut self.declarations[idx];
                decl.value = value.to_string();
                decl.important = important;
            }
            None => self.declarations.push(Declaration {
                name: normalize_name(name),
                value: value.to_string(),
                important,
            }),
        }

        Ok(())
    }

    /// Remove a property, returning its previous value (empty when absent)
    pub fn remove_property(&mut self, name: &str) -> Result<String> {
        if self.read_only {
            return Err(StyleError::ReadOnly(name.to_string()));
        }

        Ok(self
            .position(name)
            .map(|idx| self.declarations.remove(idx).value)
            .unwrap_or_default())
    }

    /// Layer `other` on top of this block; later declarations win unless
    /// the existing one is `!important` and the new one is not.
    pub fn cascade(&mut self, other: &CssStyleDeclaration) {
        for decl in &other.declarations {
            match self.position(&decl.name) {
                Some(idx) => {
                    let existing = &mut self.declarations[idx];
                    if existing.important && !decl.important {
                        continue;
                    }
                    existing.value = decl.value.clone();
                    existing.important = decl.important;
                }
                None => self.declarations.push(decl.clone()),
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Property name to value
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.declarations
            .iter()
            .map(|d| (d.name.clone(), d.value.clone()))
            .collect()
    }

    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| {
                if d.important {
                    format!("{}: {} !important;", d.name, d.value)
                } else {
                    format!("{}: {};", d.name, d.value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
