use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Result, StyleError};

/// A style property item
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComputedStyle {
    /// Vendor-normalized name
    pub name: String,
    /// Name as reported by the host, prefix included
    pub vendor_name: String,
    pub value: String,
    /// Constituent values of multi-valued properties (transform lists)
    pub values: Vec<String>,
    /// `!important`
    pub priority: bool,
}

impl ComputedStyle {
    pub fn new(name: &str, value: &str, priority: bool) -> Self {
        Self {
            name: name.to_string(),
            vendor_name: name.to_string(),
            value: value.to_string(),
            values: vec![value.to_string()],
            priority,
        }
    }

    /// Break every sub-value into its top-level list items, so a computed
    /// `translate(1px, 2px) rotate(3deg)` becomes two entries
    pub fn expand_values(&mut self) {
        self.values = self.values.iter().flat_map(|v| split_list(v)).collect();
    }

    /// The sub-values as one CSS value, falling back to `value`
    pub fn css_value(&self) -> String {
        if self.values.is_empty() {
            self.value.clone()
        } else {
            self.values.join(" ")
        }
    }
}

/// Split a space separated list value, keeping parenthesised groups intact
pub fn split_list(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in value.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    items.push(std::mem::take(&mut current));
                }
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.is_empty() {
        items.push(current);
    }
    items
}

/// Pulls the function name out of a css setter such as `rotate(45deg)`
fn function_name(value: &str) -> Option<&str> {
    static PROP_NAME: OnceLock<Regex> = OnceLock::new();
    let re = PROP_NAME.get_or_init(|| Regex::new(r"([\w\-]+)\(?\)?").expect("valid regex"));
    re.captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Computed style properties keyed by vendor-normalized name
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ComputedStyleMap {
    entries: BTreeMap<String, ComputedStyle>,
}

impl ComputedStyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, keyed by its normalized name
    pub fn insert(&mut self, style: ComputedStyle) {
        self.entries.insert(style.name.clone(), style);
    }

    /// Set a property, replacing any previous value list
    pub fn add(&mut self, name: &str, value: &str, priority: bool) {
        match self.entries.get_mut(name) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.priority = priority;
                existing.values = vec![value.to_string()];
            }
            None => self.insert(ComputedStyle::new(name, value, priority)),
        }
    }

    /// Merge `value` into a multi-valued property.
    ///
    /// A lone `none` is replaced outright. Otherwise every entry sharing the
    /// new value's function name is replaced, and the value is appended when
    /// nothing matched. `value` and `priority` of an existing record are left
    /// untouched.
    pub fn add_more(&mut self, name: &str, value: &str, priority: bool) {
        let Some(existing) = self.entries.get_mut(name) else {
            self.insert(ComputedStyle::new(name, value, priority));
            return;
        };

        if existing.values.len() == 1 && existing.values[0].trim() == "none" {
            existing.values[0] = value.to_string();
            return;
        }

        let prop = function_name(value);
        let mut found = false;

        if prop.is_some() {
            for current in existing.values.iter_mut() {
                if function_name(current) == prop {
                    *current = value.to_string();
                    found = true;
                }
            }
        }

        if !found {
            existing.values.push(value.to_string());
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&ComputedStyle> {
        self.entries
            .get(name)
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut ComputedStyle> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<ComputedStyle> {
        self.entries.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComputedStyle)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_get() {
        let mut map = ComputedStyleMap::new();
        map.add("width", "120px", true);

        let style = map.get("width").unwrap();
        assert_eq!(style.value, "120px");
        assert!(style.priority);
        assert_eq!(style.values, vec!["120px"]);
        assert_eq!(style.vendor_name, "width");
    }

    #[test]
    fn test_add_overwrites() {
        let mut map = ComputedStyleMap::new();
        map.add("transform", "rotate(1deg)", false);
        map.add_more("transform", "scale(2)", false);
        map.add("transform", "none", true);

        let style = map.get("transform").unwrap();
        assert_eq!(style.values, vec!["none"]);
        assert!(style.priority);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let map = ComputedStyleMap::new();
        assert_eq!(
            map.get("height"),
            Err(StyleError::NotFound("height".to_string()))
        );
        assert!(!map.has("height"));
    }

    #[test]
    fn test_add_more_replaces_none() {
        let mut map = ComputedStyleMap::new();
        map.add("transform", "none", false);
        map.add_more("transform", "rotate(45deg)", false);

        assert_eq!(map.get("transform").unwrap().values, vec!["rotate(45deg)"]);
    }

    #[test]
    fn test_add_more_merges_by_function_name() {
        let mut map = ComputedStyleMap::new();
        map.add_more("transform", "translate(10px, 0px)", false);
        map.add_more("transform", "rotate(10deg)", false);
        map.add_more("transform", "translate(20px, 5px)", true);

        let style = map.get("transform").unwrap();
        assert_eq!(style.values, vec!["translate(20px, 5px)", "rotate(10deg)"]);
        assert_eq!(style.css_value(), "translate(20px, 5px) rotate(10deg)");
        assert!(!style.priority);
    }

    #[test]
    fn test_add_more_does_not_confuse_prefixes() {
        let mut map = ComputedStyleMap::new();
        map.add_more("transform", "translateX(1px)", false);
        map.add_more("transform", "translate(2px, 2px)", false);

        assert_eq!(map.get("transform").unwrap().values.len(), 2);
    }

    #[test]
    fn test_expand_values() {
        let mut style = ComputedStyle::new("transform", "translate(1px, 2px)  rotate(3deg)", false);
        style.expand_values();
        assert_eq!(style.values, vec!["translate(1px, 2px)", "rotate(3deg)"]);
        assert_eq!(split_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_css_value_falls_back_to_value() {
        let mut style = ComputedStyle::new("transform", "none", false);
        style.values.clear();
        assert_eq!(style.css_value(), "none");
    }
}
