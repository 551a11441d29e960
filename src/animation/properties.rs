use serde::{Deserialize, Serialize};
use std::fmt;

use crate::css::color::Color;
use crate::error::{Result, StyleError};

/// Animatable CSS value with interpolation support
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum PropertyValue {
    /// Number with a unit: `10px`, `1.5em`, `45deg`, `50%`
    Length { value: f32, unit: String },
    Number(f32),
    Color(Color),
    /// Functional notation such as `translate(10px, 0px)`
    Function { name: String, args: Vec<PropertyValue> },
    Keyword(String),
}

/// Render a number the way computed styles do: no trailing zeros
fn format_number(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Split `a, b` or `a b` at the top level, ignoring separators in nested parens
fn split_args(input: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | ' ' if depth == 0 => {
                let arg = input[start..idx].trim();
                if !arg.is_empty() {
                    args.push(arg);
                }
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }

    let tail = input[start..].trim();
    if !tail.is_empty() {
        args.push(tail);
    }
    args
}

/// `name(...)` where the closing paren is the final character
fn split_function(value: &str) -> Option<(&str, &str)> {
    let open = value.find('(')?;
    let name = &value[..open];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    let mut depth = 0usize;
    for (idx, c) in value.char_indices().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (idx == value.len() - 1).then(|| (name, &value[open + 1..idx]));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_number(value: &str) -> Option<(f32, &str)> {
    let end = value
        .char_indices()
        .find(|(idx, c)| {
            !(c.is_ascii_digit() || *c == '.' || ((*c == '-' || *c == '+') && *idx == 0))
        })
        .map(|(idx, _)| idx)
        .unwrap_or(value.len());

    let number = value[..end].parse::<f32>().ok()?;
    Some((number, &value[end..]))
}

impl PropertyValue {
    pub fn px(value: f32) -> Self {
        PropertyValue::Length {
            value,
            unit: "px".to_string(),
        }
    }

    pub fn length(value: f32, unit: &str) -> Self {
        PropertyValue::Length {
            value,
            unit: unit.to_string(),
        }
    }

    pub fn function(name: &str, args: Vec<PropertyValue>) -> Self {
        PropertyValue::Function {
            name: name.to_string(),
            args,
        }
    }

    /// Parse a single computed value
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StyleError::InvalidValue(value.to_string()));
        }

        let lower = value.to_ascii_lowercase();
        if value.starts_with('#') || lower.starts_with("rgb(") || lower.starts_with("rgba(") || lower == "transparent" {
            return Color::parse(value).map(PropertyValue::Color);
        }

        if let Some((name, inner)) = split_function(value) {
            let args = split_args(inner)
                .into_iter()
                .map(Self::parse)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::function(name, args));
        }

        if let Some((number, unit)) = split_number(value) {
            return Ok(if unit.is_empty() {
                PropertyValue::Number(number)
            } else if unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
                Self::length(number, &unit.to_ascii_lowercase())
            } else {
                return Err(StyleError::InvalidValue(value.to_string()));
            });
        }

        if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Ok(PropertyValue::Keyword(lower));
        }

        Err(StyleError::InvalidValue(value.to_string()))
    }

    /// Interpolate toward `target`. Values that cannot be blended switch over
    /// at the midpoint.
    pub fn interpolate(&self, target: &PropertyValue, progress: f32) -> PropertyValue {
        let lerp = |from: f32, to: f32| from + (to - from) * progress;

        match (self, target) {
            (
                PropertyValue::Length { value: from, unit: a },
                PropertyValue::Length { value: to, unit: b },
            ) if a == b => Self::length(lerp(*from, *to), a),
            (PropertyValue::Number(from), PropertyValue::Length { value: to, unit }) => {
                Self::length(lerp(*from, *to), unit)
            }
            (PropertyValue::Length { value: from, unit }, PropertyValue::Number(to)) => {
                Self::length(lerp(*from, *to), unit)
            }
            (PropertyValue::Number(from), PropertyValue::Number(to)) => {
                PropertyValue::Number(lerp(*from, *to))
            }
            (PropertyValue::Color(from), PropertyValue::Color(to)) => {
                PropertyValue::Color(from.interpolate(to, progress))
            }
            (
                PropertyValue::Function { name: a, args: from },
                PropertyValue::Function { name: b, args: to },
            ) if a == b && from.len() == to.len() => Self::function(
                a,
                from.iter()
                    .zip(to)
                    .map(|(f, t)| f.interpolate(t, progress))
                    .collect(),
            ),
            _ => {
                if progress < 0.5 {
                    self.clone()
                } else {
                    target.clone()
                }
            }
        }
    }

    /// Starting point for a tween toward `self` when the element has no
    /// usable value of its own
    pub fn zero_like(&self) -> PropertyValue {
        match self {
            PropertyValue::Length { unit, .. } => Self::length(0.0, unit),
            PropertyValue::Number(_) => PropertyValue::Number(0.0),
            PropertyValue::Color(c) => PropertyValue::Color(Color::new(c.r, c.g, c.b, 0.0)),
            PropertyValue::Function { name, args } => {
                Self::function(name, args.iter().map(|a| a.zero_like()).collect())
            }
            PropertyValue::Keyword(_) => self.clone(),
        }
    }

    /// Serialize back to CSS text
    pub fn to_css(&self) -> String {
        match self {
            PropertyValue::Length { value, unit } => format!("{}{}", format_number(*value), unit),
            PropertyValue::Number(value) => format_number(*value),
            PropertyValue::Color(color) => color.to_css(),
            PropertyValue::Function { name, args } => format!(
                "{}({})",
                name,
                args.iter().map(|a| a.to_css()).collect::<Vec<_>>().join(", ")
            ),
            PropertyValue::Keyword(keyword) => keyword.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_parsing() {
        assert_eq!(PropertyValue::parse("100px").unwrap(), PropertyValue::px(100.0));
        assert_eq!(PropertyValue::parse("50%").unwrap(), PropertyValue::length(50.0, "%"));
        assert_eq!(PropertyValue::parse("-1.5EM").unwrap(), PropertyValue::length(-1.5, "em"));
        assert_eq!(PropertyValue::parse("0.4").unwrap(), PropertyValue::Number(0.4));
        assert_eq!(PropertyValue::parse("auto").unwrap(), PropertyValue::Keyword("auto".into()));
        assert!(PropertyValue::parse("").is_err());
        assert!(PropertyValue::parse("10px 20px").is_err());

        match PropertyValue::parse("#FF0000").unwrap() {
            PropertyValue::Color(c) => assert_eq!((c.r, c.g, c.b), (255, 0, 0)),
            other => panic!("expected color, got {other:?}"),
        }
    }

    #[test]
    fn test_function_parsing() {
        let value = PropertyValue::parse("translate(10px, -4px)").unwrap();
        assert_eq!(
            value,
            PropertyValue::function("translate", vec![PropertyValue::px(10.0), PropertyValue::px(-4.0)])
        );
        assert_eq!(value.to_css(), "translate(10px, -4px)");

        let nested = PropertyValue::parse("drop-shadow(1px 2px rgb(0, 0, 0))").unwrap();
        match nested {
            PropertyValue::Function { args, .. } => assert_eq!(args.len(), 3),
            other => panic!("expected function, got {other:?}"),
        }

        assert!(PropertyValue::parse("rotate(1deg) scale(2)").is_err());
    }

    #[test]
    fn test_property_interpolation() {
        let from = PropertyValue::px(100.0);
        let to = PropertyValue::px(200.0);
        assert_eq!(from.interpolate(&to, 0.5), PropertyValue::px(150.0));

        let from = PropertyValue::Number(0.0);
        assert_eq!(from.interpolate(&to, 0.25), PropertyValue::px(50.0));
    }

    #[test]
    fn test_function_interpolation() {
        let from = PropertyValue::parse("rotate(0deg)").unwrap();
        let to = PropertyValue::parse("rotate(90deg)").unwrap();
        assert_eq!(from.interpolate(&to, 0.5).to_css(), "rotate(45deg)");
    }

    #[test]
    fn test_mismatched_values_switch_at_midpoint() {
        let from = PropertyValue::Keyword("block".into());
        let to = PropertyValue::Keyword("none".into());
        assert_eq!(from.interpolate(&to, 0.49), from);
        assert_eq!(from.interpolate(&to, 0.5), to);

        let em = PropertyValue::length(1.0, "em");
        let px = PropertyValue::px(10.0);
        assert_eq!(em.interpolate(&px, 0.2), em);
    }

    #[test]
    fn test_to_css_trims_numbers() {
        assert_eq!(PropertyValue::px(150.0).to_css(), "150px");
        assert_eq!(PropertyValue::px(12.5).to_css(), "12.5px");
        assert_eq!(PropertyValue::Number(1.0 / 3.0).to_css(), "0.333");
        assert_eq!(PropertyValue::Number(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn test_zero_like() {
        assert_eq!(PropertyValue::px(500.0).zero_like(), PropertyValue::px(0.0));
        assert_eq!(
            PropertyValue::parse("scale(2, 2)").unwrap().zero_like().to_css(),
            "scale(0, 0)"
        );
    }
}
