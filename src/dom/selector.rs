use crate::error::{Result, StyleError};

/// One compound selector: `tag.class#id`, `.class`, `#id` or `*`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

/// Comma separated list of compound selectors
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Parse a selector list. Combinators, attributes and pseudo-classes are
    /// not supported and are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || StyleError::InvalidValue(input.to_string());
        let mut compounds = Vec::new();

        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid());
            }
            compounds.push(Self::parse_compound(part).ok_or_else(invalid)?);
        }

        Ok(Self { compounds })
    }

    fn parse_compound(part: &str) -> Option<Compound> {
        let mut compound = Compound::default();
        let mut chars = part.chars().peekable();

        if chars.peek() == Some(&'*') {
            chars.next();
        } else {
            let tag: String = std::iter::from_fn(|| chars.next_if(|c| is_ident_char(*c))).collect();
            if !tag.is_empty() {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
        }

        while let Some(marker) = chars.next() {
            let name: String = std::iter::from_fn(|| chars.next_if(|c| is_ident_char(*c))).collect();
            if name.is_empty() {
                return None;
            }
            match marker {
                '.' => compound.classes.push(name),
                '#' => compound.id = Some(name),
                _ => return None,
            }
        }

        Some(compound)
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    /// True when any compound of the list matches
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        self.compounds.iter().any(|compound| {
            let tag_ok = compound
                .tag
                .as_ref()
                .map_or(true, |t| t.eq_ignore_ascii_case(tag));
            let id_ok = compound.id.as_deref().map_or(true, |want| Some(want) == id);
            let classes_ok = compound
                .classes
                .iter()
                .all(|want| classes.iter().any(|have| have == want));
            tag_ok && id_ok && classes_ok
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_compound() {
        let selector = Selector::parse("div.box.wide#main").unwrap();
        let compound = &selector.compounds()[0];
        assert_eq!(compound.tag.as_deref(), Some("div"));
        assert_eq!(compound.id.as_deref(), Some("main"));
        assert_eq!(compound.classes, classes(&["box", "wide"]));
    }

    #[test]
    fn test_matching() {
        let selector = Selector::parse(".zapps, #hero").unwrap();
        assert!(selector.matches("div", None, &classes(&["zapps"])));
        assert!(selector.matches("section", Some("hero"), &[]));
        assert!(!selector.matches("div", Some("other"), &classes(&["apps"])));

        let universal = Selector::parse("*").unwrap();
        assert!(universal.matches("span", None, &[]));

        let tag = Selector::parse("DIV").unwrap();
        assert!(tag.matches("div", None, &[]));
    }

    #[test]
    fn test_rejects_unsupported() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse("a:hover").is_err());
        assert!(Selector::parse(".a,,.b").is_err());
        assert!(Selector::parse(".").is_err());
    }
}
