use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::declaration::CssStyleDeclaration;
use super::element::Element;
use super::selector::Selector;
use super::StyleHost;
use crate::error::Result;

#[derive(Debug, Default)]
struct DocumentData {
    elements: Vec<Element>,
    defaults: HashMap<String, CssStyleDeclaration>,
}

/// In-memory document acting as the style host for animations.
///
/// Computed styles are resolved by layering the user-agent defaults
/// (`*` first, then the element's tag) under the element's inline style.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentData>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element and attach it to the document
    pub fn create_element(&self, tag_name: &str) -> Element {
        let element = Element::new(tag_name);
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .elements
            .push(element.clone());
        element
    }

    pub fn elements(&self) -> Vec<Element> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .elements
            .clone()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.elements()
            .into_iter()
            .find(|e| e.id().as_deref() == Some(id))
    }

    /// Elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let selector = Selector::parse(selector)?;
        let matched: Vec<Element> = self
            .elements()
            .into_iter()
            .filter(|e| e.matches(&selector))
            .collect();
        debug!("Selector matched {} element(s)", matched.len());
        Ok(matched)
    }

    /// Set the user-agent default style for a tag (`*` applies to all)
    pub fn set_default_style(&self, tag_name: &str, style: CssStyleDeclaration) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .defaults
            .insert(tag_name.trim().to_ascii_lowercase(), style);
    }

    fn defaults_for(&self, tag_name: &str) -> CssStyleDeclaration {
        let data = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut resolved = CssStyleDeclaration::new();
        if let Some(universal) = data.defaults.get("*") {
            resolved.cascade(universal);
        }
        if let Some(tag) = data.defaults.get(tag_name) {
            resolved.cascade(tag);
        }
        resolved
    }
}

impl StyleHost for Document {
    fn computed_style(&self, element: &Element, pseudo: &str) -> Option<CssStyleDeclaration> {
        let declared = if pseudo.trim().is_empty() {
            element.style()
        } else {
            element.pseudo_style(pseudo)?
        };

        let mut resolved = self.defaults_for(&element.tag_name());
        resolved.cascade(&declared);
        Some(resolved.into_computed())
    }
}
