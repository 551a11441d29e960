use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::declaration::CssStyleDeclaration;
use super::selector::Selector;
use crate::error::Result;

#[derive(Debug, Default)]
struct ElementData {
    tag_name: String,
    id: Option<String>,
    classes: Vec<String>,
    style: CssStyleDeclaration,
    pseudo: HashMap<String, CssStyleDeclaration>,
}

/// Live handle to an element. Clones share the same underlying node, so a
/// write through one handle is visible through every other.
#[derive(Clone, Default)]
pub struct Element {
    inner: Arc<RwLock<ElementData>>,
}

/// `:before` and `::before` address the same pseudo-element
pub(crate) fn normalize_pseudo(pseudo: &str) -> String {
    let trimmed = pseudo.trim().trim_start_matches(':');
    format!("::{}", trimmed.to_ascii_lowercase())
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ElementData {
                tag_name: tag_name.trim().to_ascii_lowercase(),
                ..Default::default()
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ElementData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElementData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tag_name(&self) -> String {
        self.read().tag_name.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.read().id.clone()
    }

    pub fn set_id(&self, id: &str) {
        self.write().id = Some(id.to_string());
    }

    pub fn class_list(&self) -> Vec<String> {
        self.read().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.read().classes.iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut data = self.write();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    /// Snapshot of the inline style
    pub fn style(&self) -> CssStyleDeclaration {
        self.read().style.clone()
    }

    pub fn set_style(&self, style: CssStyleDeclaration) {
        self.write().style = style;
    }

    pub fn set_style_property(&self, name: &str, value: &str, priority: &str) -> Result<()> {
        self.write().style.set_property(name, value, priority)
    }

    pub fn remove_style_property(&self, name: &str) -> Result<String> {
        self.write().style.remove_property(name)
    }

    /// Register the declared style of a pseudo-element (`::before`, ...)
    pub fn set_pseudo_style(&self, pseudo: &str, style: CssStyleDeclaration) {
        self.write().pseudo.insert(normalize_pseudo(pseudo), style);
    }

    pub fn pseudo_style(&self, pseudo: &str) -> Option<CssStyleDeclaration> {
        self.read().pseudo.get(&normalize_pseudo(pseudo)).cloned()
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        let data = self.read();
        selector.matches(&data.tag_name, data.id.as_deref(), &data.classes)
    }

    /// Identity comparison, not structural
    pub fn same_node(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Short label such as `div#main.box`
    pub fn label(&self) -> String {
        let data = self.read();
        let mut label = data.tag_name.clone();
        if let Some(id) = &data.id {
            label.push('#');
            label.push_str(id);
        }
        for class in &data.classes {
            label.push('.');
            label.push_str(class);
        }
        label
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.label())
    }
}
