//! Minimal DOM / CSSOM surface the style helpers and animations run against.

pub mod declaration;
pub mod document;
pub mod element;
pub mod selector;

pub use declaration::{CssStyleDeclaration, Declaration};
pub use document::Document;
pub use element::Element;
pub use selector::Selector;

/// Resolves computed styles for elements, the role `window.getComputedStyle`
/// plays in a browser.
pub trait StyleHost: Send + Sync {
    /// Computed style of `element`, or of its pseudo-element when `pseudo`
    /// is non-empty. `None` when the host cannot resolve it.
    fn computed_style(&self, element: &Element, pseudo: &str) -> Option<CssStyleDeclaration>;
}
