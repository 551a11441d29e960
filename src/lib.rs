//! Stylefx - computed-style helpers and timed CSS property animation
//!
//! This crate reads and mutates computed style properties of DOM elements,
//! converts hex colors to `rgb()`/`rgba()` strings and drives property
//! animations against live elements through a small host seam.

pub mod animation;
pub mod config;
pub mod css;
pub mod dom;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, StyleError};

pub use animation::{query_sequence, Animation, Animator, EasingFunction, PropertyValue};
pub use animation::{Frame, Sequence, Stat, StatConfig, Timeline};
pub use css::{rgba, vendorize, Color, ComputedStyle, ComputedStyleMap};
pub use dom::{CssStyleDeclaration, Document, Element, StyleHost};
