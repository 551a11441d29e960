//! Computed-style lookups against a [`StyleHost`], vendor-name handling and
//! color conversion.

use tracing::debug;

use crate::dom::{CssStyleDeclaration, Element, StyleHost};
use crate::error::{Result, StyleError};

pub mod color;
pub mod computed;
pub mod vendor;

pub use color::{rgb, rgba, to_rgb, Color};
pub use computed::{ComputedStyle, ComputedStyleMap};
pub use vendor::{strip_vendor_prefix, vendorize, VENDOR_TAGS};

/// Computed style declaration of `elem`, or of its pseudo-element `pseudo`
pub fn get_computed_style<H>(host: &H, elem: &Element, pseudo: &str) -> Result<CssStyleDeclaration>
where
    H: StyleHost + ?Sized,
{
    host.computed_style(elem, pseudo).ok_or_else(|| {
        StyleError::NotFound(if pseudo.is_empty() {
            elem.label()
        } else {
            format!("{}{}", elem.label(), pseudo)
        })
    })
}

/// Remove `prop` from a style declaration. Computed declarations are
/// read-only in a browser, so failures are swallowed.
pub fn remove_computed_style_value(css: &mut CssStyleDeclaration, prop: &str) {
    if let Err(e) = css.remove_property(prop) {
        debug!("Ignoring failed removal of '{}': {}", prop, e);
    }
}

pub fn get_computed_style_value<H>(host: &H, elem: &Element, pseudo: &str, prop: &str) -> Result<String>
where
    H: StyleHost + ?Sized,
{
    let css = get_computed_style(host, elem, pseudo)?;
    get_computed_style_value_with(&css, prop)
}

/// Value of `prop` in an already resolved declaration
pub fn get_computed_style_value_with(css: &CssStyleDeclaration, prop: &str) -> Result<String> {
    css.get_property_value(prop)
        .map(str::to_string)
        .ok_or_else(|| StyleError::NotFound(prop.to_string()))
}

/// `1` when `prop` is `!important`, `0` otherwise
pub fn get_computed_style_priority(css: &CssStyleDeclaration, prop: &str) -> Result<u8> {
    let priority = css
        .get_property_priority(prop)
        .ok_or_else(|| StyleError::NotFound(prop.to_string()))?;

    Ok(if priority.trim().is_empty() { 0 } else { 1 })
}

/// Computed style properties of `elem` keyed by vendor-stripped name, so
/// properties can be read without caring which engine prefix the host used.
pub fn get_computed_style_map<H>(host: &H, elem: &Element, pseudo: &str) -> Result<ComputedStyleMap>
where
    H: StyleHost + ?Sized,
{
    let css = get_computed_style(host, elem, pseudo)?;
    let mut style_map = ComputedStyleMap::new();

    for decl in css.iter() {
        let name = strip_vendor_prefix(&decl.name);
        let values = if decl.value.trim() == "none" {
            Vec::new()
        } else {
            vec![decl.value.clone()]
        };

        style_map.insert(ComputedStyle {
            name,
            vendor_name: decl.name.clone(),
            value: decl.value.clone(),
            values,
            priority: decl.important,
        });
    }

    debug!("Computed {} style properties for {}", style_map.len(), elem.label());
    Ok(style_map)
}

/// Unit understood by the browser; anything unrecognised becomes `px`
pub fn unit(u: &str) -> &str {
    match u {
        "rem" | "em" | "px" | "%" | "vw" => u,
        _ => "px",
    }
}
