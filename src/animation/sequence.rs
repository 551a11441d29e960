use super::properties::PropertyValue;
use crate::css::color::Color;
use crate::css::computed::{split_list, ComputedStyleMap};
use crate::dom::Element;
use crate::error::Result;

/// One property moving from `from` to `to`
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: String,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub priority: bool,
    /// Merge into a multi-valued property (transform lists) instead of
    /// replacing it
    pub merge: bool,
}

impl Tween {
    pub fn value_at(&self, progress: f32) -> PropertyValue {
        self.from.interpolate(&self.to, progress)
    }
}

/// Writes styles for an animation. `prepare` runs once per element before
/// the first frame and captures where each property starts.
pub trait Sequence: Send + Sync {
    fn name(&self) -> &str;

    fn prepare(&self, element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>>;
}

pub type SequenceBox = Box<dyn Sequence>;

fn blends_with(from: &PropertyValue, to: &PropertyValue) -> bool {
    match (from, to) {
        (PropertyValue::Length { unit: a, .. }, PropertyValue::Length { unit: b, .. }) => a == b,
        (PropertyValue::Number(_), PropertyValue::Length { .. })
        | (PropertyValue::Length { .. }, PropertyValue::Number(_))
        | (PropertyValue::Number(_), PropertyValue::Number(_))
        | (PropertyValue::Color(_), PropertyValue::Color(_)) => true,
        (PropertyValue::Function { name: a, args: x }, PropertyValue::Function { name: b, args: y }) => {
            a == b && x.len() == y.len()
        }
        _ => false,
    }
}

/// Current value of `property` when it can blend into `to`, else `fallback`
fn start_value(
    styles: &ComputedStyleMap,
    property: &str,
    to: &PropertyValue,
    fallback: PropertyValue,
) -> PropertyValue {
    styles
        .get(property)
        .ok()
        .and_then(|style| PropertyValue::parse(&style.value).ok())
        .filter(|from| blends_with(from, to))
        .unwrap_or(fallback)
}

fn priority_of(styles: &ComputedStyleMap, property: &str) -> bool {
    styles.get(property).map(|s| s.priority).unwrap_or(false)
}

fn replace_tween(styles: &ComputedStyleMap, property: &str, to: PropertyValue, fallback: PropertyValue) -> Tween {
    Tween {
        property: property.to_string(),
        from: start_value(styles, property, &to, fallback),
        priority: priority_of(styles, property),
        to,
        merge: false,
    }
}

/// Tween one function of the `transform` list, starting from the element's
/// current function of the same name or from `identity`
fn transform_tween(styles: &ComputedStyleMap, to: PropertyValue, identity: PropertyValue) -> Tween {
    let from = styles
        .get("transform")
        .ok()
        .into_iter()
        .flat_map(|style| style.values.iter().flat_map(|v| split_list(v)))
        .filter_map(|item| PropertyValue::parse(&item).ok())
        .find(|item| blends_with(item, &to))
        .unwrap_or(identity);

    Tween {
        property: "transform".to_string(),
        from,
        to,
        priority: priority_of(styles, "transform"),
        merge: true,
    }
}

/// Animates `width` to a pixel value
#[derive(Debug, Clone, PartialEq)]
pub struct Width {
    pub value: f32,
}

impl Width {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Sequence for Width {
    fn name(&self) -> &str {
        "width"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        Ok(vec![replace_tween(
            styles,
            "width",
            PropertyValue::px(self.value),
            PropertyValue::px(0.0),
        )])
    }
}

/// Animates `height` to a pixel value
#[derive(Debug, Clone, PartialEq)]
pub struct Height {
    pub value: f32,
}

impl Height {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Sequence for Height {
    fn name(&self) -> &str {
        "height"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        Ok(vec![replace_tween(
            styles,
            "height",
            PropertyValue::px(self.value),
            PropertyValue::px(0.0),
        )])
    }
}

/// Animates `opacity`; elements without one start fully opaque
#[derive(Debug, Clone, PartialEq)]
pub struct Opacity {
    pub value: f32,
}

impl Opacity {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
        }
    }
}

impl Sequence for Opacity {
    fn name(&self) -> &str {
        "opacity"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        Ok(vec![replace_tween(
            styles,
            "opacity",
            PropertyValue::Number(self.value),
            PropertyValue::Number(1.0),
        )])
    }
}

/// Animates any property to a parsed CSS value
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTween {
    pub property: String,
    pub to: PropertyValue,
}

impl StyleTween {
    pub fn new(property: &str, to: PropertyValue) -> Self {
        Self {
            property: property.trim().to_ascii_lowercase(),
            to,
        }
    }

    pub fn parse(property: &str, to: &str) -> Result<Self> {
        Ok(Self::new(property, PropertyValue::parse(to)?))
    }
}

impl Sequence for StyleTween {
    fn name(&self) -> &str {
        &self.property
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        Ok(vec![replace_tween(
            styles,
            &self.property,
            self.to.clone(),
            self.to.zero_like(),
        )])
    }
}

/// Animates a color property toward a hex color
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTween {
    pub property: String,
    pub to: Color,
}

impl ColorTween {
    /// `alpha` is a percentage, as with [`crate::css::rgba`]
    pub fn from_hex(property: &str, hex: &str, alpha: u8) -> Result<Self> {
        Ok(Self {
            property: property.trim().to_ascii_lowercase(),
            to: Color::from_hex(hex, alpha)?,
        })
    }
}

impl Sequence for ColorTween {
    fn name(&self) -> &str {
        &self.property
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        let to = PropertyValue::Color(self.to);
        let fallback = to.zero_like();
        Ok(vec![replace_tween(styles, &self.property, to, fallback)])
    }
}

/// `translate(x, y)` in pixels, merged into `transform`
#[derive(Debug, Clone, PartialEq)]
pub struct Translate {
    pub x: f32,
    pub y: f32,
}

impl Sequence for Translate {
    fn name(&self) -> &str {
        "translate"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        let to = PropertyValue::function(
            "translate",
            vec![PropertyValue::px(self.x), PropertyValue::px(self.y)],
        );
        let identity = to.zero_like();
        Ok(vec![transform_tween(styles, to, identity)])
    }
}

/// `rotate(..deg)`, merged into `transform`
#[derive(Debug, Clone, PartialEq)]
pub struct Rotate {
    pub degrees: f32,
}

impl Sequence for Rotate {
    fn name(&self) -> &str {
        "rotate"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        let to = PropertyValue::function("rotate", vec![PropertyValue::length(self.degrees, "deg")]);
        let identity = to.zero_like();
        Ok(vec![transform_tween(styles, to, identity)])
    }
}

/// `scale(x, y)`, merged into `transform`
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Sequence for Scale {
    fn name(&self) -> &str {
        "scale"
    }

    fn prepare(&self, _element: &Element, styles: &ComputedStyleMap) -> Result<Vec<Tween>> {
        let to = PropertyValue::function(
            "scale",
            vec![PropertyValue::Number(self.x), PropertyValue::Number(self.y)],
        );
        let identity =
            PropertyValue::function("scale", vec![PropertyValue::Number(1.0), PropertyValue::Number(1.0)]);
        Ok(vec![transform_tween(styles, to, identity)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(pairs: &[(&str, &str)]) -> ComputedStyleMap {
        let mut map = ComputedStyleMap::new();
        for (name, value) in pairs {
            map.add(name, value, false);
        }
        map
    }

    #[test]
    fn test_width_starts_from_current_value() {
        let element = Element::new("div");
        let tweens = Width::new(500.0)
            .prepare(&element, &styles(&[("width", "100px")]))
            .unwrap();

        assert_eq!(tweens[0].from, PropertyValue::px(100.0));
        assert_eq!(tweens[0].value_at(0.5).to_css(), "300px");
        assert!(!tweens[0].merge);
    }

    #[test]
    fn test_width_from_auto_starts_at_zero() {
        let element = Element::new("div");
        let tweens = Width::new(500.0)
            .prepare(&element, &styles(&[("width", "auto")]))
            .unwrap();
        assert_eq!(tweens[0].from, PropertyValue::px(0.0));
    }

    #[test]
    fn test_opacity_defaults_to_opaque() {
        let element = Element::new("div");
        let tweens = Opacity::new(0.0).prepare(&element, &ComputedStyleMap::new()).unwrap();
        assert_eq!(tweens[0].from, PropertyValue::Number(1.0));
        assert_eq!(tweens[0].value_at(0.25).to_css(), "0.75");
    }

    #[test]
    fn test_priority_is_carried_over() {
        let element = Element::new("div");
        let mut map = ComputedStyleMap::new();
        map.add("height", "10px", true);
        let tweens = Height::new(20.0).prepare(&element, &map).unwrap();
        assert!(tweens[0].priority);
    }

    #[test]
    fn test_color_tween() {
        let element = Element::new("div");
        let tween = ColorTween::from_hex("background-color", "#fff", 100)
            .unwrap()
            .prepare(&element, &styles(&[("background-color", "rgb(0, 0, 0)")]))
            .unwrap()
            .remove(0);

        assert_eq!(tween.value_at(1.0).to_css(), "rgba(255,255,255,1.00)");
        assert!(ColorTween::from_hex("color", "#zz", 100).is_err());
    }

    #[test]
    fn test_rotate_starts_from_existing_transform_function() {
        let element = Element::new("div");
        let map = styles(&[("transform", "translate(5px, 5px) rotate(30deg)")]);
        let tween = Rotate { degrees: 90.0 }.prepare(&element, &map).unwrap().remove(0);

        assert!(tween.merge);
        assert_eq!(tween.from.to_css(), "rotate(30deg)");
        assert_eq!(tween.value_at(0.5).to_css(), "rotate(60deg)");
    }

    #[test]
    fn test_scale_identity() {
        let element = Element::new("div");
        let tween = Scale { x: 2.0, y: 3.0 }
            .prepare(&element, &ComputedStyleMap::new())
            .unwrap()
            .remove(0);
        assert_eq!(tween.from.to_css(), "scale(1, 1)");
        assert_eq!(tween.value_at(1.0).to_css(), "scale(2, 3)");
    }

    #[test]
    fn test_style_tween_parse() {
        assert!(StyleTween::parse("margin-left", "12px").is_ok());
        assert!(StyleTween::parse("margin-left", "").is_err());
    }
}
