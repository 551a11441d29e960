use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Split a 3 or 6 digit hex color (optional leading `#`) into its channels.
pub fn to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    let invalid = || StyleError::InvalidHex(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match digits.len() {
        3 => {
            let doubled: Vec<String> = digits.chars().map(|c| format!("{c}{c}")).collect();
            Ok((
                channel(&doubled[0])?,
                channel(&doubled[1])?,
                channel(&doubled[2])?,
            ))
        }
        6 => Ok((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(invalid()),
    }
}

/// Hex color to `rgba(r,g,b,a)`. `alpha` is a percentage (0-100), rendered
/// as a two-decimal fraction.
pub fn rgba(hex: &str, alpha: u8) -> Result<String> {
    let (r, g, b) = to_rgb(hex)?;
    Ok(format_rgba(r, g, b, f32::from(alpha.min(100)) / 100.0))
}

/// Hex color to `rgb(r,g,b)`
pub fn rgb(hex: &str) -> Result<String> {
    let (r, g, b) = to_rgb(hex)?;
    Ok(format!("rgb({},{},{})", r, g, b))
}

fn format_rgba(r: u8, g: u8, b: u8, a: f32) -> String {
    format!("rgba({},{},{},{:.2})", r, g, b, a)
}

/// RGBA color with a fractional alpha
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0.0)
    }

    /// Parse a hex color with an alpha percentage (0-100)
    pub fn from_hex(hex: &str, alpha: u8) -> Result<Self> {
        let (r, g, b) = to_rgb(hex)?;
        Ok(Self::new(r, g, b, f32::from(alpha.min(100)) / 100.0))
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(..)`, `rgba(..)` or `transparent`
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::transparent());
        }
        if value.starts_with('#') {
            return Self::from_hex(value, 100);
        }

        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| StyleError::InvalidValue(value.to_string()))?;

        let parts: Vec<&str> = inner
            .split(|c| c == ',' || c == '/' || c == ' ')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 3 && parts.len() != 4 {
            return Err(StyleError::InvalidValue(value.to_string()));
        }

        let channel = |s: &str| {
            s.parse::<f32>()
                .map(|v| v.round().clamp(0.0, 255.0) as u8)
                .map_err(|_| StyleError::InvalidValue(value.to_string()))
        };
        let alpha = match parts.get(3) {
            Some(a) => match a.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().map(|v| v / 100.0),
                None => a.parse::<f32>(),
            }
            .map_err(|_| StyleError::InvalidValue(value.to_string()))?,
            None => 1.0,
        };

        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    pub fn interpolate(&self, target: &Color, progress: f32) -> Color {
        let lerp = |from: u8, to: u8| {
            (f32::from(from) + (f32::from(to) - f32::from(from)) * progress)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color::new(
            lerp(self.r, target.r),
            lerp(self.g, target.g),
            lerp(self.b, target.b),
            self.a + (target.a - self.a) * progress,
        )
    }

    pub fn to_css(&self) -> String {
        format_rgba(self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex() {
        assert_eq!(to_rgb("fff").unwrap(), (255, 255, 255));
        assert_eq!(to_rgb("#0a3").unwrap(), (0, 170, 51));
    }

    #[test]
    fn test_every_short_hex_doubles_its_nibbles() {
        for value in 0u16..4096 {
            let hex = format!("{:03x}", value);
            let nibble = |shift: u16| ((value >> shift) & 0xf) as u8 * 17;
            let expected = (nibble(8), nibble(4), nibble(0));

            assert_eq!(to_rgb(&hex).unwrap(), expected, "{hex}");
            assert_eq!(to_rgb(&format!("#{hex}")).unwrap(), expected, "#{hex}");
            assert_eq!(
                to_rgb(&hex.to_ascii_uppercase()).unwrap(),
                expected,
                "{hex} uppercase"
            );
            assert_eq!(
                rgba(&hex, 50).unwrap(),
                format!("rgba({},{},{},0.50)", expected.0, expected.1, expected.2)
            );
        }
    }

    #[test]
    fn test_long_hex() {
        assert_eq!(to_rgb("#FF8000").unwrap(), (255, 128, 0));
        assert_eq!(to_rgb("1e90ff").unwrap(), (30, 144, 255));
    }

    #[test]
    fn test_invalid_hex() {
        for bad in ["", "#", "ff", "ffff", "#fffff", "#ggg", "#12345z", "#ffé"] {
            assert_eq!(to_rgb(bad), Err(StyleError::InvalidHex(bad.to_string())), "{bad}");
        }
    }

    #[test]
    fn test_rgba_scales_alpha() {
        assert_eq!(rgba("fff", 50).unwrap(), "rgba(255,255,255,0.50)");
        assert_eq!(rgba("#000000", 0).unwrap(), "rgba(0,0,0,0.00)");
        assert_eq!(rgba("#ff8000", 100).unwrap(), "rgba(255,128,0,1.00)");
        assert_eq!(rgba("#ff8000", 7).unwrap(), "rgba(255,128,0,0.07)");
        assert_eq!(rgba("#ff8000", 250).unwrap(), "rgba(255,128,0,1.00)");
        assert_eq!(rgb("#0a3").unwrap(), "rgb(0,170,51)");
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::parse("rgb(255, 128, 0)").unwrap(), Color::new(255, 128, 0, 1.0));
        assert_eq!(Color::parse("rgba(1,2,3,0.5)").unwrap(), Color::new(1, 2, 3, 0.5));
        assert_eq!(Color::parse("#fff").unwrap(), Color::new(255, 255, 255, 1.0));
        assert_eq!(Color::parse("transparent").unwrap(), Color::transparent());
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("rgb(1,2)").is_err());
    }

    #[test]
    fn test_color_interpolation() {
        let red = Color::new(255, 0, 0, 1.0);
        let blue = Color::new(0, 0, 255, 0.0);

        let mid = red.interpolate(&blue, 0.5);
        assert_eq!(mid, Color::new(128, 0, 128, 0.5));
        assert_eq!(mid.to_css(), "rgba(128,0,128,0.50)");
        assert_eq!(red.to_hex(), "#ff0000");
    }
}
