use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Alpha applied to the dot colour for its glow.
pub const GLOW_ALPHA: u8 = 0x99;

/// How much darker the far end of the dot's gradient is.
pub const GRADIENT_SHADE: i16 = -20;

/// A 24 bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from `#rrggbb` or `rrggbb`.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ColorError::InvalidHex(input.to_string()));
        }
        let mut channels = [0_u8; 3];
        hex::decode_to_slice(digits, &mut channels).map_err(|_| ColorError::InvalidHex(input.to_string()))?;
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// Shift every channel by `delta`, clamping at the ends of the range.
    pub fn adjust_brightness(self, delta: i16) -> Self {
        let adjust = |channel: u8| (i32::from(channel) + i32::from(delta)).clamp(0, 255) as u8;
        Self::new(adjust(self.r), adjust(self.g), adjust(self.b))
    }

    /// The dot's glow: this color at [GLOW_ALPHA] on top of `base`.
    pub fn glow_over(self, base: Color) -> Self {
        RgbaColor { color: self, alpha: f32::from(GLOW_ALPHA) / 255.0 }.over(base)
    }

    /// The darker shade used at the far end of the dot's gradient.
    pub fn gradient_shade(self) -> Self {
        self.adjust_brightness(GRADIENT_SHADE)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::from_hex(input)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        Self::from_hex(&input).map_err(serde::de::Error::custom)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

/// Shift the brightness of a hex color string.
///
/// Returns `None` if the input isn't a 6 digit hex color. Inputs should be validated when
/// they enter the configuration; this never fails loudly.
pub fn adjust_brightness(hex_color: &str, delta: i16) -> Option<String> {
    Color::from_hex(hex_color).ok().map(|color| color.adjust_brightness(delta).to_hex())
}

/// A color with an alpha channel, written as `rgba(r, g, b, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbaColor {
    pub color: Color,
    pub alpha: f32,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { color: Color::new(r, g, b), alpha }
    }

    /// Alpha blend this color on top of `base`.
    pub fn over(self, base: Color) -> Color {
        let alpha = self.alpha.clamp(0.0, 1.0);
        let blend = |top: u8, bottom: u8| (top as f32 * alpha + bottom as f32 * (1.0 - alpha)).round() as u8;
        Color::new(
            blend(self.color.r, base.r),
            blend(self.color.g, base.g),
            blend(self.color.b, base.b),
        )
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Color { r, g, b } = self.color;
        write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

impl FromStr for RgbaColor {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidRgba(input.to_string());
        let trimmed = input.trim();
        let (body, has_alpha) = if let Some(body) = trimmed.strip_prefix("rgba(") {
            (body, true)
        } else if let Some(body) = trimmed.strip_prefix("rgb(") {
            (body, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<_> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }
        let channel = |part: &str| part.parse::<u8>().map_err(|_| invalid());
        let alpha = match parts.get(3) {
            Some(part) => part.parse::<f32>().map_err(|_| invalid())?,
            None => 1.0,
        };
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid());
        }
        Ok(Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
    }
}

impl Serialize for RgbaColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RgbaColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected #rrggbb")]
    InvalidHex(String),

    #[error("invalid color '{0}': expected rgba(r, g, b, a)")]
    InvalidRgba(String),
}
