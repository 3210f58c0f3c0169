//! RGB colors and foreground contrast.
//!
//! A cell's foreground is derived from its own background: light backgrounds
//! (luminance above [`LIGHT_THRESHOLD`]) get a darkened copy, dark ones a
//! lightened copy, so the glyph stays in the same hue but remains readable.
//!
//! Darkening scales each channel by the factor. Lightening moves each channel
//! towards 255 by `factor - 1` of the remaining distance, so that pure black
//! still gets a visible foreground.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Background luminance above which the foreground is darkened
pub const LIGHT_THRESHOLD: f64 = 128.0;

pub const DEFAULT_DARKEN_FACTOR: f64 = 0.7;
pub const DEFAULT_LIGHTEN_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color '{0}'")]
pub struct ParseColorError(pub String);

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ParseColorError(hex.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance over 0-255 channels
    pub fn luminance(self) -> f64 {
        0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b)
    }

    /// Scale every channel by `factor`, truncating and clamping to 0-255
    pub fn adjust_brightness(self, factor: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * factor).clamp(0.0, 255.0) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Move every channel towards 255 by `factor - 1` of its headroom
    pub fn lighten(self, factor: f64) -> Self {
        let amount = (factor - 1.0).clamp(0.0, 1.0);
        let lift = |c: u8| {
            let c = f64::from(c);
            (c + (255.0 - c) * amount).clamp(0.0, 255.0) as u8
        };
        Rgb::new(lift(self.r), lift(self.g), lift(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

/// Foreground color for text drawn on `background`
pub fn contrasting_text_color(background: Rgb, darken_factor: f64, lighten_factor: f64) -> Rgb {
    if background.luminance() > LIGHT_THRESHOLD {
        background.adjust_brightness(darken_factor)
    } else {
        background.lighten(lighten_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_contrast(background: Rgb) -> Rgb {
        contrasting_text_color(background, DEFAULT_DARKEN_FACTOR, DEFAULT_LIGHTEN_FACTOR)
    }

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("0A0b0C").unwrap(), Rgb::new(10, 11, 12));
        assert_eq!("#000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#ffffff00").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        assert!(Rgb::from_hex("+f+f+f").is_err());
        assert!(Rgb::from_hex("#-1-1-1").is_err());
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(Rgb::new(171, 205, 239).to_hex(), "#abcdef");
    }

    #[test]
    fn luminance_weights() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 255.0).abs() < 1e-9);
        assert!(Rgb::new(0, 255, 0).luminance() > Rgb::new(255, 0, 0).luminance());
    }

    #[test]
    fn brightness_clamps() {
        assert_eq!(Rgb::new(200, 100, 0).adjust_brightness(1.5), Rgb::new(255, 150, 0));
        assert_eq!(Rgb::new(10, 20, 30).adjust_brightness(-1.0), Rgb::BLACK);
        assert_eq!(Rgb::new(10, 15, 99).adjust_brightness(0.5), Rgb::new(5, 7, 49));
    }

    #[test]
    fn white_background_gets_darker_text() {
        let fg = default_contrast(Rgb::WHITE);
        assert!(fg.luminance() < Rgb::WHITE.luminance());
        assert_eq!(fg, Rgb::new(178, 178, 178));
    }

    #[test]
    fn dark_background_gets_lighter_text() {
        let background = Rgb::new(40, 40, 40);
        let fg = default_contrast(background);
        assert!(fg.luminance() > background.luminance());
        assert_eq!(fg, Rgb::new(104, 104, 104));
    }

    #[test]
    fn black_background_gets_lighter_text() {
        let fg = default_contrast(Rgb::BLACK);
        assert!(fg.luminance() > Rgb::BLACK.luminance());
        assert_eq!(fg, Rgb::new(76, 76, 76));
    }

    #[test]
    fn lighten_keeps_white_and_ignores_shrinking_factors() {
        assert_eq!(Rgb::WHITE.lighten(1.3), Rgb::WHITE);
        assert_eq!(Rgb::new(10, 20, 30).lighten(0.5), Rgb::new(10, 20, 30));
    }
}
