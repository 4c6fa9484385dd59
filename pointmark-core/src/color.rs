//! Marker colors and the default swatch palette

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An sRGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channels scaled to `0.0..=1.0` for shading
    pub fn to_linear_f32(self) -> [f32; 3] {
        [
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a `#rrggbb` hex string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidData(format!("Invalid color: {}", s)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| Error::InvalidData(format!("Invalid color: {}", s)))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }
}

/// Swatches handed out to feature points in creation order
pub const POINT_COLORS: [Color; 8] = [
    Color::rgb(0xff, 0x6b, 0x6b),
    Color::rgb(0x4e, 0xcd, 0xc4),
    Color::rgb(0x45, 0xb7, 0xd1),
    Color::rgb(0x96, 0xce, 0xb4),
    Color::rgb(0xff, 0xea, 0xa7),
    Color::rgb(0xdf, 0xe6, 0xe9),
    Color::rgb(0xfd, 0x79, 0xa8),
    Color::rgb(0xa2, 0x9b, 0xfe),
];

/// A fixed, non-empty list of swatches indexed modulo its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette. Fails when `colors` is empty.
    pub fn new(colors: Vec<Color>) -> crate::Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidData("Palette must contain at least one color".to_string()));
        }
        Ok(Self { colors })
    }

    /// Color for the point created when `index` points already exist
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: POINT_COLORS.to_vec(),
        }
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color: Color = "#4ecdc4".parse().unwrap();
        assert_eq!(color, Color::rgb(0x4e, 0xcd, 0xc4));
        assert_eq!(color.to_string(), "#4ecdc4");
    }

    #[test]
    fn test_color_rejects_malformed_hex() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_palette_wraps_around() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.color_for(0).to_string(), "#ff6b6b");
        assert_eq!(palette.color_for(7).to_string(), "#a29bfe");
        assert_eq!(palette.color_for(8), palette.color_for(0));
        assert_eq!(palette.color_for(10), palette.color_for(2));
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_err());
    }
}
