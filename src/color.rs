//! Color types and color-name parsing.
//!
//! Series colors are given as text the way matplotlib accepts them: CSS-style
//! names, single-letter shorthands (`"r"`, `"k"`), cycle references (`"C0"`),
//! Tableau names (`"tab:blue"`) and hex strings.

use crate::error::{Error, Result};
use plotters::style::RGBAColor;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// Convert to the drawing backend's color type.
    #[must_use]
    pub fn to_plotters(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, f64::from(self.a) / 255.0)
    }

    /// Parse a matplotlib-style color string.
    ///
    /// `"C0"`..`"C9"` index the default cycle ([`Palette::tab10`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything unrecognised.
    ///
    /// # Example
    ///
    /// ```
    /// use gridplot::color::Rgba;
    ///
    /// assert_eq!(Rgba::parse("k").unwrap(), Rgba::BLACK);
    /// assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::RED);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(text.to_string()));
        }

        if let Some(idx) = lower.strip_prefix('c').and_then(|d| d.parse::<usize>().ok()) {
            return Ok(Palette::tab10().get(idx));
        }

        if let Some(name) = lower.strip_prefix("tab:") {
            let idx = TAB10_NAMES
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| Error::InvalidColor(text.to_string()))?;
            return Ok(Palette::tab10().get(idx));
        }

        named(&lower).ok_or_else(|| Error::InvalidColor(text.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..=i)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        // matplotlib single-letter shorthands
        "b" => Rgba::BLUE,
        "g" => Rgba::rgb(0, 128, 0),
        "r" => Rgba::RED,
        "c" => Rgba::rgb(0, 191, 191),
        "m" => Rgba::rgb(191, 0, 191),
        "y" => Rgba::rgb(191, 191, 0),
        "k" => Rgba::BLACK,
        "w" => Rgba::WHITE,
        // CSS names
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::RED,
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::BLUE,
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Rgba::rgb(211, 211, 211),
        "darkgray" | "darkgrey" => Rgba::rgb(169, 169, 169),
        "silver" => Rgba::rgb(192, 192, 192),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "brown" => Rgba::rgb(165, 42, 42),
        "pink" => Rgba::rgb(255, 192, 203),
        "cyan" => Rgba::rgb(0, 255, 255),
        "magenta" => Rgba::rgb(255, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "olive" => Rgba::rgb(128, 128, 0),
        "navy" => Rgba::rgb(0, 0, 128),
        "teal" => Rgba::rgb(0, 128, 128),
        "maroon" => Rgba::rgb(128, 0, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "gold" => Rgba::rgb(255, 215, 0),
        "darkblue" => Rgba::rgb(0, 0, 139),
        "darkgreen" => Rgba::rgb(0, 100, 0),
        "darkred" => Rgba::rgb(139, 0, 0),
        "darkorange" => Rgba::rgb(255, 140, 0),
        "lightblue" => Rgba::rgb(173, 216, 230),
        "lightgreen" => Rgba::rgb(144, 238, 144),
        "skyblue" => Rgba::rgb(135, 206, 235),
        "steelblue" => Rgba::rgb(70, 130, 180),
        "crimson" => Rgba::rgb(220, 20, 60),
        "indigo" => Rgba::rgb(75, 0, 130),
        "violet" => Rgba::rgb(238, 130, 238),
        "turquoise" => Rgba::rgb(64, 224, 208),
        "coral" => Rgba::rgb(255, 127, 80),
        "salmon" => Rgba::rgb(250, 128, 114),
        "none" | "transparent" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(c)
}

const TAB10_NAMES: [&str; 10] =
    ["blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan"];

/// An ordered color cycle for series without an explicit color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Create a palette from explicit colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidColor("palette requires at least one color".to_string()));
        }
        Ok(Self { colors })
    }

    /// matplotlib's default property cycle.
    #[must_use]
    pub fn tab10() -> Self {
        Self {
            colors: vec![
                Rgba::rgb(0x1f, 0x77, 0xb4),
                Rgba::rgb(0xff, 0x7f, 0x0e),
                Rgba::rgb(0x2c, 0xa0, 0x2c),
                Rgba::rgb(0xd6, 0x27, 0x28),
                Rgba::rgb(0x94, 0x67, 0xbd),
                Rgba::rgb(0x8c, 0x56, 0x4b),
                Rgba::rgb(0xe3, 0x77, 0xc2),
                Rgba::rgb(0x7f, 0x7f, 0x7f),
                Rgba::rgb(0xbc, 0xbd, 0x22),
                Rgba::rgb(0x17, 0xbe, 0xcf),
            ],
        }
    }

    /// seaborn's "deep" palette.
    #[must_use]
    pub fn deep() -> Self {
        Self {
            colors: vec![
                Rgba::rgb(0x4c, 0x72, 0xb0),
                Rgba::rgb(0xdd, 0x84, 0x52),
                Rgba::rgb(0x55, 0xa8, 0x68),
                Rgba::rgb(0xc4, 0x4e, 0x52),
                Rgba::rgb(0x81, 0x72, 0xb3),
                Rgba::rgb(0x93, 0x78, 0x60),
                Rgba::rgb(0xda, 0x8b, 0xc3),
                Rgba::rgb(0x8c, 0x8c, 0x8c),
                Rgba::rgb(0xcc, 0xb9, 0x74),
                Rgba::rgb(0x64, 0xb5, 0xcd),
            ],
        }
    }

    /// Color at position `idx`, wrapping around.
    #[must_use]
    pub fn get(&self, idx: usize) -> Rgba {
        self.colors[idx % self.colors.len()]
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::tab10()
    }
}
