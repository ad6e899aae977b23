//! Marble colors: the selectable palette, hex parsing, and shade derivation.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error type for strict hex-color parsing.
#[derive(Debug, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0}")]
    Length(usize),
    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Predefined colors for marbles.
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const PINK: Color = Color::rgb(255, 192, 203);

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Returns the ordered palette of selectable marble colors with their
    /// display names. `SelectedColor` and `Marble::color_index` are indices
    /// into this list.
    pub fn palette() -> Vec<(Color, &'static str)> {
        vec![
            (Self::RED, "Red"),
            (Self::BLUE, "Blue"),
            (Self::GREEN, "Green"),
            (Self::YELLOW, "Yellow"),
            (Self::PURPLE, "Purple"),
            (Self::ORANGE, "Orange"),
            (Self::CYAN, "Cyan"),
            (Self::PINK, "Pink"),
        ]
    }

    /// Parses a 6-hex-digit color with optional leading `#`.
    pub fn try_from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorParseError::Length(digits.len()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::Digit(digits.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parses a hex color, degrading to opaque black on malformed input.
    /// A bad color value renders a black marble instead of halting the race.
    pub fn from_hex(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Returns this color brightened by `delta` per channel, clamped to 255.
    pub const fn lighten(self, delta: u8) -> Self {
        Self::new(
            self.r.saturating_add(delta),
            self.g.saturating_add(delta),
            self.b.saturating_add(delta),
            self.a,
        )
    }

    /// Returns this color darkened by `delta` per channel, clamped to 0.
    pub const fn darken(self, delta: u8) -> Self {
        Self::new(
            self.r.saturating_sub(delta),
            self.g.saturating_sub(delta),
            self.b.saturating_sub(delta),
            self.a,
        )
    }

    /// Formats as `#rrggbb` (alpha is not encoded).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns a translucent copy with the given alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}
