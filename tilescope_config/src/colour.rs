// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use core::fmt;
use core::str::FromStr;

/// An 8-bit RGBA colour, straight (not premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component; 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Creates an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a colour with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same colour with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses a theme colour of the form `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Result<Self, ParseColourError> {
        let err = || ParseColourError(s.to_owned());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

/// Error returned for a colour that is neither `(R, G, B[, A])` nor `#RRGGBB[AA]`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed colour `{0}`")]
pub struct ParseColourError(pub String);

impl FromStr for Rgba {
    type Err = ParseColourError;

    /// Parses a settings colour: a parenthesized tuple of three or four
    /// integers in `0..=255`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColourError(s.to_owned());
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;

        let mut parts = [255_u8; 4];
        let mut count = 0;
        for field in inner.split(',') {
            let field = field.trim();
            // A single trailing comma is allowed, as in `(1, 2, 3,)`.
            if field.is_empty() && count >= 3 {
                continue;
            }
            if count == 4 {
                return Err(err());
            }
            parts[count] = field.parse::<u8>().map_err(|_| err())?;
            count += 1;
        }
        if count < 3 {
            return Err(err());
        }
        Ok(Self::rgba(parts[0], parts[1], parts[2], parts[3]))
    }
}

impl fmt::Display for Rgba {
    /// Formats as a settings tuple; alpha is omitted when opaque.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}
