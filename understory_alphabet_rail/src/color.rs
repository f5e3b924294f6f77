// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 8-bit RGBA colors for glyphs and halos.

use alloc::format;
use alloc::string::String;
use core::str::FromStr;

/// A straight (non-premultiplied) 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `255` is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color channels with the alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Error returned when a color string is not `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    /// Wrong number of hex digits.
    #[error("expected 6 or 8 hex digits, found {0}")]
    Length(usize),
    /// A non-hex character.
    #[error("invalid hex digit in color `{0}`")]
    Digit(String),
}

impl FromStr for Rgba8 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::Digit(s.into()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError::Digit(s.into()))
        };
        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            n => Err(ParseColorError::Length(n)),
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        if color.a == 255 {
            format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!("#00ffff".parse(), Ok(Rgba8::CYAN));
        assert_eq!("FFFFFF".parse(), Ok(Rgba8::WHITE));
        assert_eq!(
            "#11223344".parse(),
            Ok(Rgba8 {
                r: 0x11,
                g: 0x22,
                b: 0x33,
                a: 0x44
            })
        );
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!("#fff".parse::<Rgba8>(), Err(ParseColorError::Length(3)));
        assert!(matches!(
            "#gg0000".parse::<Rgba8>(),
            Err(ParseColorError::Digit(_))
        ));
        // Multi-byte input must not panic on slicing.
        assert!("#ééé".parse::<Rgba8>().is_err());
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let faded = Rgba8::CYAN.with_alpha(40);
        assert_eq!((faded.r, faded.g, faded.b, faded.a), (0, 255, 255, 40));
        assert_eq!(String::from(faded), "#00ffff28");
    }
}
