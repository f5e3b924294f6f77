// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time options for [`AlphabetRail`](crate::AlphabetRail).

use kurbo::Insets;

use crate::{Rgba8, TextSizeRange};

/// Options recognized by the rail.
///
/// With the `serde` feature this can be loaded from a host configuration file;
/// colors are written as `#RRGGBB` / `#RRGGBBAA` strings and missing fields
/// take their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RailConfig {
    /// Base glyph color.
    pub text_color: Rgba8,
    /// Color of the selected glyph and of the halo behind it.
    pub highlight_color: Rgba8,
    /// Lower bound for the adaptive glyph size.
    pub min_text_size: f64,
    /// Upper bound for the adaptive glyph size; `1.75 × min_text_size` when unset.
    pub max_text_size: Option<f64>,
    /// Only the horizontal insets are used; they widen the measured rail.
    #[cfg_attr(feature = "serde", serde(with = "insets_serde"))]
    pub padding: Insets,
    /// Fade a halo out of the last deselected letter.
    pub animate_release: bool,
    /// Keep the first non-zero height reported by layout for the rail's lifetime.
    pub lock_height_after_first_measure: bool,
}

impl RailConfig {
    /// The glyph size bounds implied by this configuration.
    #[must_use]
    pub fn text_size_range(&self) -> TextSizeRange {
        match self.max_text_size {
            Some(max) => TextSizeRange::with_max(self.min_text_size, max),
            None => TextSizeRange::new(self.min_text_size),
        }
    }
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            text_color: Rgba8::WHITE,
            highlight_color: Rgba8::CYAN,
            min_text_size: 32.0,
            max_text_size: None,
            padding: Insets::ZERO,
            animate_release: true,
            lock_height_after_first_measure: true,
        }
    }
}

#[cfg(feature = "serde")]
mod insets_serde {
    use kurbo::Insets;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize, Default)]
    #[serde(default)]
    struct Padding {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    }

    pub(super) fn serialize<S: Serializer>(insets: &Insets, serializer: S) -> Result<S::Ok, S::Error> {
        Padding {
            left: insets.x0,
            top: insets.y0,
            right: insets.x1,
            bottom: insets.y1,
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Insets, D::Error> {
        let p = Padding::deserialize(deserializer)?;
        Ok(Insets::new(p.left, p.top, p.right, p.bottom))
    }
}
