// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot geometry: equal-height vertical slots, one per letter.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{LETTER_COUNT, Letter};

/// Glyph size as a fraction of the slot pitch.
pub const TEXT_TO_SLOT_RATIO: f64 = 0.8;

/// Default ratio between the maximum and minimum text size.
pub const MAX_TEXT_SIZE_RATIO: f64 = 1.75;

/// Maps a rail height onto [`LETTER_COUNT`] uniform slots.
///
/// All queries are total: coordinates outside `0..height` (and non-finite
/// ones) clamp to the nearest slot instead of failing, so a drag that strays
/// past the rail keeps selecting the end letters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    height: f64,
}

impl SlotGeometry {
    /// Creates the slot model for a rail of the given height.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            // Negative and NaN heights behave like an unlaid-out rail.
            height: if height > 0.0 { height } else { 0.0 },
        }
    }

    /// Total height covered by the slots.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns `true` until the rail has been given a non-zero height.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height <= 0.0
    }

    /// Height of a single slot.
    #[must_use]
    pub fn slot_extent(&self) -> f64 {
        self.height / LETTER_COUNT as f64
    }

    /// Hit-tests a vertical coordinate relative to the top of the rail.
    ///
    /// Monotonic in `y`: for `y1 < y2`, `index_at(y1) <= index_at(y2)`.
    #[must_use]
    pub fn index_at(&self, y: f64) -> Letter {
        let extent = self.slot_extent();
        if extent <= 0.0 {
            return Letter::HASH;
        }
        let ratio = (y / extent).floor();
        let index = if ratio.is_nan() || ratio < 1.0 {
            0
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Float-to-int casts saturate; the result is clamped right after"
            )]
            let i = ratio as usize;
            i.min(LETTER_COUNT - 1)
        };
        Letter::from_index(index).unwrap_or(Letter::Z)
    }

    /// Top edge of a letter's slot.
    #[must_use]
    pub fn offset_of(&self, letter: Letter) -> f64 {
        letter.index() as f64 * self.slot_extent()
    }

    /// Vertical midpoint of a letter's slot.
    #[must_use]
    pub fn center_of(&self, letter: Letter) -> f64 {
        self.slot_extent() * (letter.index() as f64 + 0.5)
    }
}

/// Bounds for the adaptive glyph size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSizeRange {
    min: f64,
    max: f64,
}

impl TextSizeRange {
    /// A range whose maximum is [`MAX_TEXT_SIZE_RATIO`] times `min`.
    #[must_use]
    pub fn new(min: f64) -> Self {
        Self::with_max(min, min * MAX_TEXT_SIZE_RATIO)
    }

    /// A range with an explicit maximum.
    ///
    /// A maximum below `min` collapses the range to `min`.
    #[must_use]
    pub fn with_max(min: f64, max: f64) -> Self {
        let min = if min > 0.0 { min } else { 0.0 };
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Smallest glyph size.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest glyph size; also the size used to measure the rail width.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Glyph size for a slot pitch: `clamp(slot_extent * 0.8, min, max)`.
    #[must_use]
    pub fn resolve(&self, slot_extent: f64) -> f64 {
        (slot_extent * TEXT_TO_SLOT_RATIO).max(self.min).min(self.max)
    }
}

impl Default for TextSizeRange {
    fn default() -> Self {
        Self::new(32.0)
    }
}
