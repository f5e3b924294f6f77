// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw list generation.
//!
//! Rendering is a pure read of a [`RenderSnapshot`]. Each slot's look is
//! decided by [`style_for`] into an immutable [`SlotStyle`]; [`render`] then
//! places the styles into [`DrawOp`]s. Nothing is mutated between slots, so
//! slots could be styled in any order.

use kurbo::{Circle, Point, Size};
use smallvec::SmallVec;

use crate::{
    HALO_ALPHA, HALO_START_RADIUS_RATIO, HaloSample, LETTER_COUNT, Letter, LetterAvailability,
    Rgba8, SelectionState, SlotGeometry,
};

/// Alpha applied to glyphs of letters without matches.
pub const DISABLED_ALPHA: u8 = 80;

/// Enough inline capacity for every glyph plus the selection and release halos.
pub type DrawList = SmallVec<[DrawOp; LETTER_COUNT + 2]>;

/// Base and highlight colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Glyph color for available letters.
    pub text: Rgba8,
    /// Selected glyph and halo color.
    pub highlight: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Rgba8::WHITE,
            highlight: Rgba8::CYAN,
        }
    }
}

/// Everything a frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
    /// Laid-out size of the rail.
    pub bounds: Size,
    /// Resolved glyph size.
    pub text_size: f64,
    /// Colors.
    pub palette: Palette,
    /// Which letters have matches.
    pub availability: &'a LetterAvailability,
    /// Current and fading letters.
    pub selection: SelectionState,
    /// Release halo, present only while a run is active.
    pub release: Option<HaloSample>,
}

/// A disc drawn behind a glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HaloStyle {
    /// Disc radius.
    pub radius: f64,
    /// Fill color, alpha included.
    pub color: Rgba8,
}

/// The resolved look of one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotStyle {
    /// Halo behind the glyph, if any.
    pub halo: Option<HaloStyle>,
    /// Glyph color.
    pub glyph: Rgba8,
}

/// One drawing command, in slot coordinates with the origin at the rail's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    /// A filled disc.
    Halo {
        /// Disc geometry.
        circle: Circle,
        /// Fill color.
        color: Rgba8,
    },
    /// A glyph, horizontally centered on `origin.x` with its baseline at `origin.y`.
    Glyph {
        /// Which symbol to draw.
        letter: Letter,
        /// Center-aligned baseline anchor.
        origin: Point,
        /// Text size.
        size: f64,
        /// Fill color.
        color: Rgba8,
    },
}

/// Decides how `letter` is drawn in this frame.
#[must_use]
pub fn style_for(letter: Letter, snapshot: &RenderSnapshot<'_>) -> SlotStyle {
    let palette = snapshot.palette;
    if snapshot.selection.current == Some(letter) {
        return SlotStyle {
            halo: Some(HaloStyle {
                radius: HALO_START_RADIUS_RATIO * snapshot.text_size,
                color: palette.highlight.with_alpha(HALO_ALPHA),
            }),
            glyph: palette.highlight,
        };
    }

    let halo = snapshot
        .release
        .filter(|sample| sample.target == letter && snapshot.selection.previous == Some(letter))
        .map(|sample| HaloStyle {
            radius: sample.radius,
            color: palette.highlight.with_alpha(sample.alpha),
        });
    let glyph = if snapshot.availability.is_available(letter) {
        palette.text
    } else {
        palette.text.with_alpha(DISABLED_ALPHA)
    };
    SlotStyle { halo, glyph }
}

/// Builds the draw list for a frame.
///
/// Returns an empty list until the rail has a non-zero size.
#[must_use]
pub fn render(snapshot: &RenderSnapshot<'_>) -> DrawList {
    let mut ops = DrawList::new();
    let Size { width, height } = snapshot.bounds;
    if width <= 0.0 || height <= 0.0 {
        return ops;
    }

    let geometry = SlotGeometry::new(height);
    let center_x = width / 2.0;
    for letter in Letter::all() {
        let style = style_for(letter, snapshot);
        let center_y = geometry.center_of(letter);
        if let Some(halo) = style.halo {
            ops.push(DrawOp::Halo {
                circle: Circle::new((center_x, center_y), halo.radius),
                color: halo.color,
            });
        }
        ops.push(DrawOp::Glyph {
            letter,
            // Nudge the baseline down so the glyph sits visually centered in its slot.
            origin: Point::new(center_x, center_y + snapshot.text_size / 3.0),
            size: snapshot.text_size,
            color: style.glyph,
        });
    }
    ops
}
