// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout negotiation: the rail's desired width and the height lock.

use kurbo::{Insets, Size};

use crate::{Letter, TextSizeRange};

/// Fixed visual margin added to the widest glyph.
pub const WIDTH_MARGIN: f64 = 16.0;

/// A host-imposed constraint on one axis.
///
/// Every variant carries the size the host proposes for that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeConstraint {
    /// The axis must be exactly this size.
    Exact(f64),
    /// The axis may be at most this size.
    AtMost(f64),
    /// No constraint; the payload is a hint and may be zero.
    Unconstrained(f64),
}

impl SizeConstraint {
    /// The size the host proposed.
    #[must_use]
    pub const fn proposed(self) -> f64 {
        match self {
            Self::Exact(v) | Self::AtMost(v) | Self::Unconstrained(v) => v,
        }
    }

    /// Resolves a desired size against this constraint.
    #[must_use]
    pub fn resolve(self, desired: f64) -> f64 {
        match self {
            Self::Exact(v) => v,
            Self::AtMost(cap) => desired.min(cap),
            Self::Unconstrained(_) => desired,
        }
    }
}

/// Text metrics supplied by the host's text stack.
pub trait TextMeasure {
    /// Horizontal advance of `symbol` rendered at `text_size`.
    fn advance(&self, symbol: &str, text_size: f64) -> f64;
}

impl<F: Fn(&str, f64) -> f64> TextMeasure for F {
    fn advance(&self, symbol: &str, text_size: f64) -> f64 {
        self(symbol, text_size)
    }
}

/// A [`TextMeasure`] for fixed-pitch fonts: every glyph is `advance_ratio × text_size` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance as a fraction of the text size.
    pub advance_ratio: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn advance(&self, _symbol: &str, text_size: f64) -> f64 {
        self.advance_ratio * text_size
    }
}

/// Computes the rail's reported size during layout negotiation.
///
/// Width depends only on static text metrics and is recomputed every pass.
/// Height is locked to the first non-zero proposal when `lock_height` is set,
/// so repeated layout passes cannot make the slot pitch (and glyph size) jitter.
/// The lock lives as long as this value; a new rail starts unlocked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizingPolicy {
    lock_height: bool,
    locked_height: Option<f64>,
}

impl SizingPolicy {
    /// Creates a policy, optionally locking height after the first measurement.
    #[must_use]
    pub const fn new(lock_height: bool) -> Self {
        Self {
            lock_height,
            locked_height: None,
        }
    }

    /// The locked height, once one has been observed.
    #[must_use]
    pub const fn locked_height(&self) -> Option<f64> {
        self.locked_height
    }

    /// Natural width: the widest symbol at the maximum text size plus padding and margin.
    pub fn natural_width(range: &TextSizeRange, padding: Insets, measure: &impl TextMeasure) -> f64 {
        let widest = Letter::all()
            .map(|letter| measure.advance(letter.symbol(), range.max()))
            .fold(0.0, f64::max);
        widest + padding.x0 + padding.x1 + WIDTH_MARGIN
    }

    /// Runs one layout pass and returns the size to report to the host.
    pub fn measure(
        &mut self,
        width: SizeConstraint,
        height: SizeConstraint,
        range: &TextSizeRange,
        padding: Insets,
        measure: &impl TextMeasure,
    ) -> Size {
        let width = width.resolve(Self::natural_width(range, padding, measure));

        let proposed = height.proposed();
        if self.lock_height && self.locked_height.is_none() && proposed > 0.0 {
            log::debug!("locking rail height at {proposed}");
            self.locked_height = Some(proposed);
        }
        let height = self.locked_height.unwrap_or(proposed);

        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure_pass(policy: &mut SizingPolicy, width: SizeConstraint, height: f64) -> Size {
        policy.measure(
            width,
            SizeConstraint::Exact(height),
            &TextSizeRange::new(32.0),
            Insets::ZERO,
            &MonospaceMeasure::default(),
        )
    }

    #[test]
    fn width_is_widest_glyph_plus_margin() {
        // "W" is widest in this fake proportional font.
        let measure = |symbol: &str, size: f64| if symbol == "W" { size } else { size / 2.0 };
        let padding = Insets::new(3.0, 0.0, 5.0, 0.0);
        let width = SizingPolicy::natural_width(&TextSizeRange::new(32.0), padding, &measure);
        assert_eq!(width, 56.0 + 3.0 + 5.0 + WIDTH_MARGIN);
    }

    #[test]
    fn width_respects_constraint_mode() {
        let mut policy = SizingPolicy::new(true);
        // Monospace 0.6 × 56 + 16 = 49.6.
        let natural = measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 500.0).width;
        assert!((natural - 49.6).abs() < 1e-9, "{natural}");
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Exact(80.0), 500.0).width, 80.0);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::AtMost(30.0), 500.0).width, 30.0);
        let capped = measure_pass(&mut policy, SizeConstraint::AtMost(300.0), 500.0).width;
        assert!((capped - natural).abs() < 1e-9, "{capped}");
    }

    #[test]
    fn height_locks_after_first_non_zero_pass() {
        let mut policy = SizingPolicy::new(true);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 0.0).height, 0.0);
        assert_eq!(policy.locked_height(), None);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 540.0).height, 540.0);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 610.0).height, 540.0);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 0.0).height, 540.0);
        assert_eq!(policy.locked_height(), Some(540.0));
    }

    #[test]
    fn unlocked_height_follows_proposals() {
        let mut policy = SizingPolicy::new(false);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 540.0).height, 540.0);
        assert_eq!(measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 610.0).height, 610.0);
        assert_eq!(policy.locked_height(), None);
    }

    #[test]
    fn recreated_policy_starts_unlocked() {
        let mut policy = SizingPolicy::new(true);
        measure_pass(&mut policy, SizeConstraint::Unconstrained(0.0), 540.0);
        let mut fresh = SizingPolicy::new(true);
        assert_eq!(measure_pass(&mut fresh, SizeConstraint::Unconstrained(0.0), 610.0).height, 610.0);
    }
}
