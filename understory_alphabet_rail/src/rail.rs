// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rail control: owns all per-instance state and applies reducer effects.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Insets, Size};

use crate::render::{DrawList, Palette, RenderSnapshot, render};
use crate::{
    Effects, Letter, LetterAvailability, LetterSet, PointerEvent, RailConfig, ReleaseAnimator,
    Rgba8, SelectionState, SizeConstraint, SizingPolicy, SlotGeometry, TextMeasure, TextSizeRange,
    TickOutcome,
};

type LetterListener = Box<dyn FnMut(Letter)>;

/// A fast-scroll letter index strip.
///
/// The host feeds it layout passes, bounds, pointer events and frame ticks,
/// and polls [`AlphabetRail::take_redraw_request`] /
/// [`AlphabetRail::take_layout_request`] to learn when to repaint or
/// re-measure. Its only output is the selection callback.
///
/// All state is owned by the instance; nothing survives re-creation.
pub struct AlphabetRail {
    palette: Palette,
    text_sizes: TextSizeRange,
    padding: Insets,
    animate_release: bool,
    sizing: SizingPolicy,
    bounds: Size,
    availability: LetterAvailability,
    selection: SelectionState,
    animator: ReleaseAnimator,
    listener: Option<LetterListener>,
    redraw_requested: bool,
    layout_requested: bool,
}

impl fmt::Debug for AlphabetRail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphabetRail")
            .field("palette", &self.palette)
            .field("text_sizes", &self.text_sizes)
            .field("padding", &self.padding)
            .field("animate_release", &self.animate_release)
            .field("sizing", &self.sizing)
            .field("bounds", &self.bounds)
            .field("availability", &self.availability)
            .field("selection", &self.selection)
            .field("animator", &self.animator)
            .field("has_listener", &self.listener.is_some())
            .field("redraw_requested", &self.redraw_requested)
            .field("layout_requested", &self.layout_requested)
            .finish()
    }
}

impl Default for AlphabetRail {
    fn default() -> Self {
        Self::new(RailConfig::default())
    }
}

impl AlphabetRail {
    /// Creates an unlaid-out rail.
    #[must_use]
    pub fn new(config: RailConfig) -> Self {
        Self {
            palette: Palette {
                text: config.text_color,
                highlight: config.highlight_color,
            },
            text_sizes: config.text_size_range(),
            padding: config.padding,
            animate_release: config.animate_release,
            sizing: SizingPolicy::new(config.lock_height_after_first_measure),
            bounds: Size::ZERO,
            availability: LetterAvailability::default(),
            selection: SelectionState::default(),
            animator: ReleaseAnimator::new(),
            listener: None,
            redraw_requested: false,
            layout_requested: false,
        }
    }

    /// Replaces the set of letters that have matches. Symbols are uppercase-normalized.
    pub fn set_available_letters<I, S>(&mut self, letters: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_available(LetterSet::from_symbols(letters));
    }

    /// Replaces the availability set with an already-built [`LetterSet`].
    ///
    /// A redraw is requested only if the set actually changed.
    pub fn set_available(&mut self, letters: LetterSet) {
        self.redraw_requested |= self.availability.set_available(letters);
    }

    /// Returns `true` if `letter` currently has matches.
    #[must_use]
    pub fn is_available(&self, letter: Letter) -> bool {
        self.availability.is_available(letter)
    }

    /// Installs the selection callback, replacing any previous one.
    pub fn set_on_letter_selected(&mut self, listener: impl FnMut(Letter) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Sets the base glyph color.
    pub fn set_text_color(&mut self, color: Rgba8) {
        self.palette.text = color;
        self.redraw_requested = true;
    }

    /// Sets the highlight glyph and halo color.
    pub fn set_highlight_color(&mut self, color: Rgba8) {
        self.palette.highlight = color;
        self.redraw_requested = true;
    }

    /// Sets the minimum text size; the maximum becomes `1.75 ×` that.
    ///
    /// The natural width changes, so this requests a new layout pass.
    pub fn set_text_size(&mut self, min: f64) {
        self.text_sizes = TextSizeRange::new(min);
        self.layout_requested = true;
        self.redraw_requested = true;
    }

    /// Overrides the maximum text size, keeping the current minimum.
    pub fn set_max_text_size(&mut self, max: f64) {
        self.text_sizes = TextSizeRange::with_max(self.text_sizes.min(), max);
        self.layout_requested = true;
        self.redraw_requested = true;
    }

    /// Answers a layout negotiation pass.
    pub fn measure(
        &mut self,
        width: SizeConstraint,
        height: SizeConstraint,
        measure: &impl TextMeasure,
    ) -> Size {
        self.sizing
            .measure(width, height, &self.text_sizes, self.padding, measure)
    }

    /// Records the size the host finally assigned.
    pub fn set_bounds(&mut self, bounds: Size) {
        let sanitize = |v: f64| if v > 0.0 { v } else { 0.0 };
        let bounds = Size::new(sanitize(bounds.width), sanitize(bounds.height));
        if bounds != self.bounds {
            self.bounds = bounds;
            self.redraw_requested = true;
        }
    }

    /// The laid-out size.
    #[must_use]
    pub const fn bounds(&self) -> Size {
        self.bounds
    }

    /// Slot model for the current bounds.
    #[must_use]
    pub fn geometry(&self) -> SlotGeometry {
        SlotGeometry::new(self.bounds.height)
    }

    /// Glyph size for the current bounds.
    #[must_use]
    pub fn text_size(&self) -> f64 {
        self.text_sizes.resolve(self.geometry().slot_extent())
    }

    /// Current and fading letters.
    #[must_use]
    pub const fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Feeds a pointer event at time `now` (milliseconds).
    ///
    /// Returns `true` if the rail consumed the event. A detached or unlaid-out
    /// rail consumes nothing.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: u64) -> bool {
        if self.animator.is_disposed() {
            return false;
        }
        let geometry = self.geometry();
        if geometry.is_empty() {
            return false;
        }
        let (selection, effects) = self.selection.reduce(event, &geometry, &self.availability);
        self.selection = selection;
        self.apply(effects, now);
        true
    }

    fn apply(&mut self, effects: Effects, now: u64) {
        if let Some(released) = effects.release {
            let text_size = self.text_size();
            if !(self.animate_release && self.animator.start(released, text_size, now)) {
                // Without a run there is nothing to fade; drop the halo at once.
                self.animator.cancel();
                self.selection.clear_previous();
            }
        }
        if let Some(letter) = effects.selected
            && let Some(listener) = self.listener.as_mut()
        {
            listener(letter);
        }
        self.redraw_requested |= effects.redraw;
    }

    /// Advances the release halo. Call once per frame while [`AlphabetRail::is_animating`].
    pub fn tick(&mut self, now: u64) {
        match self.animator.tick(now) {
            TickOutcome::Idle => {}
            TickOutcome::Running(_) => self.redraw_requested = true,
            TickOutcome::Finished(_) => {
                self.selection.clear_previous();
                self.redraw_requested = true;
            }
        }
    }

    /// Returns `true` while a release halo is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Removes the rail from its surface.
    ///
    /// Cancels any running halo and ignores all later events and ticks.
    pub fn detach(&mut self) {
        if let Some(letter) = self.animator.dispose() {
            log::debug!("rail detached with release halo for {letter} in flight");
        } else {
            log::debug!("rail detached");
        }
        self.selection.clear_previous();
        self.redraw_requested = false;
    }

    /// Returns `true` once [`AlphabetRail::detach`] has been called.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.animator.is_disposed()
    }

    /// Consumes a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    /// Consumes a pending layout request.
    pub fn take_layout_request(&mut self) -> bool {
        core::mem::take(&mut self.layout_requested)
    }

    /// The inputs of the next frame.
    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            bounds: self.bounds,
            text_size: self.text_size(),
            palette: self.palette,
            availability: &self.availability,
            selection: self.selection,
            release: self.animator.sample(),
        }
    }

    /// Builds the draw list for the current state. Empty once detached.
    #[must_use]
    pub fn render(&self) -> DrawList {
        if self.is_detached() {
            return DrawList::new();
        }
        render(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::render::DrawOp;
    use crate::{HALO_ALPHA, MonospaceMeasure, RELEASE_DURATION_MS};

    /// A 540px rail (20px slots) that records every callback.
    fn laid_out(config: RailConfig) -> (AlphabetRail, Rc<RefCell<Vec<Letter>>>) {
        let mut rail = AlphabetRail::new(config);
        let size = rail.measure(
            SizeConstraint::Unconstrained(0.0),
            SizeConstraint::Exact(540.0),
            &MonospaceMeasure::default(),
        );
        rail.set_bounds(size);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        rail.set_on_letter_selected(move |letter| sink.borrow_mut().push(letter));
        rail.set_available_letters(["A", "M", "Z"]);
        rail.take_redraw_request();
        (rail, seen)
    }

    fn y_of(letter: Letter) -> f64 {
        letter.index() as f64 * 20.0 + 10.0
    }

    fn halo_count(rail: &AlphabetRail) -> usize {
        rail.render()
            .iter()
            .filter(|op| matches!(op, DrawOp::Halo { .. }))
            .count()
    }

    #[test]
    fn drag_scenario_notifies_once_per_entry() {
        let (mut rail, seen) = laid_out(RailConfig::default());

        assert!(rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::B) }, 0));
        assert_eq!(rail.selection().current, Some(Letter::B));
        assert!(seen.borrow().is_empty());
        assert!(rail.take_redraw_request());

        rail.handle_pointer(PointerEvent::Move { y: y_of(Letter::M) }, 16);
        assert_eq!(*seen.borrow(), [Letter::M]);
        assert!(rail.take_redraw_request());

        for (i, dy) in [-4.0, 3.0, 9.0, -9.0].into_iter().enumerate() {
            rail.handle_pointer(PointerEvent::Move { y: y_of(Letter::M) + dy }, 32 + i as u64);
        }
        assert_eq!(*seen.borrow(), [Letter::M]);
        assert!(!rail.take_redraw_request());

        rail.handle_pointer(PointerEvent::Up, 100);
        assert_eq!(*seen.borrow(), [Letter::M]);
        assert_eq!(rail.selection().current, None);
        assert_eq!(rail.selection().previous, Some(Letter::M));
        assert!(rail.is_animating());
        assert_eq!(rail.animator.run().map(|run| run.target), Some(Letter::M));
    }

    #[test]
    fn release_halo_fades_then_clears_previous() {
        let (mut rail, _) = laid_out(RailConfig::default());
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::A) }, 0);
        rail.handle_pointer(PointerEvent::Up, 1_000);
        assert_eq!(halo_count(&rail), 1);

        rail.tick(1_000 + RELEASE_DURATION_MS / 2);
        assert!(rail.take_redraw_request());
        let mid = rail.animator.sample().unwrap();
        assert!(mid.alpha < HALO_ALPHA && mid.alpha > 0);

        rail.tick(1_000 + RELEASE_DURATION_MS);
        assert!(!rail.is_animating());
        assert_eq!(rail.selection().previous, None);
        assert_eq!(halo_count(&rail), 0);
    }

    #[test]
    fn moving_on_replaces_the_fading_halo() {
        let (mut rail, _) = laid_out(RailConfig::default());
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::A) }, 0);
        rail.handle_pointer(PointerEvent::Move { y: y_of(Letter::B) }, 10);
        rail.handle_pointer(PointerEvent::Move { y: y_of(Letter::HASH) }, 20);
        assert_eq!(rail.selection().previous, Some(Letter::B));
        assert_eq!(rail.animator.run().map(|run| run.target), Some(Letter::B));
        // Current disc plus one release disc, never two release discs.
        assert_eq!(halo_count(&rail), 2);
    }

    #[test]
    fn static_release_drops_halo_immediately() {
        let (mut rail, _) = laid_out(RailConfig {
            animate_release: false,
            ..RailConfig::default()
        });
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::Z) }, 0);
        rail.handle_pointer(PointerEvent::Up, 10);
        assert!(!rail.is_animating());
        assert_eq!(rail.selection(), SelectionState::default());
        assert_eq!(halo_count(&rail), 0);
    }

    #[test]
    fn release_radius_follows_text_size_at_release() {
        let (mut rail, _) = laid_out(RailConfig {
            min_text_size: 10.0,
            ..RailConfig::default()
        });
        // 20px slots → 16px glyphs, inside 10..17.5.
        assert!((rail.text_size() - 16.0).abs() < 1e-9);
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::A) }, 0);
        rail.handle_pointer(PointerEvent::Up, 0);
        let run = *rail.animator.run().unwrap();
        assert!((run.from_radius - 11.2).abs() < 1e-9);
        assert!((run.to_radius - 19.2).abs() < 1e-9);
    }

    #[test]
    fn detach_cancels_and_ignores_later_input() {
        let (mut rail, seen) = laid_out(RailConfig::default());
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::A) }, 0);
        rail.handle_pointer(PointerEvent::Up, 5);
        assert!(rail.is_animating());

        rail.detach();
        assert!(rail.is_detached());
        assert!(!rail.is_animating());
        assert_eq!(rail.selection().previous, None);

        rail.tick(50);
        assert!(!rail.take_redraw_request());
        assert!(!rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::M) }, 60));
        assert_eq!(*seen.borrow(), [Letter::A]);
        assert!(rail.render().is_empty());
    }

    #[test]
    fn detach_while_idle_is_harmless() {
        let mut rail = AlphabetRail::default();
        rail.detach();
        rail.tick(0);
        assert!(rail.is_detached());
    }

    #[test]
    fn unlaid_out_rail_ignores_pointer() {
        let mut rail = AlphabetRail::default();
        assert!(!rail.handle_pointer(PointerEvent::Down { y: 10.0 }, 0));
        assert_eq!(rail.selection(), SelectionState::default());
        assert!(rail.render().is_empty());
    }

    #[test]
    fn height_lock_survives_later_passes() {
        let mut rail = AlphabetRail::default();
        let measure = MonospaceMeasure::default();
        let first = rail.measure(
            SizeConstraint::Unconstrained(0.0),
            SizeConstraint::AtMost(540.0),
            &measure,
        );
        let second = rail.measure(
            SizeConstraint::Unconstrained(0.0),
            SizeConstraint::AtMost(700.0),
            &measure,
        );
        assert_eq!(first.height, 540.0);
        assert_eq!(second.height, 540.0);
        assert_eq!(first.width, second.width);
    }

    #[test]
    fn text_size_setter_requests_layout() {
        let mut rail = AlphabetRail::default();
        let measure = MonospaceMeasure::default();
        let before = rail
            .measure(SizeConstraint::Unconstrained(0.0), SizeConstraint::Exact(540.0), &measure)
            .width;
        rail.set_text_size(16.0);
        assert!(rail.take_layout_request());
        assert!(rail.take_redraw_request());
        assert!(!rail.take_layout_request());
        let after = rail
            .measure(SizeConstraint::Unconstrained(0.0), SizeConstraint::Exact(900.0), &measure)
            .width;
        assert!(after < before);
    }

    #[test]
    fn unchanged_availability_does_not_request_redraw() {
        let (mut rail, _) = laid_out(RailConfig::default());
        rail.set_available_letters(["a", "m", "z"]);
        assert!(!rail.take_redraw_request());
        rail.set_available_letters(["A", "M"]);
        assert!(rail.take_redraw_request());
        assert!(!rail.is_available(Letter::Z));
    }

    #[test]
    fn color_setters_flow_into_render() {
        let (mut rail, _) = laid_out(RailConfig::default());
        let red = Rgba8::rgb(255, 0, 0);
        rail.set_highlight_color(red);
        rail.set_text_color(Rgba8::rgb(0, 0, 0));
        assert!(rail.take_redraw_request());
        rail.handle_pointer(PointerEvent::Down { y: y_of(Letter::M) }, 0);
        let ops = rail.render();
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Glyph { letter, color, .. } if *letter == Letter::M && *color == red
        )));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::Glyph { letter, color, .. }
                if *letter == Letter::B && *color == Rgba8::rgb(0, 0, 0).with_alpha(80)
        )));
    }
}
