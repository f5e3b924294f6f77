// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven selection state machine.
//!
//! Pointer handling is a pure reducer, `(SelectionState, PointerEvent) ->
//! (SelectionState, Effects)`, so it can be driven and tested without a
//! drawing surface. The caller applies the [`Effects`]: starting the release
//! halo, notifying the host, and scheduling a redraw.
//!
//! ## Rules
//!
//! 1. **Down/Move** hit-test `y` into a slot. Staying in the current slot is a
//!    no-op (no callback, no redraw), so a held or slowly moving pointer does
//!    not repeat notifications.
//! 2. **Entering a new slot** releases the old one (if any), makes the new one
//!    current, and reports it to the host only if it is available.
//! 3. **Up/Cancel** release the current slot and return to idle. Releasing
//!    never notifies the host.
//! 4. Events on a rail with zero height are ignored.

use crate::{Letter, LetterAvailability, SlotGeometry};

/// Pointer input, with `y` relative to the top of the rail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down {
        /// Vertical position.
        y: f64,
    },
    /// Pointer dragged while pressed.
    Move {
        /// Vertical position.
        y: f64,
    },
    /// Pointer released.
    Up,
    /// Gesture taken away by the host.
    Cancel,
}

/// Current and most recently released letter.
///
/// `current` is set only while a pointer is down on the rail. `previous` is set
/// only while its release halo is running; the owner clears it through
/// [`SelectionState::clear_previous`] when the halo finishes or is cancelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Letter under the active pointer.
    pub current: Option<Letter>,
    /// Letter whose release halo is still fading.
    pub previous: Option<Letter>,
}

/// Side effects requested by one reducer step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Start a release halo for this letter, replacing any running one.
    pub release: Option<Letter>,
    /// Invoke the host's selection callback with this letter.
    pub selected: Option<Letter>,
    /// The rail needs repainting.
    pub redraw: bool,
}

impl Effects {
    /// No side effects.
    pub const NONE: Self = Self {
        release: None,
        selected: None,
        redraw: false,
    };
}

impl SelectionState {
    /// Returns `true` while a pointer is selecting a letter.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Drops the released letter once its halo is gone.
    pub fn clear_previous(&mut self) {
        self.previous = None;
    }

    /// Applies one pointer event.
    #[must_use]
    pub fn reduce(
        self,
        event: PointerEvent,
        geometry: &SlotGeometry,
        availability: &LetterAvailability,
    ) -> (Self, Effects) {
        if geometry.is_empty() {
            return (self, Effects::NONE);
        }
        match event {
            PointerEvent::Down { y } | PointerEvent::Move { y } => {
                let hit = geometry.index_at(y);
                if self.current == Some(hit) {
                    return (self, Effects::NONE);
                }
                let next = Self {
                    current: Some(hit),
                    previous: self.current.or(self.previous),
                };
                let effects = Effects {
                    release: self.current,
                    selected: availability.is_available(hit).then_some(hit),
                    redraw: true,
                };
                log::trace!("rail selection {:?} -> {hit}", self.current);
                (next, effects)
            }
            PointerEvent::Up | PointerEvent::Cancel => {
                let next = Self {
                    current: None,
                    previous: self.current.or(self.previous),
                };
                if let Some(released) = self.current {
                    log::trace!("rail released {released}");
                }
                let effects = Effects {
                    release: self.current,
                    selected: None,
                    redraw: true,
                };
                (next, effects)
            }
        }
    }
}
