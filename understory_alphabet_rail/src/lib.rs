// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Alphabet Rail: a headless fast-scroll letter index.
//!
//! The rail is a narrow vertical strip of 27 symbols (`#`, `A`–`Z`). Dragging
//! along it selects letters so the host can jump an adjacent list to entries
//! starting with that letter. This crate owns the interaction, not the list.
//!
//! The pieces, leaf first:
//!
//! - [`SlotGeometry`] and [`TextSizeRange`]: map a rail height onto 27 equal
//!   slots and an adaptive glyph size. Hit testing is total and monotonic.
//! - [`SizingPolicy`]: answers layout negotiation. Width comes from text
//!   metrics ([`TextMeasure`]); height can be locked after the first non-zero
//!   measurement so repeated layout passes do not make glyphs jitter.
//! - [`LetterAvailability`] / [`LetterSet`]: which letters currently have
//!   matches. Unavailable letters are dimmed and never reported.
//! - [`SelectionState::reduce`]: a pure reducer from [`PointerEvent`]s to a new
//!   state plus [`Effects`]. Staying inside a slot is debounced.
//! - [`ReleaseAnimator`]: one halo tween at a time for the most recently
//!   deselected letter, driven by host ticks.
//! - [`render`](render::render): a pure function from a
//!   [`RenderSnapshot`](render::RenderSnapshot) to a [`DrawList`](render::DrawList).
//! - [`AlphabetRail`]: the control that owns all of the above for one
//!   instance and invokes the host's selection callback.
//!
//! This crate deliberately does **not** shape text, scroll lists, or own a
//! drawing surface. Hosts supply text metrics, timestamps and pointer
//! coordinates, and replay the draw list with their renderer.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_alphabet_rail::{
//!     AlphabetRail, Letter, MonospaceMeasure, PointerEvent, RailConfig, SizeConstraint,
//! };
//!
//! let mut rail = AlphabetRail::new(RailConfig::default());
//! rail.set_available_letters(["a", "m", "z"]);
//!
//! let picked = Rc::new(RefCell::new(Vec::new()));
//! let sink = picked.clone();
//! rail.set_on_letter_selected(move |letter| sink.borrow_mut().push(letter));
//!
//! // Layout: 540px tall gives 20px slots.
//! let size = rail.measure(
//!     SizeConstraint::Unconstrained(0.0),
//!     SizeConstraint::Exact(540.0),
//!     &MonospaceMeasure::default(),
//! );
//! rail.set_bounds(size);
//!
//! // Press on "B" (unavailable), drag to "M", wiggle, release.
//! rail.handle_pointer(PointerEvent::Down { y: 45.0 }, 0);
//! rail.handle_pointer(PointerEvent::Move { y: 265.0 }, 16);
//! rail.handle_pointer(PointerEvent::Move { y: 271.0 }, 32);
//! rail.handle_pointer(PointerEvent::Up, 48);
//!
//! assert_eq!(*picked.borrow(), [Letter::M]);
//! assert!(rail.is_animating());
//!
//! // The host ticks the release halo from its frame loop.
//! rail.tick(48 + 150);
//! assert!(!rail.is_animating());
//! ```
//!
//! ## Configuration
//!
//! [`RailConfig`] carries colors, text size bounds, padding, and two behavior
//! switches: `animate_release` (fade a halo out of the released letter, or drop
//! it at once) and `lock_height_after_first_measure`. With the `serde` feature
//! it can be deserialized from a host config file; its tests run with
//! `cargo test -p understory_alphabet_rail --all-features`.
//!
//! ## Threading
//!
//! Everything runs on the host's UI thread. Pointer handling, ticks, and
//! rendering never block, and the rail holds no locks.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod animator;
mod availability;
mod color;
mod config;
mod geometry;
mod letter;
mod rail;
pub mod render;
mod selection;
mod sizing;

pub use animator::{
    AnimationRun, HALO_ALPHA, HALO_END_RADIUS_RATIO, HALO_START_RADIUS_RATIO, HaloSample,
    RELEASE_DURATION_MS, ReleaseAnimator, TickOutcome,
};
pub use availability::{LetterAvailability, LetterSet};
pub use color::{ParseColorError, Rgba8};
pub use config::RailConfig;
pub use geometry::{MAX_TEXT_SIZE_RATIO, SlotGeometry, TEXT_TO_SLOT_RATIO, TextSizeRange};
pub use letter::{LETTER_COUNT, Letter, SYMBOLS};
pub use rail::AlphabetRail;
pub use selection::{Effects, PointerEvent, SelectionState};
pub use sizing::{MonospaceMeasure, SizeConstraint, SizingPolicy, TextMeasure, WIDTH_MARGIN};
