// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied set of letters that currently have matches.

use crate::{LETTER_COUNT, Letter};

bitflags::bitflags! {
    /// A set of rail letters, one bit per slot.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LetterSet: u32 {
        /// `#`.
        const HASH = 1 << 0;
        /// `A`.
        const A = 1 << 1;
        /// `B`.
        const B = 1 << 2;
        /// `C`.
        const C = 1 << 3;
        /// `D`.
        const D = 1 << 4;
        /// `E`.
        const E = 1 << 5;
        /// `F`.
        const F = 1 << 6;
        /// `G`.
        const G = 1 << 7;
        /// `H`.
        const H = 1 << 8;
        /// `I`.
        const I = 1 << 9;
        /// `J`.
        const J = 1 << 10;
        /// `K`.
        const K = 1 << 11;
        /// `L`.
        const L = 1 << 12;
        /// `M`.
        const M = 1 << 13;
        /// `N`.
        const N = 1 << 14;
        /// `O`.
        const O = 1 << 15;
        /// `P`.
        const P = 1 << 16;
        /// `Q`.
        const Q = 1 << 17;
        /// `R`.
        const R = 1 << 18;
        /// `S`.
        const S = 1 << 19;
        /// `T`.
        const T = 1 << 20;
        /// `U`.
        const U = 1 << 21;
        /// `V`.
        const V = 1 << 22;
        /// `W`.
        const W = 1 << 23;
        /// `X`.
        const X = 1 << 24;
        /// `Y`.
        const Y = 1 << 25;
        /// `Z`.
        const Z = 1 << 26;
    }
}

const _: () = assert!(LetterSet::all().bits().count_ones() as usize == LETTER_COUNT);

impl LetterSet {
    /// The singleton set for `letter`.
    #[must_use]
    pub const fn of(letter: Letter) -> Self {
        Self::from_bits_retain(1 << letter.index())
    }

    /// Returns `true` if `letter` is a member.
    #[must_use]
    pub const fn has(self, letter: Letter) -> bool {
        self.contains(Self::of(letter))
    }

    /// Builds a set from host symbols, uppercase-normalized.
    ///
    /// Symbols outside the rail alphabet can never match a glyph and are dropped.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols
            .into_iter()
            .filter_map(|s| Letter::from_symbol(s.as_ref()))
            .fold(Self::empty(), |set, letter| set | Self::of(letter))
    }

    /// Iterates the member letters in slot order.
    pub fn letters(self) -> impl Iterator<Item = Letter> {
        Letter::all().filter(move |l| self.has(*l))
    }
}

/// Which letters are eligible for selection callbacks and full-opacity glyphs.
///
/// The set is only ever replaced wholesale through [`LetterAvailability::set_available`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterAvailability {
    letters: LetterSet,
}

impl LetterAvailability {
    /// Creates an availability set with the given letters.
    #[must_use]
    pub const fn new(letters: LetterSet) -> Self {
        Self { letters }
    }

    /// Replaces the whole set.
    ///
    /// Returns `true` if the set changed, which hosts treat as a redraw request.
    pub fn set_available(&mut self, letters: LetterSet) -> bool {
        let changed = self.letters != letters;
        self.letters = letters;
        changed
    }

    /// Membership test, consulted once per glyph per draw.
    #[must_use]
    pub const fn is_available(&self, letter: Letter) -> bool {
        self.letters.has(letter)
    }

    /// The current set.
    #[must_use]
    pub const fn letters(&self) -> LetterSet {
        self.letters
    }
}
