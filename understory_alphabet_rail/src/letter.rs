// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed 27-symbol alphabet shown on the rail.

use alloc::string::String;
use core::fmt;

/// Number of slots on the rail.
pub const LETTER_COUNT: usize = 27;

/// Symbols in slot order, top to bottom.
pub const SYMBOLS: [&str; LETTER_COUNT] = [
    "#", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// One symbol of the rail alphabet, identified by its slot index.
///
/// The slot index is the canonical selection index: `0` is `#`, `1..=26` are
/// `A..=Z`. A `Letter` is always in range; "no selection" is expressed as
/// `Option<Letter>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// The catch-all `#` slot at the top of the rail.
    pub const HASH: Self = Self(0);
    /// `A`.
    pub const A: Self = Self(1);
    /// `B`.
    pub const B: Self = Self(2);
    /// `C`.
    pub const C: Self = Self(3);
    /// `D`.
    pub const D: Self = Self(4);
    /// `E`.
    pub const E: Self = Self(5);
    /// `F`.
    pub const F: Self = Self(6);
    /// `G`.
    pub const G: Self = Self(7);
    /// `H`.
    pub const H: Self = Self(8);
    /// `I`.
    pub const I: Self = Self(9);
    /// `J`.
    pub const J: Self = Self(10);
    /// `K`.
    pub const K: Self = Self(11);
    /// `L`.
    pub const L: Self = Self(12);
    /// `M`.
    pub const M: Self = Self(13);
    /// `N`.
    pub const N: Self = Self(14);
    /// `O`.
    pub const O: Self = Self(15);
    /// `P`.
    pub const P: Self = Self(16);
    /// `Q`.
    pub const Q: Self = Self(17);
    /// `R`.
    pub const R: Self = Self(18);
    /// `S`.
    pub const S: Self = Self(19);
    /// `T`.
    pub const T: Self = Self(20);
    /// `U`.
    pub const U: Self = Self(21);
    /// `V`.
    pub const V: Self = Self(22);
    /// `W`.
    pub const W: Self = Self(23);
    /// `X`.
    pub const X: Self = Self(24);
    /// `Y`.
    pub const Y: Self = Self(25);
    /// `Z`, the last slot.
    pub const Z: Self = Self(26);

    /// Returns the letter for a slot index, or `None` if the index is out of range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= LETTER_COUNT {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Index is checked against LETTER_COUNT above"
        )]
        let slot = index as u8;
        Some(Self(slot))
    }

    /// Looks up a symbol, normalizing it to uppercase first.
    ///
    /// Returns `None` for anything outside the rail alphabet.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let upper: String = symbol.to_uppercase();
        SYMBOLS
            .iter()
            .position(|s| *s == upper)
            .and_then(Self::from_index)
    }

    /// Slot index of this letter, `0..LETTER_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The symbol drawn for this letter and reported to the host.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        SYMBOLS[self.0 as usize]
    }

    /// Iterates every letter in slot order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (Self::HASH.0..=Self::Z.0).map(Self)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_index() {
        assert_eq!(Letter::HASH.symbol(), "#");
        assert_eq!(Letter::A.symbol(), "A");
        assert_eq!(Letter::M.symbol(), "M");
        assert_eq!(Letter::Z.symbol(), "Z");
        assert_eq!(Letter::from_index(26), Some(Letter::Z));
        assert_eq!(Letter::from_index(27), None);
    }

    #[test]
    fn from_symbol_normalizes_case() {
        assert_eq!(Letter::from_symbol("m"), Some(Letter::M));
        assert_eq!(Letter::from_symbol("#"), Some(Letter::HASH));
        assert_eq!(Letter::from_symbol("AB"), None);
        assert_eq!(Letter::from_symbol("7"), None);
        assert_eq!(Letter::from_symbol(""), None);
    }

    #[test]
    fn all_is_in_slot_order() {
        let all: alloc::vec::Vec<_> = Letter::all().collect();
        assert_eq!(all.len(), LETTER_COUNT);
        assert!(all.windows(2).all(|w| w[0].index() + 1 == w[1].index()));
    }
}
