// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The fast evaluator in [CardSet::eval] classifies a hand with a handful of
//! bitwise operations on the suit lanes, it is used by the expected value
//! enumeration where it runs once for each possible draw.
//!
//! The [reference] evaluator sorts and groups the cards and is kept as an
//! independent oracle, the two must agree on every 5 cards hand.
use crate::{CardSet, Rank};

mod category;
pub use category::Category;

pub mod reference;

/// Ace high straight ranks mask.
const ROYAL_STRAIGHT: u64 = 0x1f00;

/// All the straight ranks masks, from ace high to six high followed by the
/// ace low straight (wheel).
const STRAIGHTS: [u64; 10] = [
    ROYAL_STRAIGHT,
    0x0f80,
    0x07c0,
    0x03e0,
    0x01f0,
    0x00f8,
    0x007c,
    0x003e,
    0x001f,
    0x100f,
];

/// The number of cards in a flush.
const FLUSH_CARDS: u32 = 5;

impl CardSet {
    /// Evaluates a set of five cards.
    ///
    /// Returns the hand category and the cards that make the category, that
    /// is the matching cards for pairs, trips and quads and all the cards for
    /// straights, flushes and full houses, the relevant set is empty for a
    /// losing hand.
    pub fn eval(&self) -> (Category, CardSet) {
        let c = self.bits() & Self::RANK_MASK;
        let d = (self.bits() >> 13) & Self::RANK_MASK;
        let h = (self.bits() >> 26) & Self::RANK_MASK;
        let s = (self.bits() >> 39) & Self::RANK_MASK;

        let cd = c & d;
        let hs = h & s;
        let any2 = cd | (c & h) | (c & s) | (d & h) | (d & s) | hs;

        if any2 != 0 {
            let any3 = (cd & h) | (cd & s) | (hs & c) | (hs & d);
            let any4 = cd & hs;

            if any4 != 0 {
                (Category::FourOfAKind, self.of_ranks(any4))
            } else if any3 != 0 {
                if any2 & !any3 != 0 {
                    (Category::FullHouse, *self)
                } else {
                    (Category::ThreeOfAKind, self.of_ranks(any3))
                }
            } else if any2.count_ones() > 1 {
                (Category::TwoPair, self.of_ranks(any2))
            } else if any2 >= Rank::Jack.bit() as u64 {
                (Category::JacksOrBetter, self.of_ranks(any2))
            } else {
                (Category::None, CardSet::EMPTY)
            }
        } else {
            // No rank is shared by two suits, only straights and flushes left.
            let lanes = [c, d, h, s];
            for lane in lanes {
                if STRAIGHTS.contains(&lane) {
                    return if lane == ROYAL_STRAIGHT {
                        (Category::RoyalFlush, *self)
                    } else {
                        (Category::StraightFlush, *self)
                    };
                }
            }

            if lanes.iter().any(|lane| lane.count_ones() == FLUSH_CARDS) {
                (Category::Flush, *self)
            } else if STRAIGHTS.contains(&(c | d | h | s)) {
                (Category::Straight, *self)
            } else {
                (Category::None, CardSet::EMPTY)
            }
        }
    }

    /// The cards in this set with one of the given ranks.
    #[inline]
    fn of_ranks(&self, ranks: u64) -> CardSet {
        *self & CardSet::with_ranks(ranks)
    }
}
