// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A set of cards.
use serde::{Deserialize, Serialize};
use std::{fmt, ops};

use jacks_cards::{Card, Rank, Suit};

/// A set of cards as a 64 bits mask.
///
/// Each card sets its own bit (see [Card::flag]) so that the ranks of a suit
/// are found in a 13 bits lane of the mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// Mask for a suit ranks lane.
    pub const RANK_MASK: u64 = 0x1fff;

    /// Creates a set from a bit mask, bits above the 52 cards are cleared.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & ((1 << 52) - 1))
    }

    /// Creates a set from a slice of cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        cards.iter().collect()
    }

    /// Creates a set with all the cards with the given ranks mask.
    pub(crate) fn with_ranks(ranks: u64) -> Self {
        let ranks = ranks & Self::RANK_MASK;
        Self::from_bits(
            Suit::suits().fold(0, |acc, suit| acc | (ranks << suit.shift())),
        )
    }

    /// The set bits.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// The number of cards in the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set has no cards.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if a card is in the set.
    #[inline]
    pub const fn contains(&self, card: Card) -> bool {
        self.0 & card.flag() != 0
    }

    /// Adds a card to the set.
    pub fn insert(&mut self, card: Card) {
        self.0 |= card.flag();
    }

    /// Removes a card from the set.
    pub fn remove(&mut self, card: Card) {
        self.0 &= !card.flag();
    }

    /// The cards in this set or in the other set.
    pub const fn union(&self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    /// The cards in both sets.
    pub const fn intersection(&self, other: CardSet) -> CardSet {
        CardSet(self.0 & other.0)
    }

    /// The cards in this set that are not in the other set.
    pub const fn difference(&self, other: CardSet) -> CardSet {
        CardSet(self.0 & !other.0)
    }

    /// The ranks lane for a suit.
    #[inline]
    pub const fn suit_ranks(&self, suit: Suit) -> u64 {
        (self.0 >> suit.shift()) & Self::RANK_MASK
    }

    /// The cards in this set ordered by suit and rank.
    pub fn cards(&self) -> Vec<Card> {
        self.iter().collect()
    }

    /// Iterates the cards in this set ordered by suit and rank.
    pub fn iter(&self) -> Cards {
        Cards(self.0)
    }

    /// Checks if the set has a card with the given rank.
    pub fn has_rank(&self, rank: Rank) -> bool {
        Suit::suits().any(|suit| self.contains(Card::new(rank, suit)))
    }
}

/// Iterator over the cards of a [CardSet].
#[derive(Debug, Clone)]
pub struct Cards(u64);

impl Iterator for Cards {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }

        let index = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Card::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = Cards;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        CardSet(iter.into_iter().fold(0, |acc, c| acc | c.flag()))
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        CardSet(iter.into_iter().fold(0, |acc, c| acc | c.flag()))
    }
}

impl From<Card> for CardSet {
    fn from(card: Card) -> Self {
        CardSet(card.flag())
    }
}

impl ops::BitOr for CardSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl ops::BitAnd for CardSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl ops::Sub for CardSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", cards.join(", "))
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardSet{self}")
    }
}
