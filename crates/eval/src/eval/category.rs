// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand categories and the pay table.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Jacks or Better hand category, ordered by payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A losing hand.
    None = 0,
    /// A pair of jacks, queens, kings or aces.
    JacksOrBetter,
    /// Two pairs.
    TwoPair,
    /// Three cards with the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards with the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards with the same rank.
    FourOfAKind,
    /// Five cards in sequence with the same suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl Category {
    /// The number of categories.
    pub const COUNT: usize = 10;

    /// The maximum bet.
    pub const MAX_BET: u32 = 5;

    /// Royal flush payout at the maximum bet.
    pub const JACKPOT: u32 = 4000;

    /// All categories from the lowest to the highest.
    pub fn categories() -> impl DoubleEndedIterator<Item = Category> {
        use Category::*;
        [
            None,
            JacksOrBetter,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The paying categories from the highest to the lowest, the pay table
    /// order.
    pub fn winning() -> impl Iterator<Item = Category> {
        Self::categories().rev().filter(|c| *c != Category::None)
    }

    /// The pay table multiplier for one credit.
    pub const fn multiplier(&self) -> u32 {
        match self {
            Category::None => 0,
            Category::JacksOrBetter => 1,
            Category::TwoPair => 2,
            Category::ThreeOfAKind => 3,
            Category::Straight => 4,
            Category::Flush => 6,
            Category::FullHouse => 9,
            Category::FourOfAKind => 25,
            Category::StraightFlush => 50,
            Category::RoyalFlush => 250,
        }
    }

    /// The payout for this category given a bet.
    ///
    /// A royal flush with the maximum bet pays the [Category::JACKPOT], the
    /// payout saturates at `u32::MAX`.
    pub const fn payout(&self, bet: u32) -> u32 {
        match self {
            Category::RoyalFlush if bet == Self::MAX_BET => Self::JACKPOT,
            _ => self.multiplier().saturating_mul(bet),
        }
    }

    /// Checks if this category pays.
    pub fn is_winning(&self) -> bool {
        *self != Category::None
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::None => "None",
            Category::JacksOrBetter => "Jacks or Better",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };

        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_table() {
        let payouts = Category::categories()
            .map(|c| c.payout(1))
            .collect::<Vec<_>>();
        assert_eq!(payouts, [0, 1, 2, 3, 4, 6, 9, 25, 50, 250]);

        assert_eq!(Category::RoyalFlush.payout(4), 1000);
        assert_eq!(Category::RoyalFlush.payout(5), 4000);
        assert_eq!(Category::StraightFlush.payout(5), 250);
        assert_eq!(Category::None.payout(5), 0);

        // Huge bets never overflow.
        assert_eq!(Category::JacksOrBetter.payout(u32::MAX), u32::MAX);
        assert_eq!(Category::RoyalFlush.payout(u32::MAX), u32::MAX);
        assert_eq!(Category::None.payout(u32::MAX), 0);
    }

    #[test]
    fn payout_order() {
        for bet in 1..=Category::MAX_BET {
            let categories = Category::categories().collect::<Vec<_>>();
            assert_eq!(categories.len(), Category::COUNT);

            for w in categories.windows(2) {
                assert!(w[0] < w[1]);
                assert!(w[0].payout(bet) < w[1].payout(bet), "{} {bet}", w[1]);
            }
        }
    }

    #[test]
    fn winning_categories() {
        let winning = Category::winning().collect::<Vec<_>>();
        assert_eq!(winning.len(), Category::COUNT - 1);
        assert_eq!(winning[0], Category::RoyalFlush);
        assert_eq!(winning[8], Category::JacksOrBetter);
        assert!(winning.iter().all(Category::is_winning));
        assert!(!Category::None.is_winning());
        assert_eq!(Category::ThreeOfAKind.to_string(), "Three of a Kind");
    }
}
