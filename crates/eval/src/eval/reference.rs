// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Reference hand evaluator.
//!
//! Evaluates a hand by sorting the cards by rank and counting ranks and suits,
//! it is much slower than [CardSet::eval] and it is used to check it.
use std::cmp::Reverse;

use crate::{Card, CardSet, Category, Rank, Suit};

/// Evaluates up to five cards.
///
/// Returns the same category and relevant cards as [CardSet::eval].
pub fn eval(cards: &[Card]) -> (Category, CardSet) {
    // At least two cards to make a hand.
    if cards.len() < 2 {
        return (Category::None, CardSet::EMPTY);
    }

    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|c| Reverse(c.rank()));

    let mut by_rank = vec![Vec::<Card>::new(); Rank::COUNT];
    let mut by_suit = vec![Vec::<Card>::new(); Suit::COUNT];
    for card in &sorted {
        by_rank[card.rank() as usize].push(*card);
        by_suit[card.suit() as usize].push(*card);
    }

    // Largest groups first, higher ranks first for groups of the same size.
    by_rank.sort_by_key(|g| Reverse((g.len(), g.first().map(Card::rank))));

    let is_flush = by_suit.iter().any(|g| g.len() == 5);
    let is_straight = sorted.len() == 5
        && sorted.windows(2).enumerate().all(|(idx, w)| {
            let (high, low) = (w[0].rank(), w[1].rank());
            high.lower() == Some(low)
                || (idx == 0 && high == Rank::Ace && low == Rank::Five)
        });

    let all = CardSet::from_cards(&sorted);
    let groups = |n: usize| CardSet::from_cards(&by_rank[..n].concat());
    let (first, second) = (by_rank[0].len(), by_rank[1].len());

    if is_flush && is_straight {
        if sorted[0].rank() == Rank::Ace && sorted[1].rank() == Rank::King {
            (Category::RoyalFlush, all)
        } else {
            (Category::StraightFlush, all)
        }
    } else if first == 4 {
        (Category::FourOfAKind, groups(1))
    } else if first == 3 && second == 2 {
        (Category::FullHouse, groups(2))
    } else if is_flush {
        (Category::Flush, all)
    } else if is_straight {
        (Category::Straight, all)
    } else if first == 3 {
        (Category::ThreeOfAKind, groups(1))
    } else if first == 2 && second == 2 {
        (Category::TwoPair, groups(2))
    } else if first == 2 && by_rank[0][0].rank() >= Rank::Jack {
        (Category::JacksOrBetter, groups(1))
    } else {
        (Category::None, CardSet::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, deck::Combinations};

    fn category(s: &str) -> Category {
        eval(&Card::parse_list(s).unwrap()).0
    }

    #[test]
    fn categories() {
        assert_eq!(category("9S 2D 6D 6C TS"), Category::None);
        assert_eq!(category("4D KD 5H KH JS"), Category::JacksOrBetter);
        assert_eq!(category("4D KD 4H KH JS"), Category::TwoPair);
        assert_eq!(category("4D KD 4H QH 4S"), Category::ThreeOfAKind);
        assert_eq!(category("4D 5D 6H 7H 8S"), Category::Straight);
        assert_eq!(category("AD 2D 3H 4H 5S"), Category::Straight);
        assert_eq!(category("4D 5D 9D QD AD"), Category::Flush);
        assert_eq!(category("4D KD 4H KH 4S"), Category::FullHouse);
        assert_eq!(category("4D KD 4H 4C 4S"), Category::FourOfAKind);
        assert_eq!(category("4D 5D 6D 7D 8D"), Category::StraightFlush);
        assert_eq!(category("AD 2D 3D 4D 5D"), Category::StraightFlush);
        assert_eq!(category("TD JD QD KD AD"), Category::RoyalFlush);
    }

    #[test]
    fn short_hands() {
        assert_eq!(category(""), Category::None);
        assert_eq!(category("AS"), Category::None);
        assert_eq!(category("AS AD"), Category::JacksOrBetter);
        assert_eq!(category("KS QS"), Category::None);
        assert_eq!(category("AS AD AH 2C"), Category::ThreeOfAKind);
    }

    // Evaluates all 2.6M hands with both evaluators.
    #[test]
    fn agrees_with_fast_eval() {
        let deck = Deck::new();
        let mut hand = Vec::with_capacity(5);
        let mut combinations = Combinations::new(Deck::SIZE, 5);
        let mut count = 0;

        while let Some(positions) = combinations.advance() {
            hand.clear();
            hand.extend(positions.iter().map(|&p| deck[p]));

            let fast = CardSet::from_cards(&hand).eval();
            assert_eq!(eval(&hand), fast, "{hand:?}");
            count += 1;
        }

        assert_eq!(count, 2_598_960);
    }
}
