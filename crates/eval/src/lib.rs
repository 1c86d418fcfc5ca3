// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jacks video poker hand evaluator.
//!
//! Classifies five cards hands into the Jacks or Better pay table categories
//! using bitwise operations on a [CardSet], where each suit ranks occupy a 13
//! bits lane so that pairs, trips and quads are found by and-ing the lanes and
//! straights and flushes by comparing a lane with a fixed mask.
//!
//! ```
//! # use jacks_eval::*;
//! let cards = Card::parse_list("TD JD QD KD AD").unwrap();
//! let (category, relevant) = CardSet::from_cards(&cards).eval();
//! assert_eq!(category, Category::RoyalFlush);
//! assert_eq!(relevant.len(), 5);
//! assert_eq!(category.payout(5), 4000);
//! ```
//!
//! A [Hand] holds five cards by slot with a per slot held flag, and [Draws]
//! enumerates every way to fill the slots that are not held from the undealt
//! cards of a [Deck]:
//!
//! ```
//! # use jacks_eval::*;
//! let deck = Deck::new();
//! let mut hand = Hand::default();
//! for (slot, card) in deck.cards()[..Hand::SIZE].iter().enumerate() {
//!     hand.set(slot, Some(*card)).unwrap();
//! }
//!
//! hand.set_held(0, true).unwrap();
//! hand.set_held(1, true).unwrap();
//!
//! let mut draws = Draws::new(&hand, &deck);
//! let mut count = 0;
//! while draws.advance(&mut hand) {
//!     count += 1;
//! }
//! assert_eq!(count, 16_215);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod card_set;
pub use card_set::CardSet;

pub mod deck;
pub use deck::{Combinations, Draws, nck};

pub mod eval;
pub use eval::{Category, reference};

pub mod hand;
pub use hand::Hand;

// Reexport cards types.
pub use jacks_cards::{Card, Deck, Rank, Suit};

/// Evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A hand slot outside the 0..5 range.
    #[error("invalid hand slot {0}")]
    InvalidSlot(usize),
    /// The draws enumeration produced no combinations for a hand with slots
    /// to fill.
    #[error("no draws combinations to fill {0} slots")]
    EmptyEnumeration(usize),
    /// A held card that is not one of the five dealt cards.
    #[error("held card {0} has not been dealt")]
    HeldNotDealt(Card),
    /// The same card held in two slots.
    #[error("card {0} held more than once")]
    DuplicateHeld(Card),
    /// A deck or card error.
    #[error(transparent)]
    Cards(#[from] jacks_cards::Error),
}
