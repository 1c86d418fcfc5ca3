// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jacks video poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use jacks_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert_eq!(kd, Card::new(Rank::King, Suit::Diamonds));
//! ```
//!
//! and a [Deck] type with a draw cursor for shuffling and dealing cards:
//!
//! ```
//! # use jacks_cards::{Card, Deck};
//! let mut deck = Deck::new();
//! deck.shuffle();
//!
//! let hand = (0..5).map(|_| deck.draw()).collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(hand.len(), 5);
//! assert_eq!(deck.remaining(), Deck::SIZE - 5);
//! ```
//!
//! Each card is identified by a single bit in a 52 bits space, with each suit
//! using a 13 bits lane for its ranks, see [Card] for details.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Error, Rank, Suit};
