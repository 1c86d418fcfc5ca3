// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, ops, str::FromStr};

/// Cards errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// All the deck cards have been drawn since the last shuffle.
    #[error("no cards left in the deck")]
    ExhaustedDeck,
    /// A string that doesn't describe a card.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// The same card was given more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// A Poker card.
///
/// A card is represented by a single bit in a 64 bits flag, each suit uses a
/// 13 bits lane where the bit position within the lane is the card rank:
///
/// ```text
///   63      52 51         39 38         26 25         13 12          0
///   +--------+-------------+-------------+-------------+-------------+
///   |xxxxxxxx|AKQJT98765432|AKQJT98765432|AKQJT98765432|AKQJT98765432|
///   +--------+-------------+-------------+-------------+-------------+
///              spades        hearts        diamonds      clubs
/// ```
///
/// so that a set of cards is the bitwise or of the cards flags.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u64);

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(1 << (rank as u32 + suit.shift()))
    }

    /// Creates a card from its bit position (0..52).
    pub fn from_index(index: u32) -> Option<Card> {
        if index < Deck::SIZE as u32 {
            Some(Self(1 << index))
        } else {
            None
        }
    }

    /// The card flag with the single card bit set.
    #[inline]
    pub const fn flag(&self) -> u64 {
        self.0
    }

    /// The card bit position in the flag.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0.trailing_zeros()
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.index() / Rank::COUNT as u32 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            3 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match Rank::from_index(self.index() % Rank::COUNT as u32) {
            Some(rank) => rank,
            None => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Parses a list of cards separated by spaces or commas, i.e. "4D KD 5H".
    pub fn parse_list(s: &str) -> Result<Vec<Card>, Error> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => match (Rank::from_char(r), Suit::from_char(c)) {
                (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
                _ => Err(Error::InvalidCard(s.to_string())),
            },
            _ => Err(Error::InvalidCard(s.to_string())),
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// Returns the rank with the given encoding (0..13).
    pub fn from_index(index: u32) -> Option<Rank> {
        Rank::ranks().nth(index as usize)
    }

    /// The rank bit in a suit lane.
    #[inline]
    pub const fn bit(&self) -> u16 {
        1 << *self as u16
    }

    /// The next lower rank, none for a deuce.
    pub fn lower(&self) -> Option<Rank> {
        (*self as u32).checked_sub(1).and_then(Rank::from_index)
    }

    fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The offset of this suit ranks lane in a card flag.
    #[inline]
    pub const fn shift(&self) -> u32 {
        *self as u32 * Rank::COUNT as u32
    }

    fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A cards Deck
///
/// The deck keeps its cards in order and deals them from a cursor that
/// advances with each draw, shuffling resets the cursor to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new ordered deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle_with(rng);
        deck
    }

    /// Creates a deck with the given cards on top followed by the remaining
    /// cards in order.
    pub fn with_top(top: &[Card]) -> Result<Self, Error> {
        let mut cards = Vec::with_capacity(Self::SIZE);
        for &card in top {
            if cards.contains(&card) {
                return Err(Error::DuplicateCard(card));
            }

            cards.push(card);
        }

        cards.extend(Self::default().cards.into_iter().filter(|c| !top.contains(c)));
        Ok(Self { cards, next: 0 })
    }

    /// Shuffles the deck using the thread rng.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffles the deck with the given rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Draws a card from the deck.
    pub fn draw(&mut self) -> Result<Card, Error> {
        let card = self.cards.get(self.next).copied().ok_or(Error::ExhaustedDeck)?;
        self.next += 1;
        Ok(card)
    }

    /// Number of cards drawn since the last shuffle.
    pub fn dealt(&self) -> usize {
        self.next
    }

    /// Number of cards that can still be drawn.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Checks if all cards have been drawn.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// All the deck cards in deck order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }
}

impl ops::Index<usize> for Deck {
    type Output = Card;

    fn index(&self, position: usize) -> &Self::Output {
        &self.cards[position]
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
