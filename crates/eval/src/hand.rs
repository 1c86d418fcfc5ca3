// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Video poker hand.
use std::fmt;

use crate::{Card, CardSet, Category, Deck, Error, reference};

/// A five cards hand.
///
/// Cards are addressed by slot (0..5) and each slot has its own held flag,
/// held slots are never replaced when drawing from a deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hand {
    slots: [Option<Card>; Hand::SIZE],
    held: [bool; Hand::SIZE],
}

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// Creates a hand with the given cards in the first slots.
    pub fn from_cards(cards: &[Card]) -> Result<Self, Error> {
        let mut hand = Self::default();
        for (slot, card) in cards.iter().enumerate() {
            hand.set(slot, Some(*card))?;
        }

        Ok(hand)
    }

    /// Creates a hand with the given cards all held.
    pub fn with_held(cards: &[Card]) -> Result<Self, Error> {
        let mut hand = Self::from_cards(cards)?;
        for slot in 0..cards.len() {
            hand.held[slot] = true;
        }

        Ok(hand)
    }

    /// The card in a slot.
    pub fn get(&self, slot: usize) -> Result<Option<Card>, Error> {
        self.slots
            .get(slot)
            .copied()
            .ok_or(Error::InvalidSlot(slot))
    }

    /// Sets the card in a slot.
    pub fn set(&mut self, slot: usize, card: Option<Card>) -> Result<(), Error> {
        let s = self.slots.get_mut(slot).ok_or(Error::InvalidSlot(slot))?;
        *s = card;
        Ok(())
    }

    #[inline]
    pub(crate) fn put(&mut self, slot: usize, card: Card) {
        self.slots[slot] = Some(card);
    }

    /// Checks if a slot is held, slots outside 0..5 are never held.
    pub fn is_held(&self, slot: usize) -> bool {
        self.held.get(slot).copied().unwrap_or(false)
    }

    /// Sets or clears the held flag for a slot.
    pub fn set_held(&mut self, slot: usize, held: bool) -> Result<(), Error> {
        let h = self.held.get_mut(slot).ok_or(Error::InvalidSlot(slot))?;
        *h = held;
        Ok(())
    }

    /// Toggles the held flag for a slot, returns the new flag.
    pub fn toggle_hold(&mut self, slot: usize) -> Result<bool, Error> {
        let held = !self.is_held(slot);
        self.set_held(slot, held)?;
        Ok(held)
    }

    /// Sets the held flags from a mask with bit n for slot n.
    pub fn set_hold_mask(&mut self, mask: u8) {
        for (slot, held) in self.held.iter_mut().enumerate() {
            *held = mask & (1 << slot) != 0;
        }
    }

    /// The held flags as a mask with bit n for slot n.
    pub fn hold_mask(&self) -> u8 {
        self.held
            .iter()
            .enumerate()
            .filter(|(_, held)| **held)
            .fold(0, |mask, (slot, _)| mask | (1 << slot))
    }

    /// Clears all the held flags.
    pub fn clear_holds(&mut self) {
        self.held = [false; Hand::SIZE];
    }

    /// Removes all cards and held flags.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The slots that are filled on a draw, these are the slots that are not
    /// held or that have no card.
    pub fn open_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Hand::SIZE).filter(|&slot| !self.held[slot] || self.slots[slot].is_none())
    }

    /// The held cards in slot order.
    pub fn held_cards(&self) -> Vec<Card> {
        self.slots
            .iter()
            .zip(self.held)
            .filter_map(|(card, held)| if held { *card } else { None })
            .collect()
    }

    /// Checks that the held cards are distinct and are among the first five
    /// cards of the deck, the ones the hand is dealt from.
    pub fn check_held(&self, deck: &Deck) -> Result<(), Error> {
        let dealt = deck.cards().get(..Hand::SIZE).unwrap_or_default();
        let mut seen = CardSet::EMPTY;

        for card in self.held_cards() {
            if seen.contains(card) {
                return Err(Error::DuplicateHeld(card));
            }

            if !dealt.contains(&card) {
                return Err(Error::HeldNotDealt(card));
            }

            seen.insert(card);
        }

        Ok(())
    }

    /// The cards in slot order skipping empty slots.
    pub fn cards(&self) -> Vec<Card> {
        self.slots.iter().flatten().copied().collect()
    }

    /// The set of cards in this hand.
    pub fn card_set(&self) -> CardSet {
        self.slots.iter().flatten().collect()
    }

    /// The number of cards in the hand.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Checks if the hand has no cards.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draws cards from the deck for all the open slots.
    pub fn draw_from(&mut self, deck: &mut Deck) -> Result<(), Error> {
        for slot in 0..Hand::SIZE {
            if !self.held[slot] || self.slots[slot].is_none() {
                self.slots[slot] = Some(deck.draw()?);
            }
        }

        Ok(())
    }

    /// Evaluates the hand category.
    pub fn evaluate(&self) -> Category {
        self.card_set().eval().0
    }

    /// Evaluates the hand category and returns the slots with the cards that
    /// make the category.
    pub fn evaluate_with_pins(&self) -> (Category, [bool; Hand::SIZE]) {
        let (category, relevant) = self.card_set().eval();
        let pins = self
            .slots
            .map(|card| card.is_some_and(|c| relevant.contains(c)));
        (category, pins)
    }

    /// Evaluates the hand category with the reference evaluator.
    pub fn evaluate_reference(&self) -> Category {
        reference::eval(&self.cards()).0
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, card) in self.slots.iter().enumerate() {
            if slot > 0 {
                write!(f, " ")?;
            }

            match card {
                Some(card) => write!(f, "{card}")?,
                None => write!(f, "--")?,
            }

            if self.held[slot] {
                write!(f, "*")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn hand(s: &str) -> Hand {
        Hand::from_cards(&Card::parse_list(s).unwrap()).unwrap()
    }

    #[test]
    fn slots() {
        let mut h = Hand::default();
        assert!(h.is_empty());

        let kd = "KD".parse().unwrap();
        h.set(2, Some(kd)).unwrap();
        assert_eq!(h.get(2), Ok(Some(kd)));
        assert_eq!(h.get(0), Ok(None));
        assert_eq!(h.len(), 1);

        assert_eq!(h.set(5, Some(kd)), Err(Error::InvalidSlot(5)));
        assert_eq!(h.get(7), Err(Error::InvalidSlot(7)));
        assert_eq!(h.set_held(5, true), Err(Error::InvalidSlot(5)));
        assert!(!h.is_held(5));

        assert_eq!(h.to_string(), "-- -- KD -- --");

        h.set(2, None).unwrap();
        assert!(h.is_empty());

        let cards = Card::parse_list("2C 3C 4C 5C 6C 7C").unwrap();
        assert_eq!(Hand::from_cards(&cards), Err(Error::InvalidSlot(5)));
    }

    #[test]
    fn holds() {
        let mut h = hand("4D KD 5H KH JS");
        assert_eq!(h.toggle_hold(1), Ok(true));
        assert_eq!(h.toggle_hold(3), Ok(true));
        assert!(h.is_held(1) && h.is_held(3));
        assert_eq!(h.hold_mask(), 0b01010);
        assert_eq!(h.held_cards(), Card::parse_list("KD KH").unwrap());
        assert_eq!(h.open_slots().collect::<Vec<_>>(), [0, 2, 4]);
        assert_eq!(h.to_string(), "4D KD* 5H KH* JS");

        assert_eq!(h.toggle_hold(1), Ok(false));
        assert_eq!(h.hold_mask(), 0b01000);

        h.set_hold_mask(0b10001);
        assert_eq!(h.held_cards(), Card::parse_list("4D JS").unwrap());

        h.clear_holds();
        assert_eq!(h.hold_mask(), 0);

        let h = Hand::with_held(&Card::parse_list("AS AD").unwrap()).unwrap();
        assert_eq!(h.hold_mask(), 0b00011);
    }

    #[test]
    fn held_from_dealt_cards() {
        let deck = Deck::with_top(&Card::parse_list("4D KD 5H KH JS").unwrap()).unwrap();
        let held = |s: &str| Hand::with_held(&Card::parse_list(s).unwrap()).unwrap();

        assert_eq!(held("KD KH").check_held(&deck), Ok(()));
        assert_eq!(held("").check_held(&deck), Ok(()));
        assert_eq!(held("4D KD 5H KH JS").check_held(&deck), Ok(()));

        let as_: Card = "AS".parse().unwrap();
        assert_eq!(
            held("KD AS").check_held(&deck),
            Err(Error::HeldNotDealt(as_))
        );

        let kd = "KD".parse().unwrap();
        assert_eq!(
            held("KD KD").check_held(&deck),
            Err(Error::DuplicateHeld(kd))
        );

        // Cards in open slots are replaced by draws and are not checked.
        let mut h = held("KD AS");
        h.set_held(1, false).unwrap();
        assert_eq!(h.check_held(&deck), Ok(()));
    }

    #[test]
    fn draw_from_deck() {
        let mut deck = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(11));
        let mut h = Hand::default();
        h.draw_from(&mut deck).unwrap();
        assert_eq!(h.cards(), &deck.cards()[..5]);
        assert_eq!(deck.dealt(), 5);

        // Held slots are kept, the others are replaced.
        h.set_held(0, true).unwrap();
        h.set_held(4, true).unwrap();
        let before = h;
        h.draw_from(&mut deck).unwrap();
        assert_eq!(deck.dealt(), 8);
        assert_eq!(h.get(0), before.get(0));
        assert_eq!(h.get(4), before.get(4));
        assert_eq!(h.get(1).unwrap(), Some(deck[5]));
        assert_eq!(h.get(3).unwrap(), Some(deck[7]));

        // A held empty slot is filled.
        let mut h = Hand::default();
        h.set_held(2, true).unwrap();
        h.draw_from(&mut deck).unwrap();
        assert_eq!(h.len(), Hand::SIZE);

        // Drawing from an exhausted deck fails.
        while deck.draw().is_ok() {}
        assert!(matches!(
            h.draw_from(&mut deck),
            Err(Error::Cards(jacks_cards::Error::ExhaustedDeck))
        ));

        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.hold_mask(), 0);
    }

    #[test]
    fn evaluate() {
        let cases = [
            ("9S 2D 6D 6C TS", Category::None, [false; 5]),
            (
                "4D KD 5H KH JS",
                Category::JacksOrBetter,
                [false, true, false, true, false],
            ),
            (
                "4D KD 4H KH JS",
                Category::TwoPair,
                [true, true, true, true, false],
            ),
            (
                "4D KD 4H QH 4S",
                Category::ThreeOfAKind,
                [true, false, true, false, true],
            ),
            ("4D 5D 6H 7H 8S", Category::Straight, [true; 5]),
            ("4D 5D 9D QD AD", Category::Flush, [true; 5]),
            ("4D KD 4H KH 4S", Category::FullHouse, [true; 5]),
            (
                "4D KD 4H 4C 4S",
                Category::FourOfAKind,
                [true, false, true, true, true],
            ),
            ("4D 5D 6D 7D 8D", Category::StraightFlush, [true; 5]),
            ("TD JD QD KD AD", Category::RoyalFlush, [true; 5]),
        ];

        for (cards, category, pins) in cases {
            let h = hand(cards);
            assert_eq!(h.evaluate(), category, "{h}");
            assert_eq!(h.evaluate_reference(), category, "{h}");
            assert_eq!(h.evaluate_with_pins(), (category, pins), "{h}");
        }
    }

    #[test]
    fn evaluate_random_hands() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10_000 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let mut h = Hand::default();
            h.draw_from(&mut deck).unwrap();
            assert_eq!(h.evaluate(), h.evaluate_reference(), "{h}");
        }
    }
}
