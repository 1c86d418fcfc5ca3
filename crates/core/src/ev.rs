// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Expected value of a draw.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jacks_eval::{Deck, Draws, Error, Hand};

/// A token to cancel a running calculation.
///
/// Clones share the same flag, once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels this token and all its clones.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Checks if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Computes the average payout of every draw for the open slots of a hand.
///
/// The hand is expected to be dealt from the first five cards of the deck,
/// the open slots are filled from the deck positions `5..52`. A hand with all
/// the cards held returns its own payout.
///
/// Returns an error if a held card is repeated or is not one of the first five
/// deck cards.
pub fn expected_value(hand: &Hand, deck: &Deck, bet: u32) -> Result<f64, Error> {
    // Never cancelled so there is always a value.
    average_payout(hand, deck, bet, || false).map(Option::unwrap_or_default)
}

/// Same as [expected_value] but checks the token before evaluating each draw,
/// returns `None` if the token has been cancelled.
pub fn cancellable_expected_value(
    hand: &Hand,
    deck: &Deck,
    bet: u32,
    token: &CancelToken,
) -> Result<Option<f64>, Error> {
    average_payout(hand, deck, bet, || token.is_cancelled())
}

fn average_payout(
    hand: &Hand,
    deck: &Deck,
    bet: u32,
    is_cancelled: impl Fn() -> bool,
) -> Result<Option<f64>, Error> {
    hand.check_held(deck)?;

    if hand.open_slots().next().is_none() {
        return Ok(Some(f64::from(hand.evaluate().payout(bet))));
    }

    let mut scratch = *hand;
    let mut draws = Draws::try_new(&scratch, deck)?;
    let mut total = 0u64;
    let mut count = 0u64;

    while draws.advance(&mut scratch) {
        if is_cancelled() {
            return Ok(None);
        }

        total += u64::from(scratch.evaluate().payout(bet));
        count += 1;
    }

    Ok(Some(total as f64 / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jacks_eval::{Card, Combinations, reference};

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_list(s).unwrap()
    }

    fn royal_draw() -> Deck {
        Deck::with_top(&cards("TD JD QD KD 2C")).unwrap()
    }

    #[test]
    fn royal_draw_ev() {
        let deck = royal_draw();
        let hand = Hand::with_held(&cards("TD JD QD KD")).unwrap();

        // Royal 1, straight flush 1, flush 7, straight 6, jacks or better 9.
        let ev = expected_value(&hand, &deck, 1).unwrap();
        assert!((ev - 375.0 / 47.0).abs() < 1e-12, "{ev}");

        let ev = expected_value(&hand, &deck, 5).unwrap();
        assert!((ev - 4625.0 / 47.0).abs() < 1e-12, "{ev}");
    }

    #[test]
    fn all_held() {
        let full_house = cards("4D KD 4H KH 4S");
        let deck = Deck::with_top(&full_house).unwrap();
        let hand = Hand::with_held(&full_house).unwrap();
        for bet in 1..=5 {
            assert_eq!(expected_value(&hand, &deck, bet), Ok(f64::from(9 * bet)));
        }

        let royal = cards("TS JS QS KS AS");
        let deck = Deck::with_top(&royal).unwrap();
        let hand = Hand::with_held(&royal).unwrap();
        assert_eq!(expected_value(&hand, &deck, 5), Ok(4000.0));
    }

    #[test]
    fn held_not_dealt() {
        let deck = Deck::with_top(&cards("2C 3C 4C 5C 6C")).unwrap();

        // The aces are in the draw pool.
        let hand = Hand::with_held(&cards("AS AH AD AC")).unwrap();
        let as_: Card = "AS".parse().unwrap();
        assert_eq!(
            expected_value(&hand, &deck, 1),
            Err(Error::HeldNotDealt(as_))
        );

        // All held skips the enumeration but not the check.
        let hand = Hand::with_held(&cards("2C 2C 3C 4C 5C")).unwrap();
        let token = CancelToken::new();
        assert!(matches!(
            cancellable_expected_value(&hand, &deck, 1, &token),
            Err(Error::DuplicateHeld(_))
        ));
    }

    #[test]
    fn idempotent() {
        let deck = royal_draw();
        let mut hand = Hand::from_cards(&deck.cards()[..5]).unwrap();
        hand.set_hold_mask(0b00111);

        let first = expected_value(&hand, &deck, 3).unwrap();
        let second = expected_value(&hand, &deck, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn matches_reference_eval() {
        let deck = Deck::with_top(&cards("4D KD 5H KH JS")).unwrap();
        let mut hand = Hand::from_cards(&deck.cards()[..5]).unwrap();
        hand.set_hold_mask(0b01010);

        let ev = expected_value(&hand, &deck, 1).unwrap();

        // Enumerate the three cards draws and use the reference evaluator.
        let held = hand.held_cards();
        let pool = &deck.cards()[5..];
        let mut combinations = Combinations::new(pool.len(), 3);
        let mut total = 0;
        let mut count = 0;
        while let Some(positions) = combinations.advance() {
            let mut drawn = held.clone();
            drawn.extend(positions.iter().map(|&p| pool[p]));
            total += reference::eval(&drawn).0.payout(1);
            count += 1;
        }

        assert_eq!(count, 16_215);
        let expected = f64::from(total) / f64::from(count);
        assert!((ev - expected).abs() < 1e-12, "{ev} {expected}");

        // A high pair is worth about one and a half credits.
        assert!(ev > 1.4 && ev < 1.7, "{ev}");
    }

    #[test]
    fn cancelled() {
        let deck = royal_draw();
        let hand = Hand::with_held(&cards("TD JD")).unwrap();

        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());

        let ev = cancellable_expected_value(&hand, &deck, 1, &token).unwrap();
        assert!(ev.is_some());

        clone.cancel();
        assert!(token.is_cancelled());
        let ev = cancellable_expected_value(&hand, &deck, 1, &token).unwrap();
        assert_eq!(ev, None);
    }
}
