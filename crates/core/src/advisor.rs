// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold advisor.
use parking_lot::Mutex;
use serde::Serialize;
use std::thread;

use jacks_eval::{Card, Deck, Error, Hand};

use crate::ev::expected_value;

/// The number of ways to hold the cards of a hand.
pub const NUM_HOLDS: usize = 1 << Hand::SIZE;

/// The expected value of a hold pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldAdvice {
    /// The held slots with bit n for slot n.
    pub mask: u8,
    /// The held cards in slot order.
    pub held: Vec<Card>,
    /// The expected payout.
    pub ev: f64,
}

/// Computes the expected value of every hold pattern for a hand dealt from
/// the top of the deck, returns the patterns sorted from the best.
///
/// Patterns are split among `num_tasks` threads.
pub fn rank_holds(
    hand: &Hand,
    deck: &Deck,
    bet: u32,
    num_tasks: usize,
) -> Result<Vec<HoldAdvice>, Error> {
    let num_tasks = num_tasks.clamp(1, NUM_HOLDS);
    let results = Mutex::new(Vec::with_capacity(NUM_HOLDS));

    thread::scope(|s| {
        for task_id in 0..num_tasks {
            let results = &results;
            s.spawn(move || {
                for mask in (task_id..NUM_HOLDS).step_by(num_tasks) {
                    let mut hold = *hand;
                    hold.set_hold_mask(mask as u8);

                    let advice = expected_value(&hold, deck, bet).map(|ev| HoldAdvice {
                        mask: mask as u8,
                        held: hold.held_cards(),
                        ev,
                    });

                    results.lock().push(advice);
                }
            });
        }
    });

    let mut advice = results
        .into_inner()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    // Best first, fewer held slots first for equal values.
    advice.sort_by(|a, b| {
        b.ev.total_cmp(&a.ev)
            .then(a.mask.count_ones().cmp(&b.mask.count_ones()))
            .then(a.mask.cmp(&b.mask))
    });

    Ok(advice)
}
