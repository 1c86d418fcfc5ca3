// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
// Elapsed:         ...
// Hands/sec:       ...
//
// None:            2062860
// Jacks or Better: 337920
// Two Pair:        123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  36
// Royal Flush:     4
// ```

use std::time::Instant;

use jacks_eval::*;

fn main() {
    // Evaluate all 2.6M hands.
    let now = Instant::now();
    let deck = Deck::new();
    let mut counts = [0usize; Category::COUNT];

    let mut combinations = Combinations::new(Deck::SIZE, Hand::SIZE);
    while let Some(positions) = combinations.advance() {
        let hand = positions.iter().map(|&p| deck[p]).collect::<CardSet>();
        counts[hand.eval().0 as usize] += 1;
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in Category::categories() {
        let name = format!("{category}:");
        println!("{name:<17}{}", counts[category as usize]);
    }
}
