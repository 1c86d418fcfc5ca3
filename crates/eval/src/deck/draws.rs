// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draws enumeration.
use crate::{Card, Deck, Error, Hand};

/// The maximum subset size.
const MAX_K: usize = Hand::SIZE;

/// Creates table for nck(n, k) for n <= 52 and k <= 5.
const fn make_nck() -> [[u32; MAX_K + 1]; 52] {
    let mut t = [[0u32; MAX_K + 1]; 52];
    let mut n = 0;

    while n < 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n + 1 {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            let n_1 = n.saturating_sub(1);
            let k_1 = k.saturating_sub(1);
            t[n][k] = t[n_1][k_1] + t[n_1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; MAX_K + 1]; 52] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 5.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

    if n < k {
        0
    } else if n == 0 {
        // The empty set has one empty subset.
        1
    } else {
        NCKS[n.saturating_sub(1)][k] as usize
    }
}

/// The k-subsets of the positions `0..n`.
///
/// Uses Algorithm L from TAOCP 4a to generate each subset exactly once with
/// strictly increasing positions, a subset is generated from the previous one
/// by advancing the lowest position that can move and resetting the positions
/// before it.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    c: [usize; MAX_K + 3],
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Running,
    Done,
}

impl Combinations {
    /// Creates the k-subsets of `0..n`.
    ///
    /// Panics if k > 5.
    pub fn new(n: usize, k: usize) -> Self {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

        let mut combinations = Self {
            n,
            k,
            c: [0; MAX_K + 3],
            state: State::Start,
        };

        combinations.reset();
        combinations
    }

    /// Restarts the enumeration from the first subset.
    pub fn reset(&mut self) {
        let k = self.k;
        for j in 1..=k {
            self.c[j] = j - 1;
        }

        self.c[k + 1] = self.n;
        self.c[k + 2] = 0;
        self.state = if k > self.n { State::Done } else { State::Start };
    }

    /// The total number of subsets.
    pub fn total(&self) -> usize {
        nck(self.n, self.k)
    }

    /// Returns the next subset positions or None when all the subsets have
    /// been generated.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.state {
            State::Start => self.state = State::Running,
            State::Running => {
                let k = self.k;
                let c = &mut self.c;

                let mut j = 1;
                while c[j] + 1 == c[j + 1] {
                    c[j] = j - 1;
                    j += 1;
                }

                if j > k {
                    self.state = State::Done;
                    return None;
                }

                c[j] += 1;
            }
            State::Done => return None,
        }

        Some(&self.c[1..=self.k])
    }
}

/// Every draw for the open slots of a hand.
///
/// The hand is expected to be dealt from the first five cards of the deck, a
/// draw takes cards from the undealt deck positions `5..52` and writes them
/// into the hand slots that are not held, so that for a hand with h held cards
/// there are `nck(47, 5 - h)` draws. A hand with all the cards held has one
/// draw, the hand itself.
#[derive(Debug, Clone)]
pub struct Draws<'a> {
    pool: &'a [Card],
    slots: Vec<usize>,
    combinations: Combinations,
}

impl<'a> Draws<'a> {
    /// Creates the draws for the open slots of a hand.
    pub fn new(hand: &Hand, deck: &'a Deck) -> Self {
        let pool = deck.cards().get(Hand::SIZE..).unwrap_or_default();
        let slots = hand.open_slots().collect::<Vec<_>>();
        let combinations = Combinations::new(pool.len(), slots.len());

        Self {
            pool,
            slots,
            combinations,
        }
    }

    /// Creates the draws checking the held cards have been dealt from the
    /// deck and there is at least one draw.
    pub fn try_new(hand: &Hand, deck: &'a Deck) -> Result<Self, Error> {
        hand.check_held(deck)?;
        Self::new(hand, deck).non_empty()
    }

    fn non_empty(self) -> Result<Self, Error> {
        if self.total() == 0 {
            Err(Error::EmptyEnumeration(self.slots.len()))
        } else {
            Ok(self)
        }
    }

    /// The hand slots filled by each draw.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// The total number of draws.
    pub fn total(&self) -> usize {
        self.combinations.total()
    }

    /// Restarts the draws from the first one.
    pub fn reset(&mut self) {
        self.combinations.reset();
    }

    /// Writes the next draw into the hand open slots.
    ///
    /// Returns false when all the draws have been generated.
    pub fn advance(&mut self, hand: &mut Hand) -> bool {
        match self.combinations.advance() {
            Some(positions) => {
                for (&slot, &pos) in self.slots.iter().zip(positions) {
                    hand.put(slot, self.pool[pos]);
                }

                true
            }
            None => false,
        }
    }
}
