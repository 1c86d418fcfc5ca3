// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player credits and session totals.
use serde::{Deserialize, Serialize};
use std::{fmt, ops};

use crate::Error;

/// Credits amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Credits(u32);

impl Credits {
    /// No credits.
    pub const ZERO: Credits = Credits(0);

    /// Creates credits with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Subtracts credits, returns None if there are not enough credits.
    pub fn checked_sub(self, rhs: Credits) -> Option<Credits> {
        self.0.checked_sub(rhs.0).map(Credits)
    }
}

impl From<u32> for Credits {
    fn from(val: u32) -> Self {
        Credits(val)
    }
}

impl ops::Add for Credits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Credits(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Credits {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Credits {
    /// Formats with a comma every three digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (idx, digit) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }

            grouped.push(digit);
        }

        f.pad(&grouped)
    }
}

/// The player credits with the totals bet and won in a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bankroll {
    credits: Credits,
    total_bet: Credits,
    total_won: Credits,
    last_win: Credits,
}

impl Bankroll {
    /// Creates a bankroll with the given credits.
    pub fn new(credits: Credits) -> Self {
        Self {
            credits,
            ..Default::default()
        }
    }

    /// The available credits.
    pub fn credits(&self) -> Credits {
        self.credits
    }

    /// The credits bet since the start of the session.
    pub fn total_bet(&self) -> Credits {
        self.total_bet
    }

    /// The credits won since the start of the session.
    pub fn total_won(&self) -> Credits {
        self.total_won
    }

    /// The payout of the last hand, zero after a bet.
    pub fn last_win(&self) -> Credits {
        self.last_win
    }

    /// Checks if there are enough credits for a bet.
    pub fn can_bet(&self, bet: u32) -> bool {
        self.credits.amount() >= bet
    }

    /// Takes a bet from the credits.
    pub fn bet(&mut self, bet: u32) -> Result<(), Error> {
        let bet = Credits::new(bet);
        self.credits = self
            .credits
            .checked_sub(bet)
            .ok_or(Error::InsufficientCredits {
                credits: self.credits,
                bet: bet.amount(),
            })?;

        self.total_bet += bet;
        self.last_win = Credits::ZERO;
        Ok(())
    }

    /// Pays a hand payout.
    pub fn win(&mut self, payout: u32) {
        let payout = Credits::new(payout);
        self.credits += payout;
        self.total_won += payout;
        self.last_win = payout;
    }

    /// The percentage of the credits bet paid back, None before the first bet.
    pub fn payback(&self) -> Option<f64> {
        match self.total_bet.amount() {
            0 => None,
            bet => Some(100.0 * f64::from(self.total_won.amount()) / f64::from(bet)),
        }
    }
}
