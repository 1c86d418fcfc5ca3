// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jacks video poker game session and odds calculator.
//!
//! The [EvCalculator] computes the expected payout of drawing to a set of held
//! cards on a background task, a new request cancels the one in flight:
//!
//! ```no_run
//! # use jacks_core::*;
//! # async fn run() -> anyhow::Result<()> {
//! let (states_tx, mut states_rx) = tokio::sync::mpsc::channel(16);
//! let calculator = EvCalculator::new(states_tx);
//!
//! let deck = Deck::new();
//! let held = Card::parse_list("TD JD QD KD")?;
//! calculator.calculate(&held, &deck, 5).await?;
//!
//! while let Some(state) = states_rx.recv().await {
//!     if let EvState::Complete(ev) = state {
//!         println!("EV {ev:.4}");
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A [Game] is an in memory session that deals, holds and draws hands paying
//! the Jacks or Better pay table.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod advisor;
pub use advisor::{HoldAdvice, rank_holds};

pub mod calculator;
pub use calculator::{EvCalculator, EvState};

pub mod credits;
pub use credits::{Bankroll, Credits};

pub mod ev;
pub use ev::{CancelToken, cancellable_expected_value, expected_value};

pub mod game;
pub use game::{Config, Game, Stage};

// Reexport cards and eval types.
pub use jacks_eval::{Card, CardSet, Category, Deck, Hand, Rank, Suit};

/// Game errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bet of zero credits.
    #[error("invalid bet {0}")]
    InvalidBet(u32),
    /// Not enough credits to cover the bet.
    #[error("insufficient credits {credits} for bet {bet}")]
    InsufficientCredits {
        /// The available credits.
        credits: Credits,
        /// The bet.
        bet: u32,
    },
    /// The action is not allowed in the current game stage.
    #[error("cannot {action} when the game is {stage}")]
    InvalidState {
        /// The action.
        action: &'static str,
        /// The game stage.
        stage: Stage,
    },
    /// A hand or evaluation error.
    #[error(transparent)]
    Eval(#[from] jacks_eval::Error),
}
