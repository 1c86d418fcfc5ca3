// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Video poker game session.
use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use jacks_eval::{Category, Deck, Hand};

use crate::{Bankroll, Credits, Error};

/// Game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The player starting credits.
    pub credits: u32,
    /// The maximum bet, at most [Category::MAX_BET].
    pub max_bet: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credits: 1000,
            max_bet: Category::MAX_BET,
        }
    }
}

/// The game stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for a deal.
    Ready,
    /// Five cards dealt, waiting for holds and draw.
    Dealt,
    /// The draw is complete with the final hand category.
    Complete(Category),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Ready => write!(f, "ready"),
            Stage::Dealt => write!(f, "dealt"),
            Stage::Complete(_) => write!(f, "complete"),
        }
    }
}

/// A single player video poker session.
#[derive(Debug)]
pub struct Game {
    deck: Deck,
    hand: Hand,
    stage: Stage,
    bet: u32,
    max_bet: u32,
    bankroll: Bankroll,
    rng: StdRng,
}

impl Game {
    /// Creates a new game.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a new game with the given rng.
    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            deck: Deck::new(),
            hand: Hand::default(),
            stage: Stage::Ready,
            bet: 1,
            max_bet: config.max_bet.clamp(1, Category::MAX_BET),
            bankroll: Bankroll::new(Credits::new(config.credits)),
            rng,
        }
    }

    /// The game stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The player hand.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The deck the hand has been dealt from.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The current bet.
    pub fn bet(&self) -> u32 {
        self.bet
    }

    /// The maximum bet.
    pub fn max_bet(&self) -> u32 {
        self.max_bet
    }

    /// The player credits and session totals.
    pub fn bankroll(&self) -> &Bankroll {
        &self.bankroll
    }

    /// The player credits.
    pub fn credits(&self) -> Credits {
        self.bankroll.credits()
    }

    /// The credits bet since the start of the session.
    pub fn total_bet(&self) -> Credits {
        self.bankroll.total_bet()
    }

    /// The credits won since the start of the session.
    pub fn total_won(&self) -> Credits {
        self.bankroll.total_won()
    }

    /// The payout of the last completed hand.
    pub fn last_win(&self) -> Credits {
        self.bankroll.last_win()
    }

    /// Sets the bet for the next deal, bets above the maximum bet are set to
    /// the maximum.
    pub fn set_bet(&mut self, bet: u32) -> Result<u32, Error> {
        self.check_not_dealt("bet")?;

        if bet == 0 {
            return Err(Error::InvalidBet(bet));
        }

        self.bet = bet.min(self.max_bet);
        Ok(self.bet)
    }

    /// Adds one credit to the bet, going back to one after the maximum bet.
    pub fn increment_bet(&mut self) -> Result<u32, Error> {
        let bet = if self.bet >= self.max_bet {
            1
        } else {
            self.bet + 1
        };

        self.set_bet(bet)
    }

    /// Sets the bet to the maximum bet.
    pub fn bet_max(&mut self) -> Result<u32, Error> {
        self.set_bet(self.max_bet)
    }

    /// Checks if a new hand can be dealt.
    pub fn can_deal(&self) -> bool {
        self.stage != Stage::Dealt && self.bankroll.can_bet(self.bet)
    }

    /// Takes the bet from the credits, shuffles the deck and deals a new hand.
    pub fn deal(&mut self) -> Result<&Hand, Error> {
        self.check_not_dealt("deal")?;
        self.bankroll.bet(self.bet)?;

        self.deck.shuffle_with(&mut self.rng);
        self.hand.clear();
        self.hand.draw_from(&mut self.deck)?;
        self.stage = Stage::Dealt;

        debug!(
            "Dealt {} bet {} credits {}",
            self.hand,
            self.bet,
            self.bankroll.credits()
        );

        Ok(&self.hand)
    }

    /// Toggles the held flag for a dealt card, returns the new flag.
    pub fn toggle_hold(&mut self, slot: usize) -> Result<bool, Error> {
        self.check_dealt("hold")?;
        Ok(self.hand.toggle_hold(slot)?)
    }

    /// Sets the held cards from a mask with bit n for slot n.
    pub fn set_hold_mask(&mut self, mask: u8) -> Result<(), Error> {
        self.check_dealt("hold")?;
        self.hand.set_hold_mask(mask);
        Ok(())
    }

    /// Replaces the cards that are not held and pays the hand.
    pub fn draw(&mut self) -> Result<Category, Error> {
        self.check_dealt("draw")?;

        self.hand.draw_from(&mut self.deck)?;

        let category = self.hand.evaluate();
        self.bankroll.win(category.payout(self.bet));
        self.stage = Stage::Complete(category);

        debug!(
            "Drawn {} {category} paid {} credits {}",
            self.hand,
            self.bankroll.last_win(),
            self.bankroll.credits()
        );

        Ok(category)
    }

    fn check_dealt(&self, action: &'static str) -> Result<(), Error> {
        match self.stage {
            Stage::Dealt => Ok(()),
            stage => Err(Error::InvalidState { action, stage }),
        }
    }

    fn check_not_dealt(&self, action: &'static str) -> Result<(), Error> {
        match self.stage {
            Stage::Dealt => Err(Error::InvalidState {
                action,
                stage: self.stage,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(config: Config) -> Game {
        Game::with_rng(config, StdRng::seed_from_u64(101))
    }

    #[test]
    fn new_game_config() {
        let game = new_game(Config::default());
        assert_eq!(game.stage(), Stage::Ready);
        assert_eq!(game.credits(), Credits::new(1000));
        assert_eq!(game.bet(), 1);
        assert_eq!(game.max_bet(), 5);
        assert!(game.hand().is_empty());
        assert!(game.can_deal());

        let game = new_game(Config {
            credits: 10,
            max_bet: 100,
        });
        assert_eq!(game.max_bet(), Category::MAX_BET);
    }

    #[test]
    fn bets() {
        let mut game = new_game(Config::default());
        assert_eq!(game.set_bet(3), Ok(3));
        assert_eq!(game.set_bet(9), Ok(5));
        assert_eq!(game.set_bet(0), Err(Error::InvalidBet(0)));
        assert_eq!(game.bet(), 5);

        assert_eq!(game.increment_bet(), Ok(1));
        assert_eq!(game.increment_bet(), Ok(2));
        assert_eq!(game.bet_max(), Ok(5));

        let mut game = new_game(Config {
            credits: 10,
            max_bet: 2,
        });
        assert_eq!(game.set_bet(5), Ok(2));
        assert_eq!(game.increment_bet(), Ok(1));
    }

    #[test]
    fn deal_and_draw() {
        let mut game = new_game(Config::default());
        game.bet_max().unwrap();

        let hand = *game.deal().unwrap();
        assert_eq!(hand.len(), Hand::SIZE);
        assert_eq!(hand.cards(), &game.deck().cards()[..Hand::SIZE]);
        assert_eq!(game.stage(), Stage::Dealt);
        assert_eq!(game.credits(), Credits::new(995));
        assert_eq!(game.total_bet(), Credits::new(5));
        assert!(!game.can_deal());

        // No bets or deals until the draw.
        assert!(matches!(
            game.set_bet(1),
            Err(Error::InvalidState {
                action: "bet",
                stage: Stage::Dealt
            })
        ));
        assert!(game.deal().is_err());

        // Hold all but the first card.
        game.set_hold_mask(0b11110).unwrap();
        assert_eq!(game.toggle_hold(0), Ok(true));
        assert_eq!(game.toggle_hold(0), Ok(false));
        assert!(game.toggle_hold(5).is_err());

        let category = game.draw().unwrap();
        assert_eq!(game.stage(), Stage::Complete(category));
        assert_eq!(category, game.hand().evaluate());
        assert_eq!(game.hand().cards()[1..], hand.cards()[1..]);
        assert_eq!(game.hand().get(0).unwrap(), Some(game.deck()[5]));

        let payout = Credits::new(category.payout(5));
        assert_eq!(game.last_win(), payout);
        assert_eq!(game.total_won(), payout);
        assert_eq!(game.credits(), Credits::new(995) + payout);

        // Draw only once.
        assert!(game.draw().is_err());
        assert!(game.can_deal());
        game.deal().unwrap();
        assert_eq!(game.total_bet(), Credits::new(10));
        assert_eq!(game.last_win(), Credits::ZERO);
    }

    #[test]
    fn hold_before_deal() {
        let mut game = new_game(Config::default());
        let err = game.toggle_hold(0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState {
                action: "hold",
                stage: Stage::Ready
            }
        );
        assert_eq!(err.to_string(), "cannot hold when the game is ready");
        assert!(game.draw().is_err());
    }

    #[test]
    fn insufficient_credits() {
        let mut game = new_game(Config {
            credits: 3,
            max_bet: 5,
        });

        game.bet_max().unwrap();
        assert!(!game.can_deal());
        assert_eq!(
            game.deal().unwrap_err(),
            Error::InsufficientCredits {
                credits: Credits::new(3),
                bet: 5
            }
        );

        game.set_bet(3).unwrap();
        game.deal().unwrap();
        assert_eq!(game.credits(), Credits::ZERO);
    }

    #[test]
    fn seeded_games() {
        let mut g1 = new_game(Config::default());
        let mut g2 = new_game(Config::default());
        for _ in 0..10 {
            assert_eq!(g1.deal().unwrap(), g2.deal().unwrap());
            assert_eq!(g1.draw().unwrap(), g2.draw().unwrap());
        }

        assert_eq!(g1.credits(), g2.credits());
    }
}
