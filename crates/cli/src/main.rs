// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jacks video poker CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use std::{thread, time::Instant};
use tokio::sync::mpsc;

use jacks_core::{
    Card, Category, Config, Deck, EvCalculator, EvState, Game, Hand, rank_holds,
};

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints the expected value of the best holds for a dealt hand.
    Advise {
        /// The dealt cards, for example "4D KD 5H KH JS".
        #[clap(long)]
        hand: String,
        /// The bet.
        #[clap(long, short, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=5))]
        bet: u32,
        /// Number of holds to print.
        #[clap(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=32))]
        top: u8,
        /// Number of parallel tasks.
        #[clap(long, default_value_t = default_tasks())]
        tasks: usize,
    },
    /// Computes the expected value of holding some of the dealt cards.
    Ev {
        /// The dealt cards, for example "TD JD QD KD 2C".
        #[clap(long)]
        hand: String,
        /// The held cards, for example "TD JD QD KD".
        #[clap(long, default_value = "")]
        hold: String,
        /// The bet.
        #[clap(long, short, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=5))]
        bet: u32,
    },
    /// Plays hands holding the cards with the best expected value.
    Play {
        /// Number of hands to play.
        #[clap(long, short, default_value_t = 10)]
        rounds: u32,
        /// The bet.
        #[clap(long, short, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=5))]
        bet: u32,
        /// The starting credits.
        #[clap(long, short, default_value_t = Config::default().credits)]
        credits: u32,
        /// Seed for the deck shuffles.
        #[clap(long, short)]
        seed: Option<u64>,
        /// Number of parallel tasks.
        #[clap(long, default_value_t = default_tasks())]
        tasks: usize,
    },
}

fn default_tasks() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Advise {
            hand,
            bet,
            top,
            tasks,
        } => tokio::task::spawn_blocking(move || advise(&hand, bet, top as usize, tasks))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|res| res),
        Command::Ev { hand, hold, bet } => ev(&hand, &hold, bet).await,
        Command::Play {
            rounds,
            bet,
            credits,
            seed,
            tasks,
        } => {
            let config = Config {
                credits,
                max_bet: Category::MAX_BET,
            };

            tokio::task::spawn_blocking(move || play(config, rounds, bet, seed, tasks))
                .await
                .map_err(anyhow::Error::from)
                .and_then(|res| res)
        }
    };

    if let Err(e) = res {
        error!("{e}");
    }
}

/// Parses five dealt cards and stacks them on top of the deck.
fn dealt_hand(s: &str) -> Result<(Hand, Deck)> {
    let cards = Card::parse_list(s)?;
    if cards.len() != Hand::SIZE {
        bail!("A hand has {} cards, got {}", Hand::SIZE, cards.len());
    }

    let deck = Deck::with_top(&cards)?;
    let hand = Hand::from_cards(&cards)?;
    Ok((hand, deck))
}

/// Parses the held cards checking they are in the hand.
fn held_cards(hand: &Hand, s: &str) -> Result<Vec<Card>> {
    let held = Card::parse_list(s)?;
    let dealt = hand.card_set();

    for card in &held {
        if !dealt.contains(*card) {
            bail!("Held card {card} is not in the hand {hand}");
        }
    }

    // Held cards keep the dealt order.
    Ok(hand
        .cards()
        .into_iter()
        .filter(|c| held.contains(c))
        .collect())
}

fn advise(hand: &str, bet: u32, top: usize, tasks: usize) -> Result<()> {
    let (hand, deck) = dealt_hand(hand)?;

    let now = Instant::now();
    let advice = rank_holds(&hand, &deck, bet, tasks)?;
    info!("Ranked holds in {:?}", now.elapsed());

    println!("Hand: {hand}  {}  bet {bet}\n", hand.evaluate());
    println!("{:>10}  Hold", "EV");
    for advice in advice.iter().take(top) {
        println!("{:>10.4}  {}", advice.ev, format_cards(&advice.held));
    }

    Ok(())
}

async fn ev(hand: &str, hold: &str, bet: u32) -> Result<()> {
    let (hand, deck) = dealt_hand(hand)?;
    let held = held_cards(&hand, hold)?;

    let (states_tx, mut states_rx) = mpsc::channel(16);
    let calculator = EvCalculator::new(states_tx);
    calculator.calculate(&held, &deck, bet).await?;

    while let Some(state) = states_rx.recv().await {
        match state {
            EvState::Complete(ev) => {
                println!("Hand: {hand}  hold: {}  bet {bet}", format_cards(&held));
                println!("EV: {ev:.4}");
                return Ok(());
            }
            EvState::Ready => bail!("Calculation stopped without a value"),
            state => info!("Calculator {state:?}"),
        }
    }

    Err(anyhow!("Calculator stopped"))
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        "none".to_string()
    } else {
        cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn play(config: Config, rounds: u32, bet: u32, seed: Option<u64>, tasks: usize) -> Result<()> {
    let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut game = Game::with_rng(config, rng);
    game.set_bet(bet)?;

    let mut counts = [0u32; Category::COUNT];
    let mut played = 0;

    for round in 1..=rounds {
        if !game.can_deal() {
            info!("Not enough credits for bet {}", game.bet());
            break;
        }

        let dealt = *game.deal()?;
        let advice = rank_holds(&dealt, game.deck(), game.bet(), tasks)?;
        let best = advice
            .first()
            .ok_or_else(|| anyhow!("No hold advice for {dealt}"))?;

        game.set_hold_mask(best.mask)?;
        let category = game.draw()?;
        counts[category as usize] += 1;
        played += 1;

        println!(
            "{round:>5}  {dealt}  ->  {}  {:<16}{:>6}  ev {:.3}",
            game.hand(),
            category.to_string(),
            game.last_win().to_string(),
            best.ev
        );
    }

    let bankroll = game.bankroll();
    let payback = bankroll.payback().unwrap_or_default();

    println!("\nHands:     {played}");
    for category in Category::winning() {
        let count = counts[category as usize];
        if count > 0 {
            let name = format!("{category}:");
            println!("{name:<17}{count}");
        }
    }

    println!("\nBet:       {}", bankroll.total_bet());
    println!("Won:       {}", bankroll.total_won());
    println!("Payback:   {payback:.2}%");
    println!("Credits:   {}", bankroll.credits());

    Ok(())
}
