// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Background expected value calculator.
use anyhow::Result;
use log::{debug, error, info};
use parking_lot::Mutex;
use std::{sync::Arc, time::Instant};
use tokio::{sync::mpsc, task::JoinHandle};

use jacks_eval::{Card, Category, Deck, Hand};

use crate::{
    Error,
    ev::{CancelToken, cancellable_expected_value},
};

/// The calculator state.
///
/// A calculation goes from `Ready` to `Calculating` and then to `Complete`,
/// the completed value is kept until the next request that moves the state
/// straight to `Calculating`, or until [EvCalculator::cancel] moves it back to
/// `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EvState {
    /// No calculation is running.
    #[default]
    Ready,
    /// A calculation is running.
    Calculating,
    /// The running calculation has been cancelled and the calculator is
    /// waiting for it to stop.
    Cancelling,
    /// The last requested calculation completed with the given expected value.
    Complete(f64),
}

/// Computes expected values on a background task.
///
/// State changes are sent in order to the channel passed to [EvCalculator::new].
/// Only one calculation runs at a time, a request received while a calculation
/// is running cancels it and replaces any request waiting for it to stop, so
/// that only the most recent request completes.
#[derive(Debug)]
pub struct EvCalculator {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<Command>,
    /// The last state sent.
    state: Arc<Mutex<EvState>>,
}

/// Command for the calculator task.
#[derive(Debug)]
enum Command {
    /// Start a new calculation.
    Calculate(Request),
    /// Cancel the running calculation.
    Cancel,
}

/// A calculation request with its own copy of the hand and deck.
#[derive(Debug)]
struct Request {
    hand: Hand,
    deck: Deck,
    bet: u32,
}

impl EvCalculator {
    /// Creates a calculator that sends state changes to `states_tx`.
    ///
    /// Must be called from a tokio runtime, the calculator task stops when the
    /// calculator is dropped.
    pub fn new(states_tx: mpsc::Sender<EvState>) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(32);
        let (done_tx, done_rx) = mpsc::channel(8);
        let state = Arc::new(Mutex::new(EvState::Ready));

        let task = CalculatorTask {
            states_tx,
            state: state.clone(),
            done_tx,
            running: None,
            pending: None,
            next_id: 1,
        };

        tokio::spawn(async move {
            task.run(commands_rx, done_rx).await;
            debug!("Calculator task stopped");
        });

        Self { commands_tx, state }
    }

    /// Requests the expected value of holding `held` and drawing the rest
    /// from the deck positions `5..52` with the given bet.
    ///
    /// Returns an error if the bet is not in the `1..=5` range, if there are
    /// more than five held cards, or if the held cards are not distinct cards
    /// from the first five deck positions.
    pub async fn calculate(&self, held: &[Card], deck: &Deck, bet: u32) -> Result<()> {
        if !(1..=Category::MAX_BET).contains(&bet) {
            return Err(Error::InvalidBet(bet).into());
        }

        let hand = Hand::with_held(held)?;
        hand.check_held(deck)?;

        let request = Request {
            hand,
            deck: deck.clone(),
            bet,
        };

        self.commands_tx.send(Command::Calculate(request)).await?;
        Ok(())
    }

    /// Cancels the running calculation, a completed value is reset to ready.
    pub async fn cancel(&self) -> Result<()> {
        self.commands_tx.send(Command::Cancel).await?;
        Ok(())
    }

    /// The last state sent by the calculator.
    pub fn state(&self) -> EvState {
        *self.state.lock()
    }
}

/// A calculation running on the blocking pool.
struct Running {
    id: u64,
    token: CancelToken,
    started: Instant,
}

/// A calculation result sent back by the blocking task.
struct Outcome {
    id: u64,
    result: Result<Option<f64>>,
}

impl Outcome {
    /// Waits for a blocking calculation, a panic in the calculation is
    /// reported as an error.
    async fn join(id: u64, handle: JoinHandle<Result<Option<f64>, jacks_eval::Error>>) -> Self {
        let result = match handle.await {
            Ok(res) => res.map_err(anyhow::Error::from),
            Err(err) => Err(anyhow::Error::from(err)),
        };

        Self { id, result }
    }
}

struct CalculatorTask {
    /// Channel for sending state changes.
    states_tx: mpsc::Sender<EvState>,
    /// The state mirror shared with the calculator.
    state: Arc<Mutex<EvState>>,
    /// Channel for blocking tasks results.
    done_tx: mpsc::Sender<Outcome>,
    /// The running calculation.
    running: Option<Running>,
    /// The request waiting for the running calculation to stop.
    pending: Option<Request>,
    /// The id for the next calculation.
    next_id: u64,
}

impl CalculatorTask {
    async fn run(
        mut self,
        mut commands_rx: mpsc::Receiver<Command>,
        mut done_rx: mpsc::Receiver<Outcome>,
    ) {
        loop {
            tokio::select! {
                res = commands_rx.recv() => match res {
                    Some(Command::Calculate(request)) => self.calculate(request).await,
                    Some(Command::Cancel) => self.cancel().await,
                    None => break,
                },
                Some(outcome) = done_rx.recv() => self.finished(outcome).await,
            }
        }

        // Stop any calculation still running.
        if let Some(running) = &self.running {
            running.token.cancel();
        }
    }

    async fn calculate(&mut self, request: Request) {
        match &self.running {
            Some(running) => {
                // The newest request replaces the pending one.
                self.pending = Some(request);

                if !running.token.is_cancelled() {
                    info!("Cancelling EV calculation {}", running.id);
                    running.token.cancel();
                    self.set_state(EvState::Cancelling).await;
                }
            }
            None => self.start(request).await,
        }
    }

    async fn cancel(&mut self) {
        self.pending = None;

        match &self.running {
            Some(running) if !running.token.is_cancelled() => {
                info!("Cancelling EV calculation {}", running.id);
                running.token.cancel();
                self.set_state(EvState::Cancelling).await;
            }
            Some(_) => {}
            None => self.set_state(EvState::Ready).await,
        }
    }

    async fn start(&mut self, request: Request) {
        let id = self.next_id;
        self.next_id += 1;

        let token = CancelToken::new();
        self.running = Some(Running {
            id,
            token: token.clone(),
            started: Instant::now(),
        });

        info!(
            "Starting EV calculation {id} holding {} bet {}",
            request.hand, request.bet
        );
        self.set_state(EvState::Calculating).await;

        let handle = tokio::task::spawn_blocking(move || {
            cancellable_expected_value(&request.hand, &request.deck, request.bet, &token)
        });

        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let _ = done_tx.send(Outcome::join(id, handle).await).await;
        });
    }

    async fn finished(&mut self, outcome: Outcome) {
        let Some(running) = self.running.take() else {
            return;
        };

        debug_assert_eq!(running.id, outcome.id);

        // Results of a cancelled calculation are discarded even if the
        // calculation completed before noticing.
        if running.token.is_cancelled() {
            debug!(
                "EV calculation {} stopped after {:?}",
                running.id,
                running.started.elapsed()
            );

            match self.pending.take() {
                Some(request) => self.start(request).await,
                None => self.set_state(EvState::Ready).await,
            }

            return;
        }

        match outcome.result {
            Ok(Some(ev)) => {
                info!(
                    "EV calculation {} complete ev {ev:.4} in {:?}",
                    running.id,
                    running.started.elapsed()
                );
                self.set_state(EvState::Complete(ev)).await;
            }
            Ok(None) => self.set_state(EvState::Ready).await,
            Err(err) => {
                error!("EV calculation {} error {err}", running.id);
                self.set_state(EvState::Ready).await;
            }
        }
    }

    async fn set_state(&mut self, state: EvState) {
        *self.state.lock() = state;

        // The observer may have gone away.
        let _ = self.states_tx.send(state).await;
    }
}
