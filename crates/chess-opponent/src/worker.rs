//! Background thinking worker.
//!
//! The engine is slow relative to a UI frame, so move requests run on a
//! dedicated thread. The caller hands over the move just played, keeps
//! polling without blocking, and eventually receives the engine's reply
//! or the error that ended the attempt.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use chess_model::Move;
use tracing::debug;

use crate::{OpponentConfig, OpponentError, UciEngine};

/// Result of polling the worker for the engine's move.
#[derive(Debug)]
pub enum ThinkPoll {
    /// No request is in flight.
    Idle,
    /// The engine is still thinking.
    Thinking,
    /// The engine chose this move.
    Ready(Move),
    /// The request failed; the opponent is unusable until respawned.
    Failed(OpponentError),
}

/// An engine opponent running on its own thread.
///
/// One request may be in flight at a time: [`begin_thinking`]
/// (Self::begin_thinking) submits the position, [`poll`](Self::poll)
/// checks for the reply. Dropping the opponent shuts the engine down.
pub struct EngineOpponent {
    requests: Option<Sender<Option<Move>>>,
    results: Receiver<Result<Move, OpponentError>>,
    worker: Option<JoinHandle<()>>,
    thinking: bool,
}

impl EngineOpponent {
    /// Spawns the engine, starts a fresh game, and hands the engine off
    /// to the worker thread.
    ///
    /// Spawn and handshake failures surface here, before any request is
    /// made.
    pub fn spawn(config: &OpponentConfig) -> Result<Self, OpponentError> {
        let mut engine = UciEngine::spawn(config)?;
        engine.new_game()?;

        let (request_tx, request_rx) = mpsc::channel::<Option<Move>>();
        let (result_tx, result_rx) = mpsc::channel();
        let worker = std::thread::spawn(move || {
            for previous in request_rx {
                if let Some(mv) = previous {
                    engine.record_move(&mv);
                }
                if result_tx.send(engine.best_move()).is_err() {
                    break;
                }
            }
        });

        Ok(EngineOpponent {
            requests: Some(request_tx),
            results: result_rx,
            worker: Some(worker),
            thinking: false,
        })
    }

    /// Submits a move request, passing along the move just played on the
    /// board (or `None` when the engine opens the game). Ignored while a
    /// request is already in flight.
    pub fn begin_thinking(&mut self, previous: Option<Move>) {
        if self.thinking {
            return;
        }
        let Some(requests) = &self.requests else {
            return;
        };
        debug!(previous = ?previous.map(|m| m.to_wire()), "requesting engine move");
        // a dead worker is detected on the next poll as Disconnected
        let _ = requests.send(previous);
        self.thinking = true;
    }

    /// Returns true while a request is in flight.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Checks for the engine's reply without blocking.
    pub fn poll(&mut self) -> ThinkPoll {
        if !self.thinking {
            return ThinkPoll::Idle;
        }
        match self.results.try_recv() {
            Ok(Ok(mv)) => {
                self.thinking = false;
                ThinkPoll::Ready(mv)
            }
            Ok(Err(e)) => {
                self.thinking = false;
                ThinkPoll::Failed(e)
            }
            Err(TryRecvError::Empty) => ThinkPoll::Thinking,
            Err(TryRecvError::Disconnected) => {
                self.thinking = false;
                ThinkPoll::Failed(OpponentError::Closed)
            }
        }
    }
}

impl Drop for EngineOpponent {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop, which drops
        // the engine and with it the subprocess
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
