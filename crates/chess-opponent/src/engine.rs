//! UCI engine subprocess wrapper.
//!
//! Spawns a UCI-compatible engine (Stockfish by default), performs the
//! protocol handshake, limits the engine's playing strength, and asks it
//! for a best move for the current game. Engine output is pumped by a
//! dedicated reader thread into a channel so every wait carries a
//! deadline; a wedged engine surfaces as a [`OpponentError::Timeout`]
//! instead of a hang.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use chess_model::Move;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::OpponentConfig;

/// Errors that can occur when working with the engine subprocess.
#[derive(Error, Debug)]
pub enum OpponentError {
    /// Failed to spawn or talk to the engine process.
    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Engine executable was not found at the specified path.
    #[error("engine not found at path: {0}")]
    NotFound(String),
    /// Engine failed the UCI initialization handshake.
    #[error("engine initialization failed")]
    InitFailed,
    /// Engine did not respond within the deadline.
    #[error("engine did not respond within {0:?}")]
    Timeout(Duration),
    /// Engine closed its output stream.
    #[error("engine closed unexpectedly")]
    Closed,
    /// Engine returned an invalid or unexpected response.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}

/// Wrapper for a UCI-compatible engine used as the game opponent.
///
/// The engine tracks the game as the move list sent with each `position`
/// command; [`record_move`](Self::record_move) appends the human's moves
/// and [`best_move`](Self::best_move) appends the engine's own reply.
#[derive(Debug)]
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    /// Engine output, one line per message, fed by the reader thread.
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
    /// Moves played so far, in wire notation.
    moves: Vec<String>,
    depth: u32,
    response_timeout: Duration,
}

impl UciEngine {
    /// Spawns the engine and performs the UCI handshake: `uci`/`uciok`,
    /// strength limiting options, then `isready`/`readyok`.
    ///
    /// # Errors
    ///
    /// - [`OpponentError::NotFound`] if the configured path does not exist
    /// - [`OpponentError::Io`] if the process fails to start
    /// - [`OpponentError::Timeout`] / [`OpponentError::Closed`] if the
    ///   handshake stalls
    pub fn spawn(config: &OpponentConfig) -> Result<Self, OpponentError> {
        let path = &config.engine_path;
        // a bare command name is resolved through PATH by the OS; only
        // explicit paths can be checked up front
        if path.contains(std::path::MAIN_SEPARATOR) && !std::path::Path::new(path).exists() {
            return Err(OpponentError::NotFound(path.clone()));
        }

        let mut process = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => OpponentError::NotFound(path.clone()),
                _ => OpponentError::Io(e),
            })?;

        let stdin = process.stdin.take().ok_or(OpponentError::InitFailed)?;
        let stdout = process.stdout.take().ok_or(OpponentError::InitFailed)?;

        let (tx, rx) = mpsc::channel();
        let reader = std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line.trim().to_string()).is_err() {
                    break;
                }
            }
        });

        let mut engine = UciEngine {
            process,
            stdin,
            lines: rx,
            reader: Some(reader),
            moves: Vec::new(),
            depth: config.depth,
            response_timeout: config.response_timeout(),
        };
        engine.init_uci(config)?;
        Ok(engine)
    }

    /// Runs the UCI handshake and configures playing strength.
    fn init_uci(&mut self, config: &OpponentConfig) -> Result<(), OpponentError> {
        self.send_command("uci")?;
        let mut name = String::new();
        loop {
            let line = self.wait_for_line()?;
            if let Some(id) = line.strip_prefix("id name ") {
                name = id.to_string();
            } else if line == "uciok" {
                break;
            }
        }

        self.send_command("setoption name UCI_LimitStrength value true")?;
        self.send_command(&format!("setoption name UCI_Elo value {}", config.elo))?;
        let threads = std::thread::available_parallelism()
            .map(|n| n.get() / 2)
            .unwrap_or(1)
            .max(1);
        self.send_command(&format!("setoption name Threads value {threads}"))?;
        self.ready_check()?;

        info!(engine = %name, elo = config.elo, depth = config.depth, "engine ready");
        Ok(())
    }

    /// Resets the engine for a fresh game from the starting position.
    pub fn new_game(&mut self) -> Result<(), OpponentError> {
        self.moves.clear();
        self.send_command("ucinewgame")?;
        self.ready_check()?;
        self.send_command("position startpos")?;
        Ok(())
    }

    /// Records a move played on the board so the engine sees it in the
    /// next `position` command.
    pub fn record_move(&mut self, mv: &Move) {
        self.moves.push(mv.to_wire());
    }

    /// Asks the engine for its move in the current game. The returned
    /// move is appended to the game record; promotion moves carry the
    /// promoted kind parsed from the wire suffix.
    ///
    /// # Errors
    ///
    /// [`OpponentError::Timeout`] when the engine takes longer than the
    /// configured deadline, [`OpponentError::InvalidResponse`] when its
    /// `bestmove` line does not parse.
    pub fn best_move(&mut self) -> Result<Move, OpponentError> {
        self.ready_check()?;
        if self.moves.is_empty() {
            self.send_command("position startpos")?;
        } else {
            self.send_command(&format!("position startpos moves {}", self.moves.join(" ")))?;
        }
        self.send_command(&format!("go depth {}", self.depth))?;

        let wire = loop {
            let line = self.wait_for_line()?;
            if let Some(rest) = line.strip_prefix("bestmove ") {
                match rest.split_whitespace().next() {
                    Some(mv) => break mv.to_string(),
                    None => return Err(OpponentError::InvalidResponse(line)),
                }
            }
        };

        let mv = Move::from_wire(&wire)
            .map_err(|e| OpponentError::InvalidResponse(e.to_string()))?;
        debug!(%wire, "engine move");
        self.moves.push(wire);
        Ok(mv)
    }

    /// Sends `isready` and waits for `readyok`.
    fn ready_check(&mut self) -> Result<(), OpponentError> {
        self.send_command("isready")?;
        loop {
            if self.wait_for_line()? == "readyok" {
                return Ok(());
            }
        }
    }

    fn send_command(&mut self, command: &str) -> Result<(), OpponentError> {
        debug!(%command, "to engine");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Receives the next output line, bounded by the response timeout.
    fn wait_for_line(&mut self) -> Result<String, OpponentError> {
        match self.lines.recv_timeout(self.response_timeout) {
            Ok(line) => Ok(line),
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout = ?self.response_timeout, "engine response timed out");
                Err(OpponentError::Timeout(self.response_timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(OpponentError::Closed),
        }
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send_command("quit");
        let _ = self.process.wait();
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}
