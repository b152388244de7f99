//! JSON-lines placement protocol.
//!
//! The host sends one JSON object per line on stdin and the engine answers on
//! stdout:
//!
//! - `{"event":"game:new_piece","piece":[a,b,c]}` is answered with
//!   `{"event":"game:place_piece","x":col,"y":row}` after the reply delay.
//! - `{"event":"game:new_game"}` resets the board and the score cache; it has
//!   no reply.
//!
//! Anything the engine cannot act on gets an `{"event":"error","message":..}`
//! reply and the loop keeps reading.
//!
//! ## Example
//!
//! ```ignore
//! use tristack::config::EngineConfig;
//! use tristack::protocol::Session;
//!
//! let config = EngineConfig::default();
//! let mut session = Session::new(&config);
//! session.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::piece::Piece;
use crate::player::Player;

/// Events the host sends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event")]
pub enum Request {
    #[serde(rename = "game:new_piece")]
    NewPiece { piece: Vec<i64> },
    #[serde(rename = "game:new_game")]
    NewGame,
}

/// Events the engine sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum Reply {
    #[serde(rename = "game:place_piece")]
    PlacePiece { x: usize, y: usize },
    #[serde(rename = "error")]
    Error { message: String },
}

impl Reply {
    fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            message: message.into(),
        }
    }
}

/// One engine session bound to the placement channel.
pub struct Session {
    player: Player,
    delay: Duration,
}

impl Session {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_player(Player::from_config(config), config.reply_delay())
    }

    pub fn with_player(player: Player, delay: Duration) -> Self {
        Self { player, delay }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Serve stdin/stdout until the host closes its end.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve any line source and sink until the input ends.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read from the host")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(reply) = self.execute(line) else {
                continue;
            };
            if matches!(reply, Reply::PlacePiece { .. }) && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            let text = serde_json::to_string(&reply).context("failed to encode reply")?;
            writeln!(output, "{text}").context("failed to write to the host")?;
            output.flush().context("failed to flush output")?;
        }
        debug!("input closed, session over");
        Ok(())
    }

    /// Handle one line and return the reply to send, if any.
    pub fn execute(&mut self, line: &str) -> Option<Reply> {
        let request = match serde_json::from_str::<Request>(line) {
            Ok(request) => request,
            Err(err) => {
                warn!(%err, line, "unreadable request");
                return Some(Reply::error(format!("invalid request: {err}")));
            }
        };

        match request {
            Request::NewGame => {
                debug!("new game");
                self.player.new_game();
                None
            }
            Request::NewPiece { piece } => {
                let piece = match Piece::try_from(piece.as_slice()) {
                    Ok(piece) => piece,
                    Err(err) => return Some(Reply::error(err.to_string())),
                };
                match self.player.respond(piece) {
                    Ok(pos) => Some(Reply::PlacePiece {
                        x: pos.col,
                        y: pos.row,
                    }),
                    Err(err) => {
                        warn!(%err, %piece, "cannot place piece");
                        Some(Reply::error(err.to_string()))
                    }
                }
            }
        }
    }
}
