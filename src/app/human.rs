//! Human-versus-machine game.
//!
//! The machine plays `O` and the human `X`. A coin flip decides who opens.
//! Whenever the human's move leaves the game open the machine answers at
//! once. When the game ends the machine's last decision is credited and the
//! table saved.

use serde::Serialize;

use super::session::Session;
use crate::{
    Result,
    error::Error,
    tictactoe::{BoardState, Cell, Game, GameOutcome, Player},
    value_table::BackupReport,
};

/// Mark played by the learning engine
pub const MACHINE: Player = Player::O;

/// Mark played by the person at the keyboard
pub const HUMAN: Player = Player::X;

/// Result of one human move
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnResult {
    /// The machine's answer, if the game was still open after the human move
    pub machine_move: Option<Cell>,
    /// Set once the game is over
    pub outcome: Option<GameOutcome>,
    /// Credit assignment summary for a finished game
    pub backup: Option<BackupReport>,
}

/// One interactive game against the session's table
#[derive(Debug, Clone)]
pub struct HumanGame {
    game: Game,
}

impl HumanGame {
    /// Start a game, flipping a coin for the first move.
    ///
    /// Returns the game and the machine's opening move when it starts.
    pub fn start(session: &mut Session) -> Result<(Self, Option<Cell>)> {
        let first = if session.coin_flip() { MACHINE } else { HUMAN };
        Self::start_with(session, first)
    }

    /// Start a game with a fixed first player.
    pub fn start_with(session: &mut Session, first: Player) -> Result<(Self, Option<Cell>)> {
        session.reset_pending();
        let mut game = HumanGame {
            game: Game::new(first),
        };
        let opening = if first == MACHINE {
            Some(game.machine_turn(session)?)
        } else {
            None
        };
        Ok((game, opening))
    }

    pub fn machine_started(&self) -> bool {
        self.game.first_player() == MACHINE
    }

    pub fn state(&self) -> &BoardState {
        self.game.state()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Play the human's move and, if the game goes on, the machine's reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] once the game has ended and
    /// [`Error::CellOccupied`] for a taken cell; neither changes the game.
    pub fn human_move(&mut self, session: &mut Session, cell: Cell) -> Result<TurnResult> {
        if self.game.is_over() {
            return Err(Error::GameOver);
        }

        if let Some(outcome) = self.game.play(cell)? {
            let backup = Self::credit(session, outcome)?;
            return Ok(TurnResult {
                machine_move: None,
                outcome: Some(outcome),
                backup: Some(backup),
            });
        }

        let reply = self.machine_turn(session)?;
        let outcome = self.game.outcome();
        let backup = match outcome {
            Some(outcome) => Some(Self::credit(session, outcome)?),
            None => None,
        };

        Ok(TurnResult {
            machine_move: Some(reply),
            outcome,
            backup,
        })
    }

    fn machine_turn(&mut self, session: &mut Session) -> Result<Cell> {
        let cell = session.select_action(self.game.state(), MACHINE)?;
        self.game.play(cell)?;
        Ok(cell)
    }

    fn credit(session: &mut Session, outcome: GameOutcome) -> Result<BackupReport> {
        session.finish_game(outcome.reward_for(MACHINE))
    }
}
