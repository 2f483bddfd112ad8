//! Win/draw detection and game history

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Cell, Player};
use crate::value_table::Reward;

/// Check whether `player` owns any of the eight winning lines.
pub fn has_won(state: &BoardState, player: Player) -> bool {
    state.has_won(player)
}

/// Same as [`has_won`] for an untyped player identity.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidPlayer`] when `player` is neither `X` nor
/// `O`. Callers should abandon the current game rather than record anything.
pub fn has_won_str(state: &BoardState, player: &str) -> Result<bool, crate::Error> {
    let player: Player = player.parse()?;
    Ok(state.has_won(player))
}

/// Board full and nobody has three in a row.
pub fn is_draw(state: &BoardState) -> bool {
    state.is_draw()
}

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub cell: Cell,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a finished board, `None` while the game is still open
    pub fn detect(state: &BoardState) -> Option<GameOutcome> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_draw() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Terminal reward as seen by `player`
    pub fn reward_for(self, player: Player) -> Reward {
        match self {
            GameOutcome::Win(winner) if winner == player => Reward::Win,
            GameOutcome::Win(_) => Reward::Loss,
            GameOutcome::Draw => Reward::Draw,
        }
    }
}

/// A game with its move history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    first_player: Player,
    state: BoardState,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Start an empty board with `first_player` to move
    pub fn new(first_player: Player) -> Self {
        Game {
            first_player,
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Player whose turn it is
    pub fn to_move(&self) -> Player {
        if self.moves.len().is_multiple_of(2) {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Play a move for the player to move
    pub fn play(&mut self, cell: Cell) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.to_move();
        self.state = self.state.place(cell, player)?;
        self.moves.push(Move { cell, player });
        self.outcome = GameOutcome::detect(&self.state);

        Ok(self.outcome)
    }
}
