//! Machine-versus-machine training games.
//!
//! Both sides draw from the same table. `O` always opens, and each mover
//! sees the board from its own perspective. Only the last mover's decision
//! is credited; the sweep then reaches that side's earlier decisions.

use log::debug;
use serde::Serialize;

use super::session::Session;
use crate::{
    Result,
    tictactoe::{BoardState, Game, GameOutcome, Move, Player},
    value_table::BackupReport,
};

/// Side that opens every self-play game
pub const SELF_PLAY_FIRST: Player = Player::O;

/// Record of one finished self-play game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfPlayGame {
    pub first_player: Player,
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
    pub final_state: BoardState,
    pub backup: BackupReport,
}

impl SelfPlayGame {
    /// Player who made the final move
    pub fn last_mover(&self) -> Player {
        self.moves
            .last()
            .map(|m| m.player)
            .unwrap_or(self.first_player)
    }
}

/// Tally of self-play outcomes by winner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl SelfPlaySummary {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.draws as f64 / self.games as f64
        }
    }
}

impl Session {
    /// Play one game against itself, learn from it and save the table.
    pub fn play_self_game(&mut self) -> Result<SelfPlayGame> {
        self.reset_pending();
        let mut game = Game::new(SELF_PLAY_FIRST);

        let outcome = loop {
            let mover = game.to_move();
            let cell = self.select_action(game.state(), mover)?;
            if let Some(outcome) = game.play(cell)? {
                break outcome;
            }
        };

        let last_mover = game.to_move().opponent();
        let backup = self.finish_game(outcome.reward_for(last_mover))?;
        debug!(
            "self-play game finished after {} moves: {outcome:?}",
            game.moves().len()
        );

        Ok(SelfPlayGame {
            first_player: game.first_player(),
            moves: game.moves().to_vec(),
            outcome,
            final_state: *game.state(),
            backup,
        })
    }

    /// Play `games` self-play games, calling `on_game` after each.
    pub fn run_self_play<F>(&mut self, games: usize, mut on_game: F) -> Result<SelfPlaySummary>
    where
        F: FnMut(&SelfPlayGame),
    {
        let mut summary = SelfPlaySummary::default();
        for _ in 0..games {
            let game = self.play_self_game()?;
            summary.record(game.outcome);
            on_game(&game);
        }
        Ok(summary)
    }
}
