//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Mark, Player};

/// The eight triples that win the game
pub const WINNING_LINES: [[Cell; 3]; 8] = [
    [Cell::UpperLeft, Cell::UpperMiddle, Cell::UpperRight],
    [Cell::CenterLeft, Cell::CenterMiddle, Cell::CenterRight],
    [Cell::LowerLeft, Cell::LowerMiddle, Cell::LowerRight], // rows
    [Cell::UpperLeft, Cell::CenterLeft, Cell::LowerLeft],
    [Cell::UpperMiddle, Cell::CenterMiddle, Cell::LowerMiddle],
    [Cell::UpperRight, Cell::CenterRight, Cell::LowerRight], // columns
    [Cell::UpperLeft, Cell::CenterMiddle, Cell::LowerRight],
    [Cell::UpperRight, Cell::CenterMiddle, Cell::LowerLeft], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(marks: &[Mark; 9], player: Player) -> bool {
        Self::winning_line(marks, player).is_some()
    }

    /// First line completely owned by the player, if any
    pub fn winning_line(marks: &[Mark; 9], player: Player) -> Option<[Cell; 3]> {
        let target = player.to_mark();
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|cell| marks[cell.index()] == target))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks_with(cells: &[Cell], mark: Mark) -> [Mark; 9] {
        let mut marks = [Mark::Empty; 9];
        for cell in cells {
            marks[cell.index()] = mark;
        }
        marks
    }

    #[test]
    fn test_has_won_horizontal() {
        let marks = marks_with(
            &[Cell::UpperLeft, Cell::UpperMiddle, Cell::UpperRight],
            Mark::X,
        );

        assert!(LineAnalyzer::has_won(&marks, Player::X));
        assert!(!LineAnalyzer::has_won(&marks, Player::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let marks = marks_with(
            &[Cell::UpperRight, Cell::CenterRight, Cell::LowerRight],
            Mark::O,
        );

        assert!(LineAnalyzer::has_won(&marks, Player::O));
        assert!(!LineAnalyzer::has_won(&marks, Player::X));
    }

    #[test]
    fn test_has_won_diagonal() {
        let marks = marks_with(
            &[Cell::UpperRight, Cell::CenterMiddle, Cell::LowerLeft],
            Mark::X,
        );

        assert_eq!(
            LineAnalyzer::winning_line(&marks, Player::X),
            Some([Cell::UpperRight, Cell::CenterMiddle, Cell::LowerLeft])
        );
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let marks = marks_with(&[Cell::CenterLeft, Cell::CenterMiddle], Mark::O);

        assert!(!LineAnalyzer::has_won(&marks, Player::O));
        assert_eq!(LineAnalyzer::winning_line(&marks, Player::O), None);
    }
}
