//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::types::{Ply, SerializedState};

/// Side whose decisions the value table records.
///
/// Boards are relabelled so the acting side always plays this mark before
/// they are looked up or stored.
pub const ACTING_PLAYER: Player = Player::O;

/// One of the nine board positions, named by row and column.
///
/// Rows are upper/center/lower, columns left/middle/right. The declaration
/// order is the canonical row-major ordering used for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "ul")]
    UpperLeft,
    #[serde(rename = "um")]
    UpperMiddle,
    #[serde(rename = "ur")]
    UpperRight,
    #[serde(rename = "cl")]
    CenterLeft,
    #[serde(rename = "cm")]
    CenterMiddle,
    #[serde(rename = "cr")]
    CenterRight,
    #[serde(rename = "ll")]
    LowerLeft,
    #[serde(rename = "lm")]
    LowerMiddle,
    #[serde(rename = "lr")]
    LowerRight,
}

impl Cell {
    /// All cells in canonical order.
    pub const ALL: [Cell; 9] = [
        Cell::UpperLeft,
        Cell::UpperMiddle,
        Cell::UpperRight,
        Cell::CenterLeft,
        Cell::CenterMiddle,
        Cell::CenterRight,
        Cell::LowerLeft,
        Cell::LowerMiddle,
        Cell::LowerRight,
    ];

    /// Row-major index (0-8)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Cell> {
        Self::ALL.get(index).copied()
    }

    /// Two-letter identifier, also the action name in the persisted table
    pub fn id(self) -> &'static str {
        match self {
            Cell::UpperLeft => "ul",
            Cell::UpperMiddle => "um",
            Cell::UpperRight => "ur",
            Cell::CenterLeft => "cl",
            Cell::CenterMiddle => "cm",
            Cell::CenterRight => "cr",
            Cell::LowerLeft => "ll",
            Cell::LowerMiddle => "lm",
            Cell::LowerRight => "lr",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Cell::UpperLeft => "Upper Left",
            Cell::UpperMiddle => "Upper Middle",
            Cell::UpperRight => "Upper Right",
            Cell::CenterLeft => "Center Left",
            Cell::CenterMiddle => "Center Middle",
            Cell::CenterRight => "Center Right",
            Cell::LowerLeft => "Lower Left",
            Cell::LowerMiddle => "Lower Middle",
            Cell::LowerRight => "Lower Right",
        }
    }
}

impl FromStr for Cell {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Cell::ALL
            .into_iter()
            .find(|cell| cell.id() == needle)
            .ok_or_else(|| crate::Error::UnknownCell {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Contents of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn to_char(self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            '-' => Some(Mark::Empty),
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    fn swapped(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn to_mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayer {
                player: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mark().to_char())
    }
}

/// Contents of all nine cells.
///
/// The ply index is derived from the number of occupied cells, so the board
/// carries no separate turn marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    marks: [Mark; 9],
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self::from_marks([Mark::Empty; 9])
    }

    pub fn from_marks(marks: [Mark; 9]) -> Self {
        BoardState { marks }
    }

    pub fn marks(&self) -> &[Mark; 9] {
        &self.marks
    }

    pub fn get(&self, cell: Cell) -> Mark {
        self.marks[cell.index()]
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Mark::Empty
    }

    /// Empty cells in canonical order
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .into_iter()
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m != Mark::Empty).count()
    }

    /// Number of moves played so far
    pub fn ply(&self) -> Ply {
        Ply::new(self.occupied_count()).unwrap_or(Ply::MAX)
    }

    /// Place a player's mark on an empty cell of a live game.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] when the board already has a winner
    /// or is full, and [`crate::Error::CellOccupied`] when the cell is taken.
    #[must_use = "place returns a new board state; the original is unchanged"]
    pub fn place(&self, cell: Cell, player: Player) -> Result<BoardState, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if !self.is_empty(cell) {
            return Err(crate::Error::CellOccupied {
                cell: cell.to_string(),
            });
        }
        Ok(self.with_mark(cell, player.to_mark()))
    }

    /// Overwrite a cell without any legality checks (used for look-ahead)
    pub(crate) fn with_mark(&self, cell: Cell, mark: Mark) -> BoardState {
        let mut next = *self;
        next.marks[cell.index()] = mark;
        next
    }

    /// Swap X and O marks on every cell.
    #[must_use = "swap_marks returns a new board state; the original is unchanged"]
    pub fn swap_marks(&self) -> Self {
        let mut swapped = *self;
        for mark in &mut swapped.marks {
            *mark = mark.swapped();
        }
        swapped
    }

    /// Relabel the board so `mover` is written as [`ACTING_PLAYER`].
    ///
    /// The value table only ever sees boards in this form.
    ///
    /// # Examples
    ///
    /// ```
    /// use qtictactoe::tictactoe::{BoardState, Cell, Mark, Player};
    ///
    /// let board = BoardState::new().place(Cell::CenterMiddle, Player::O).unwrap();
    /// let seen_by_x = board.from_perspective(Player::X);
    /// assert_eq!(seen_by_x.get(Cell::CenterMiddle), Mark::X);
    /// assert_eq!(board.from_perspective(Player::O), board);
    /// ```
    #[must_use = "from_perspective returns a new board state; the original is unchanged"]
    pub fn from_perspective(&self, mover: Player) -> Self {
        if mover == ACTING_PLAYER {
            *self
        } else {
            self.swap_marks()
        }
    }

    /// Table key for this board
    pub fn serialize(&self) -> SerializedState {
        SerializedState::from_marks(&self.marks)
    }

    pub fn has_won(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.marks, player)
    }

    /// Every cell is filled and nobody has a line
    pub fn is_draw(&self) -> bool {
        !self.marks.contains(&Mark::Empty) && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.marks.contains(&Mark::Empty)
    }

    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &mark) in self.marks.iter().enumerate() {
            write!(f, "{}", mark.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
