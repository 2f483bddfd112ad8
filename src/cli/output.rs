//! Output formatting and progress bars for CLI

use std::fmt::Write as _;

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{BoardState, Cell};

/// Create a progress bar for self-play
pub fn create_self_play_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board as a grid, showing cell identifiers on empty squares
pub fn render_board(state: &BoardState) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .filter_map(|col| Cell::from_index(row * 3 + col))
            .map(|cell| match state.get(cell).to_player() {
                Some(player) => format!(" {player}"),
                None => cell.id().to_string(),
            })
            .collect();
        let _ = writeln!(out, " {} ", cells.join(" | "));
        if row < 2 {
            out.push_str("----+----+----\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(5478), "5,478");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_render_board_marks_and_ids() {
        let board = BoardState::new()
            .place(Cell::CenterMiddle, Player::X)
            .unwrap();
        let rendered = render_board(&board);
        assert!(rendered.contains("ul"));
        assert!(rendered.contains(" X"));
        assert!(!rendered.contains("cm"));
        assert_eq!(rendered.lines().count(), 5);
    }
}
