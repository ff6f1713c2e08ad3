//! Output formatting for CLI

use crate::game::Game;

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

/// Format a count together with its share of `total`, e.g. `12 (40.0%)`
pub fn format_share(count: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    };
    format!("{} ({percent:.1}%)", format_number(count))
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// The board as text with `H` and `C` marking the two agents (`B` when they
/// share a cell).
pub fn render_board(game: &Game) -> String {
    let board = game.board();
    let human = game.human().position();
    let computer = game.computer().position();
    let mut out = String::new();
    for (row, line) in board.snapshot().cells.iter().enumerate() {
        for (col, cell) in line.iter().enumerate() {
            let pos = crate::maze::Position::new(row as i32, col as i32);
            let c = match (pos == human, pos == computer) {
                (true, true) => 'B',
                (true, false) => 'H',
                (false, true) => 'C',
                (false, false) => cell.to_char(),
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
