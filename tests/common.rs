//! Common test utilities for the maze duel test suite.

use maze_duel::{
    agent::Agent,
    config::PolicyConfig,
    maze::{Board, Direction, Position, Side},
};

/// Parse a layout that is known to be valid.
pub fn board(layout: &str) -> Board {
    Board::parse(layout).expect("test layout should parse")
}

/// An empty board with a single gem.
pub fn single_gem_board(size: usize, gem: Position) -> Board {
    let mut rows = vec![vec!['.'; size]; size];
    rows[gem.row as usize][gem.col as usize] = '*';
    let layout: Vec<String> = rows.into_iter().map(String::from_iter).collect();
    board(&layout.join("\n"))
}

/// Policy that never explores.
pub fn greedy_policy() -> PolicyConfig {
    PolicyConfig::default().with_exploration_rate(0.0)
}

pub fn computer_at(row: i32, col: i32, tokens: u32) -> Agent {
    Agent::new(Side::Computer, Position::new(row, col), tokens)
}

/// First step of a rows-then-columns walk from `from` to `to`.
pub fn step_towards(from: Position, to: Position) -> Option<Direction> {
    let (dr, dc) = from.signum_towards(to);
    if dr != 0 {
        Direction::from_delta(i32::from(dr), 0)
    } else {
        Direction::from_delta(0, i32::from(dc))
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
