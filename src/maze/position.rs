//! Grid coordinates and orthogonal directions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Coordinates are signed so that a step off the edge is still representable;
/// the board decides whether a position is in bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `direction`
    pub fn step(self, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position::new(self.row + dr, self.col + dc)
    }

    /// Sum of absolute row and column differences
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Coarse direction towards `target`, each axis in {-1, 0, 1}
    pub fn signum_towards(self, target: Position) -> (i8, i8) {
        (
            (target.row - self.row).signum() as i8,
            (target.col - self.col).signum() as i8,
        )
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal unit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    /// All directions in the fixed order used for featurization and action
    /// enumeration.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// (Δrow, Δcol) for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
        }
    }

    pub fn from_delta(drow: i32, dcol: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.delta() == (drow, dcol))
    }

    /// Direction from `from` to an orthogonally adjacent `to`
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Direction::from_delta(to.row - from.row, to.col - from.col)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
        }
    }
}
