//! Gem maze board model
//!
//! The board owns the grid of cell kinds, the set of remaining gems, and the
//! per-side visited grids. Everything that changes the maze goes through it.

pub mod board;
pub mod generator;
pub mod position;

pub use board::{Board, BoardSnapshot, CellKind, Side, TrapRule};
pub use generator::generate;
pub use position::{Direction, Position};
