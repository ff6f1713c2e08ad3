//! State featurization for the learning agent

use serde::{Deserialize, Serialize};

use crate::{
    agent::Agent,
    maze::{Board, CellKind, Direction, Position},
};

/// What lies next to the agent in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighbor {
    Cell(CellKind),
    OutOfBounds,
}

/// The learning agent's view of the game.
///
/// Derived on demand from the board and the agent; identical inputs always
/// produce identical states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeState {
    pub position: Position,
    /// Neighbours in [`Direction::ALL`] order
    pub neighbors: [Neighbor; 4],
    /// Per-axis sign towards the nearest gem, (0, 0) when none remain
    pub gem_direction: (i8, i8),
    pub tokens: u32,
}

impl MazeState {
    pub fn observe(agent: &Agent, board: &Board) -> Self {
        let position = agent.position();
        let neighbors = Direction::ALL.map(|direction| {
            board
                .cell(position.step(direction))
                .map_or(Neighbor::OutOfBounds, Neighbor::Cell)
        });
        let gem_direction = board
            .nearest_gem(position)
            .map_or((0, 0), |gem| position.signum_towards(gem));

        Self {
            position,
            neighbors,
            gem_direction,
            tokens: agent.tokens(),
        }
    }
}
