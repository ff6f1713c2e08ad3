//! Heuristic seed values for unseen state-action pairs

use crate::{
    agent::{Action, Agent},
    maze::{Board, CellKind},
};

use super::state::MazeState;

/// Teleport destinations within this distance of a gem earn a bonus
const TELEPORT_GEM_RADIUS: u32 = 2;

/// Prior estimate for taking `action` in `state`, before any learning.
///
/// Moves are favoured towards the nearest gem and onto gems, and discouraged
/// onto visited cells and traps. Walls are mildly discouraged. Removing a trap
/// is only worth something while one is in reach. Teleports earn `8 - d` for
/// every gem within distance 2 of the destination.
///
/// `agent` and `board` must be the ones `state` was observed from. No jitter
/// is added here.
pub fn heuristic_value(state: &MazeState, action: Action, agent: &Agent, board: &Board) -> f64 {
    match action {
        Action::Move(direction) => {
            let mut value = 0.0;
            let (dr, dc) = direction.delta();
            let (gr, gc) = state.gem_direction;
            if (dr, dc) == (i32::from(gr), i32::from(gc)) {
                value += 5.0;
            }
            let destination = agent.position().step(direction);
            if agent.has_visited(destination) {
                value -= 2.0;
            }
            match board.cell(destination) {
                Some(CellKind::Gem) => value += 10.0,
                Some(CellKind::Trap) => value -= 3.0,
                _ => {}
            }
            value
        }
        Action::PlaceWall(_) => -1.0,
        Action::RemoveTrap => {
            if agent.removable_trap(board).is_some() {
                7.0
            } else {
                0.0
            }
        }
        // Sums over every nearby gem, not only the nearest one.
        Action::Teleport(target) => board
            .gems()
            .map(|gem| gem.manhattan(target))
            .filter(|distance| *distance <= TELEPORT_GEM_RADIUS)
            .map(|distance| 8.0 - f64::from(distance))
            .sum(),
        Action::Stay => 0.0,
    }
}
