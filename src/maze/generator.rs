//! Random board generation

use rand::{Rng, seq::SliceRandom};

use super::board::{Board, CellKind, Side};
use crate::config::GameConfig;

/// Generate a fresh board for a new game.
///
/// Walls, then gems, then traps are scattered over empty cells. The two start
/// corners stay empty and are marked visited for their owners.
pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Board {
    let size = config.grid_size;
    let mut board = Board::new(size).with_trap_rule(config.trap_rule);
    let starts = [
        Side::Human.start_position(size),
        Side::Computer.start_position(size),
    ];

    for (kind, count) in [
        (CellKind::Wall, config.wall_count),
        (CellKind::Gem, config.gem_count),
        (CellKind::Trap, config.trap_count),
    ] {
        let mut candidates: Vec<_> = board
            .positions_of(CellKind::Empty)
            .into_iter()
            .filter(|pos| !starts.contains(pos))
            .collect();
        candidates.shuffle(rng);
        for pos in candidates.into_iter().take(count) {
            board.set_cell(pos, kind);
        }
    }

    for side in [Side::Human, Side::Computer] {
        board.mark_visited(side, side.start_position(size));
    }

    log::debug!(
        "generated {size}x{size} board with {} gems",
        board.gem_count()
    );
    board
}
