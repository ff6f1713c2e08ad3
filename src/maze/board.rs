//! Board state representation and mutation primitives

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::{Error, Result};

/// The category of a single grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Gem,
    Trap,
}

impl CellKind {
    pub fn to_char(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Gem => '*',
            CellKind::Trap => '^',
        }
    }

    pub fn from_char(c: char) -> Option<CellKind> {
        match c {
            '.' | ' ' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            '*' => Some(CellKind::Gem),
            '^' => Some(CellKind::Trap),
            _ => None,
        }
    }
}

/// Which side of the duel an agent plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// Starting corner on a board of side `size`: top-left for the human,
    /// bottom-right for the computer.
    pub fn start_position(self, size: usize) -> Position {
        match self {
            Side::Human => Position::new(0, 0),
            Side::Computer => {
                let last = size as i32 - 1;
                Position::new(last, last)
            }
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Computer => 1,
        }
    }
}

/// How stepping onto a trap is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrapRule {
    /// The move is legal; the mover is penalised after arriving.
    #[default]
    Penalize,
    /// Traps block movement until cleared with a token.
    Block,
}

/// The maze grid plus gem bookkeeping and visited grids.
///
/// A coordinate is in the gem set iff its cell kind is [`CellKind::Gem`].
/// All mutations keep that in sync within a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellKind>,
    gems: BTreeSet<Position>,
    visited: [Vec<bool>; 2],
    trap_rule: TrapRule,
}

/// Read-only copy of the grid and both visited grids, for drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub cells: Vec<Vec<CellKind>>,
    pub visited_human: Vec<Vec<bool>>,
    pub visited_computer: Vec<Vec<bool>>,
}

impl Board {
    /// Create an all-empty board of side `size` with nothing visited
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellKind::Empty; size * size],
            gems: BTreeSet::new(),
            visited: [vec![false; size * size], vec![false; size * size]],
            trap_rule: TrapRule::default(),
        }
    }

    pub fn with_trap_rule(mut self, trap_rule: TrapRule) -> Self {
        self.trap_rule = trap_rule;
        self
    }

    /// Build a board from a text layout, one line per row.
    ///
    /// `.` is empty, `#` a wall, `*` a gem and `^` a trap. Blank lines and
    /// surrounding whitespace are ignored. The layout must be square.
    pub fn parse(layout: &str) -> Result<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = rows.len();
        if size == 0 {
            return Err(Error::InvalidRowCount {
                expected: 1,
                got: 0,
            });
        }

        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != size {
                return Err(Error::InvalidRowLength {
                    row,
                    expected: size,
                    got: chars.len(),
                });
            }
            for (col, &character) in chars.iter().enumerate() {
                let kind = CellKind::from_char(character).ok_or(Error::InvalidCellCharacter {
                    character,
                    row,
                    col,
                })?;
                board.set_cell(Position::new(row as i32, col as i32), kind);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trap_rule(&self) -> TrapRule {
        self.trap_rule
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.size + pos.col as usize)
    }

    /// Cell kind at `pos`, or `None` when out of bounds
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell, keeping the gem set in sync. Returns false when out
    /// of bounds.
    pub(crate) fn set_cell(&mut self, pos: Position, kind: CellKind) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        self.cells[idx] = kind;
        if kind == CellKind::Gem {
            self.gems.insert(pos);
        } else {
            self.gems.remove(&pos);
        }
        true
    }

    /// Whether an agent may step onto `pos`
    pub fn is_legal_move(&self, pos: Position) -> bool {
        match self.cell(pos) {
            None | Some(CellKind::Wall) => false,
            Some(CellKind::Trap) => self.trap_rule == TrapRule::Penalize,
            Some(CellKind::Empty | CellKind::Gem) => true,
        }
    }

    /// Take the gem at `pos` if there is one
    pub fn collect_gem(&mut self, pos: Position) -> bool {
        if self.cell(pos) == Some(CellKind::Gem) {
            self.set_cell(pos, CellKind::Empty)
        } else {
            false
        }
    }

    pub fn has_trap(&self, pos: Position) -> bool {
        self.cell(pos) == Some(CellKind::Trap)
    }

    pub fn remove_trap(&mut self, pos: Position) -> bool {
        if self.has_trap(pos) {
            self.set_cell(pos, CellKind::Empty)
        } else {
            false
        }
    }

    /// Turn an empty cell into a wall. Gems, traps and walls are never
    /// overwritten.
    pub fn place_wall(&mut self, pos: Position) -> bool {
        if self.cell(pos) == Some(CellKind::Empty) {
            self.set_cell(pos, CellKind::Wall)
        } else {
            false
        }
    }

    pub fn mark_visited(&mut self, side: Side, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.visited[side.index()][idx] = true;
        }
    }

    pub fn is_visited(&self, side: Side, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|idx| self.visited[side.index()][idx])
    }

    /// Remaining gems in row-major order
    pub fn gems(&self) -> impl Iterator<Item = Position> + '_ {
        self.gems.iter().copied()
    }

    pub fn gem_count(&self) -> usize {
        self.gems.len()
    }

    /// Nearest remaining gem by Manhattan distance; ties go to the first gem
    /// in row-major order.
    pub fn nearest_gem(&self, from: Position) -> Option<Position> {
        self.gems().min_by_key(|gem| from.manhattan(*gem))
    }

    /// Positions of all cells of the given kind, row-major
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        (0..self.size as i32)
            .flat_map(|row| (0..self.size as i32).map(move |col| Position::new(row, col)))
            .filter(|pos| self.cell(*pos) == Some(kind))
            .collect()
    }

    /// True when the gem set and the grid agree
    pub fn is_consistent(&self) -> bool {
        let grid_gems: BTreeSet<Position> = self.positions_of(CellKind::Gem).into_iter().collect();
        grid_gems == self.gems
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let grid = |values: &[bool]| -> Vec<Vec<bool>> {
            values.chunks(self.size).map(<[bool]>::to_vec).collect()
        };
        BoardSnapshot {
            size: self.size,
            cells: self
                .cells
                .chunks(self.size)
                .map(<[CellKind]>::to_vec)
                .collect(),
            visited_human: grid(&self.visited[Side::Human.index()]),
            visited_computer: grid(&self.visited[Side::Computer.index()]),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "
        .#*
        ^..
        *.#
    ";

    #[test]
    fn test_parse_layout() {
        let board = Board::parse(LAYOUT).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.cell(Position::new(0, 1)), Some(CellKind::Wall));
        assert_eq!(board.cell(Position::new(1, 0)), Some(CellKind::Trap));
        assert_eq!(board.gem_count(), 2);
        assert!(board.is_consistent());
        assert_eq!(board.to_string(), ".#*\n^..\n*.#\n");
    }

    #[test]
    fn test_parse_rejects_bad_layouts() {
        assert!(matches!(
            Board::parse("..\n."),
            Err(Error::InvalidRowLength { row: 1, .. })
        ));
        assert!(matches!(
            Board::parse("..\n.x"),
            Err(Error::InvalidCellCharacter { character: 'x', .. })
        ));
        assert!(matches!(Board::parse(""), Err(Error::InvalidRowCount { .. })));
    }

    #[test]
    fn test_collect_gem_twice() {
        let mut board = Board::parse(LAYOUT).unwrap();
        let gem = Position::new(0, 2);
        assert!(board.collect_gem(gem));
        assert!(!board.collect_gem(gem));
        assert!(!board.gems().any(|p| p == gem));
        assert_eq!(board.cell(gem), Some(CellKind::Empty));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_legal_moves() {
        let board = Board::parse(LAYOUT).unwrap();
        assert!(!board.is_legal_move(Position::new(0, 1)));
        assert!(!board.is_legal_move(Position::new(-1, 0)));
        assert!(!board.is_legal_move(Position::new(0, 3)));
        assert!(board.is_legal_move(Position::new(0, 0)));
        assert!(board.is_legal_move(Position::new(0, 2)));
        assert!(board.is_legal_move(Position::new(1, 0)));
    }

    #[test]
    fn test_block_rule_makes_traps_illegal() {
        let board = Board::parse(LAYOUT).unwrap().with_trap_rule(TrapRule::Block);
        assert!(!board.is_legal_move(Position::new(1, 0)));
        assert!(board.is_legal_move(Position::new(1, 1)));
    }

    #[test]
    fn test_wall_placement_refuses_occupied_cells() {
        let mut board = Board::parse(LAYOUT).unwrap();
        assert!(!board.place_wall(Position::new(0, 2)));
        assert!(!board.place_wall(Position::new(1, 0)));
        assert!(!board.place_wall(Position::new(0, 1)));
        assert!(!board.place_wall(Position::new(5, 5)));
        assert!(board.place_wall(Position::new(1, 1)));
        assert_eq!(board.cell(Position::new(1, 1)), Some(CellKind::Wall));
        assert_eq!(board.gem_count(), 2);
    }

    #[test]
    fn test_remove_trap() {
        let mut board = Board::parse(LAYOUT).unwrap();
        assert!(board.has_trap(Position::new(1, 0)));
        assert!(board.remove_trap(Position::new(1, 0)));
        assert!(!board.remove_trap(Position::new(1, 0)));
        assert!(!board.has_trap(Position::new(1, 0)));
    }

    #[test]
    fn test_visited_is_per_side_and_idempotent() {
        let mut board = Board::new(4);
        let pos = Position::new(2, 3);
        board.mark_visited(Side::Human, pos);
        board.mark_visited(Side::Human, pos);
        assert!(board.is_visited(Side::Human, pos));
        assert!(!board.is_visited(Side::Computer, pos));

        let snapshot = board.snapshot();
        assert!(snapshot.visited_human[2][3]);
        assert!(!snapshot.visited_computer[2][3]);
    }

    #[test]
    fn test_nearest_gem_breaks_ties_row_major() {
        let board = Board::parse(
            "
            ...
            *.*
            ...
        ",
        )
        .unwrap();
        assert_eq!(
            board.nearest_gem(Position::new(1, 1)),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            board.nearest_gem(Position::new(0, 2)),
            Some(Position::new(1, 2))
        );
    }

    #[test]
    fn test_start_positions() {
        assert_eq!(Side::Human.start_position(10), Position::new(0, 0));
        assert_eq!(Side::Computer.start_position(10), Position::new(9, 9));
        assert_eq!(Side::Human.opponent(), Side::Computer);
    }
}
