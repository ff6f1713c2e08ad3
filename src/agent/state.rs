//! Agent state shared by the human and computer sides

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionReport};
use crate::{
    config::GameConfig,
    maze::{Board, CellKind, Direction, Position, Side, TrapRule},
};

/// Score awarded for picking up a gem
pub const GEM_POINTS: i32 = 10;

/// Score lost for ending an action on a trap
pub const TRAP_PENALTY: i32 = 5;

/// Position, score, gem count, token balance and teleport history of one side.
///
/// The decision making lives elsewhere (see [`crate::ports::Strategy`]); this
/// type only knows which actions are possible and how to apply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    side: Side,
    position: Position,
    score: i32,
    gems_collected: u32,
    tokens: u32,
    /// Distinct positions in first-visit order; the teleport destinations
    visited: Vec<Position>,
}

impl Agent {
    pub fn new(side: Side, position: Position, tokens: u32) -> Self {
        Self {
            side,
            position,
            score: 0,
            gems_collected: 0,
            tokens,
            visited: vec![position],
        }
    }

    /// Agent at its start corner with the configured token balance
    pub fn at_start(side: Side, config: &GameConfig) -> Self {
        Self::new(
            side,
            side.start_position(config.grid_size),
            config.initial_tokens,
        )
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn gems_collected(&self) -> u32 {
        self.gems_collected
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    pub fn has_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    /// Visited positions other than the current one
    pub fn teleport_targets(&self) -> impl Iterator<Item = Position> + '_ {
        self.visited
            .iter()
            .copied()
            .filter(move |pos| *pos != self.position)
    }

    /// The trap a `RemoveTrap` would clear: the agent's own cell, or under
    /// [`TrapRule::Block`] the first adjacent trap in [`Direction::ALL`]
    /// order, since a blocking trap can never be stood on.
    pub fn removable_trap(&self, board: &Board) -> Option<Position> {
        if board.has_trap(self.position) {
            return Some(self.position);
        }
        if board.trap_rule() != TrapRule::Block {
            return None;
        }
        Direction::ALL
            .into_iter()
            .map(|direction| self.position.step(direction))
            .find(|pos| board.has_trap(*pos))
    }

    /// Directions whose neighbouring cell can be entered
    pub fn legal_moves(&self, board: &Board) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| board.is_legal_move(self.position.step(*direction)))
            .collect()
    }

    /// Every action that would succeed right now.
    ///
    /// Token actions are only offered while the balance is positive. Returns
    /// `[Stay]` when nothing else is possible.
    pub fn legal_actions(&self, board: &Board) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .legal_moves(board)
            .into_iter()
            .map(Action::Move)
            .collect();

        if self.tokens > 0 {
            actions.extend(
                Direction::ALL
                    .into_iter()
                    .filter(|direction| {
                        board.cell(self.position.step(*direction)) == Some(CellKind::Empty)
                    })
                    .map(Action::PlaceWall),
            );
            if self.removable_trap(board).is_some() {
                actions.push(Action::RemoveTrap);
            }
            actions.extend(self.teleport_targets().map(Action::Teleport));
        }

        if actions.is_empty() {
            actions.push(Action::Stay);
        }
        actions
    }

    /// Apply `action` to the board and to this agent.
    ///
    /// Impossible actions change nothing and report `applied == false`.
    pub fn apply(&mut self, action: Action, board: &mut Board) -> ActionReport {
        if action.uses_token() && self.tokens == 0 {
            return ActionReport::default();
        }

        match action {
            Action::Move(direction) => {
                let destination = self.position.step(direction);
                if !board.is_legal_move(destination) {
                    return ActionReport::default();
                }
                self.arrive(destination, board, ActionReport::applied())
            }
            Action::PlaceWall(direction) => {
                if board.place_wall(self.position.step(direction)) {
                    self.spend_token()
                } else {
                    ActionReport::default()
                }
            }
            Action::RemoveTrap => match self.removable_trap(board) {
                Some(trap) if board.remove_trap(trap) => self.spend_token(),
                _ => ActionReport::default(),
            },
            Action::Teleport(target) => {
                if target == self.position || !self.has_visited(target) {
                    return ActionReport::default();
                }
                let report = self.spend_token();
                self.arrive(target, board, report)
            }
            Action::Stay => ActionReport::applied(),
        }
    }

    fn spend_token(&mut self) -> ActionReport {
        self.tokens -= 1;
        ActionReport {
            token_spent: true,
            ..ActionReport::applied()
        }
    }

    /// Relocate, record the visit, then resolve gem pickup and trap damage.
    fn arrive(
        &mut self,
        destination: Position,
        board: &mut Board,
        mut report: ActionReport,
    ) -> ActionReport {
        self.position = destination;
        board.mark_visited(self.side, destination);
        if !self.visited.contains(&destination) {
            self.visited.push(destination);
        }

        if board.collect_gem(destination) {
            self.gems_collected += 1;
            self.score += GEM_POINTS;
            report.gem_collected = true;
        }
        if board.has_trap(destination) {
            self.score -= TRAP_PENALTY;
            report.trap_triggered = true;
        }
        report
    }
}
