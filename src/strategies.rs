//! Scripted strategies: stand-ins for the human side and simple opponents

use rand::{Rng, SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    agent::{Action, Agent},
    maze::{Board, Direction, Position},
    ports::{Strategy, TurnRecord},
};

fn apply(agent: &mut Agent, board: &mut Board, action: Action) -> TurnRecord {
    let report = agent.apply(action, board);
    TurnRecord { action, report }
}

/// Random policy: a uniformly random legal move.
///
/// When boxed in it tries a random token action half of the time, and
/// otherwise stays put.
pub struct RandomStrategy {
    name: String,
    rng: StdRng,
}

impl RandomStrategy {
    /// Create a new random strategy
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random strategy with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn try_token_action(&mut self, agent: &mut Agent, board: &mut Board) -> Option<TurnRecord> {
        match self.rng.random_range(0..3) {
            0 => Direction::ALL.into_iter().find_map(|direction| {
                let turn = apply(agent, board, Action::PlaceWall(direction));
                turn.report.applied.then_some(turn)
            }),
            1 => {
                let turn = apply(agent, board, Action::RemoveTrap);
                turn.report.applied.then_some(turn)
            }
            _ => {
                let target = *agent.visited().choose(&mut self.rng)?;
                let turn = apply(agent, board, Action::Teleport(target));
                turn.report.applied.then_some(turn)
            }
        }
    }
}

impl Strategy for RandomStrategy {
    fn take_turn(&mut self, agent: &mut Agent, board: &mut Board) -> TurnRecord {
        let moves = agent.legal_moves(board);
        if moves.is_empty() && self.rng.random_bool(0.5) {
            if let Some(turn) = self.try_token_action(agent, board) {
                return turn;
            }
        }

        match moves.choose(&mut self.rng) {
            Some(&direction) => apply(agent, board, Action::Move(direction)),
            None => apply(agent, board, Action::Stay),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Gem-seeking scripted opponent
///
/// This strategy will:
/// 1. Step onto an adjacent gem
/// 2. Clear a trap it stands on, if it has a token
/// 3. Head for the nearest gem along the longer axis first
/// 4. Otherwise make any legal move
/// 5. Teleport to a random visited cell as a last resort
pub struct GreedyStrategy {
    name: String,
    rng: StdRng,
}

impl GreedyStrategy {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Moves towards `gem`, preferred axis first. Axes already aligned are
    /// skipped.
    fn approach(from: Position, gem: Position) -> Vec<Direction> {
        let (dr, dc) = from.signum_towards(gem);
        let vertical = Direction::from_delta(i32::from(dr), 0);
        let horizontal = Direction::from_delta(0, i32::from(dc));
        let rows_first = from.row.abs_diff(gem.row) > from.col.abs_diff(gem.col);
        let ordered = if rows_first {
            [vertical, horizontal]
        } else {
            [horizontal, vertical]
        };
        ordered.into_iter().flatten().collect()
    }
}

impl Strategy for GreedyStrategy {
    fn take_turn(&mut self, agent: &mut Agent, board: &mut Board) -> TurnRecord {
        let here = agent.position();
        let moves = agent.legal_moves(board);

        if let Some(&direction) = moves
            .iter()
            .find(|direction| board.gems().any(|gem| gem == here.step(**direction)))
        {
            return apply(agent, board, Action::Move(direction));
        }

        if board.has_trap(here) && agent.tokens() > 0 {
            return apply(agent, board, Action::RemoveTrap);
        }

        if let Some(gem) = board.nearest_gem(here) {
            if let Some(direction) = Self::approach(here, gem)
                .into_iter()
                .find(|direction| moves.contains(direction))
            {
                return apply(agent, board, Action::Move(direction));
            }
        }

        if let Some(&direction) = moves.choose(&mut self.rng) {
            return apply(agent, board, Action::Move(direction));
        }

        if agent.tokens() > 0 {
            let targets: Vec<Position> = agent.teleport_targets().collect();
            if let Some(&target) = targets.choose(&mut self.rng) {
                return apply(agent, board, Action::Teleport(target));
            }
        }

        apply(agent, board, Action::Stay)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
