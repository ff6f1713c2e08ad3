//! Q-learning strategy for the computer side
//!
//! One call to [`Strategy::take_turn`] runs the full decision cycle:
//! observe, select (epsilon-greedy with heuristic seeding), execute, and
//! update the table from the observed reward.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{heuristic::heuristic_value, q_table::QTable, state::MazeState};
use crate::{
    agent::{Action, ActionReport, Agent},
    config::PolicyConfig,
    maze::Board,
    ports::{Strategy, TurnRecord},
};

/// Reward for a successful wall placement
const WALL_REWARD: f64 = 2.0;
/// Reward for a successful trap removal
const REMOVE_TRAP_REWARD: f64 = 5.0;
const GEM_REWARD: f64 = 10.0;
const TRAP_REWARD: f64 = -5.0;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Record of the most recent decision, for observers and tests
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub state: MazeState,
    pub action: Action,
    /// True when the action came from the exploration branch
    pub explored: bool,
    pub report: ActionReport,
    pub reward: f64,
    pub next_state: MazeState,
    /// Q(S, A) after the update
    pub updated_value: f64,
}

/// Epsilon-greedy tabular Q-learning agent
#[derive(Debug, Clone)]
pub struct QLearningStrategy {
    name: String,
    q_table: QTable,
    config: PolicyConfig,
    rng: StdRng,
    rng_seed: Option<u64>,
    last_decision: Option<Decision>,
}

impl QLearningStrategy {
    /// Create a new Q-learning strategy with an unseeded RNG
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            name: "Q-Learning".to_string(),
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            config,
            rng: build_rng(None),
            rng_seed: None,
            last_decision: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable table access, for priming estimates before play
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn table_size(&self) -> usize {
        self.q_table.size()
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Stored estimate for a pair, seeding it from the heuristic plus jitter
    /// if it has never been evaluated.
    pub fn value_of(
        &mut self,
        state: &MazeState,
        action: Action,
        agent: &Agent,
        board: &Board,
    ) -> f64 {
        let jitter = self.config.jitter;
        let rng = &mut self.rng;
        self.q_table.get_or_seed(state, action, || {
            heuristic_value(state, action, agent, board) + rng.random::<f64>() * jitter
        })
    }

    /// Exploitation branch: the legal action with the highest estimate, and
    /// that estimate. Seeds every unseen legal pair.
    pub fn greedy_action(
        &mut self,
        state: &MazeState,
        agent: &Agent,
        board: &Board,
    ) -> (Action, f64) {
        let legal = agent.legal_actions(board);
        let jitter = self.config.jitter;
        let rng = &mut self.rng;
        self.q_table
            .greedy_action(state, &legal, |action| {
                heuristic_value(state, action, agent, board) + rng.random::<f64>() * jitter
            })
            .unwrap_or((Action::Stay, 0.0))
    }

    /// Epsilon-greedy selection. Returns the action and whether it was an
    /// exploratory pick.
    pub fn select_action(
        &mut self,
        state: &MazeState,
        agent: &Agent,
        board: &Board,
    ) -> (Action, bool) {
        if self.rng.random::<f64>() < self.config.exploration_rate {
            let legal = agent.legal_actions(board);
            let action = legal.choose(&mut self.rng).copied().unwrap_or(Action::Stay);
            (action, true)
        } else {
            let (action, _) = self.greedy_action(state, agent, board);
            (action, false)
        }
    }

    /// Shaped reward for an executed action.
    ///
    /// Every action pays the step penalty; failed actions earn nothing else.
    pub fn reward(&self, action: Action, report: &ActionReport) -> f64 {
        let mut reward = -self.config.step_penalty;
        if report.applied {
            match action {
                Action::PlaceWall(_) => reward += WALL_REWARD,
                Action::RemoveTrap => reward += REMOVE_TRAP_REWARD,
                _ => {}
            }
        }
        if report.gem_collected {
            reward += GEM_REWARD;
        }
        if report.trap_triggered {
            reward += TRAP_REWARD;
        }
        reward
    }
}

impl Strategy for QLearningStrategy {
    fn take_turn(&mut self, agent: &mut Agent, board: &mut Board) -> TurnRecord {
        let state = MazeState::observe(agent, board);
        let (action, explored) = self.select_action(&state, agent, board);
        // An exploratory pick may be unseen; score it against the board it
        // was chosen on.
        self.value_of(&state, action, agent, board);

        let report = agent.apply(action, board);
        let reward = self.reward(action, &report);

        let next_state = MazeState::observe(agent, board);
        let (_, max_next_q) = self.greedy_action(&next_state, agent, board);
        let updated_value = self
            .q_table
            .q_learning_update(state, action, reward, max_next_q);

        log::debug!(
            "{}: {} at {} ({}) reward {reward:.1}",
            self.name,
            action,
            state.position,
            if explored { "explore" } else { "exploit" },
        );
        log::trace!(
            "Q update -> {updated_value:.3} (max next {max_next_q:.3}, table size {})",
            self.q_table.size()
        );

        self.last_decision = Some(Decision {
            state,
            action,
            explored,
            report,
            reward,
            next_state,
            updated_value,
        });
        TurnRecord { action, report }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.q_table.reset();
        self.last_decision = None;
        self.rng = build_rng(self.rng_seed);
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, Position, Side};

    fn greedy_config() -> PolicyConfig {
        PolicyConfig::default().with_exploration_rate(0.0)
    }

    #[test]
    fn test_reward_shaping() {
        let strategy = QLearningStrategy::new(PolicyConfig::default());
        let failed = ActionReport::default();
        assert!((strategy.reward(Action::PlaceWall(Direction::East), &failed) + 0.1).abs() < 1e-9);

        let wall = ActionReport {
            applied: true,
            token_spent: true,
            ..ActionReport::default()
        };
        assert!((strategy.reward(Action::PlaceWall(Direction::East), &wall) - 1.9).abs() < 1e-9);
        assert!((strategy.reward(Action::RemoveTrap, &wall) - 4.9).abs() < 1e-9);

        let gem_and_trap = ActionReport {
            applied: true,
            gem_collected: true,
            trap_triggered: true,
            ..ActionReport::default()
        };
        assert!((strategy.reward(Action::Move(Direction::East), &gem_and_trap) - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_turn_walks_onto_adjacent_gem() {
        let mut board = Board::parse(
            "
            ....
            ....
            ...*
            ....
        ",
        )
        .unwrap();
        let mut agent = Agent::new(Side::Computer, Position::new(3, 3), 0);
        let mut strategy = QLearningStrategy::new(greedy_config()).with_seed(3);

        let turn = strategy.take_turn(&mut agent, &mut board);
        assert_eq!(turn.action, Action::Move(Direction::North));
        assert!(turn.report.gem_collected);
        assert_eq!(agent.gems_collected(), 1);
        assert_eq!(agent.score(), 10);

        let decision = strategy.last_decision().unwrap();
        assert!(!decision.explored);
        assert!((decision.reward - 9.9).abs() < 1e-9);
    }

    #[test]
    fn test_update_follows_q_learning_rule() {
        let mut board = Board::parse(
            "
            ...
            ...
            ...
        ",
        )
        .unwrap();
        let mut agent = Agent::new(Side::Computer, Position::new(2, 2), 0);
        let mut strategy = QLearningStrategy::new(greedy_config().with_jitter(0.0)).with_seed(9);

        strategy.take_turn(&mut agent, &mut board);
        let decision = strategy.last_decision().unwrap().clone();

        // With no gems or traps every seed is 0 and the first legal move wins.
        assert_eq!(decision.action, Action::Move(Direction::West));
        let max_next = strategy
            .q_table()
            .get(&decision.next_state, Action::Move(Direction::West))
            .unwrap();
        let expected = 0.0 + 0.1 * (-0.1 + 0.9 * max_next - 0.0);
        assert!((decision.updated_value - expected).abs() < 1e-9);
        assert_eq!(
            strategy.q_table().get(&decision.state, decision.action),
            Some(decision.updated_value)
        );
    }

    #[test]
    fn test_update_uses_configured_rates() {
        let mut board = Board::new(3);
        let mut agent = Agent::new(Side::Computer, Position::new(2, 2), 0);
        let config = greedy_config()
            .with_jitter(0.0)
            .with_learning_rate(0.5)
            .with_discount_factor(0.0);
        let mut strategy = QLearningStrategy::new(config).with_seed(9);

        strategy.take_turn(&mut agent, &mut board);
        let decision = strategy.last_decision().unwrap();

        // γ = 0 ignores the next state: 0 + 0.5 * (-0.1 - 0)
        assert!((decision.updated_value + 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_full_exploration_picks_legal_actions() {
        let mut board = Board::parse(
            "
            .#.
            #..
            ...
        ",
        )
        .unwrap();
        let mut agent = Agent::new(Side::Computer, Position::new(0, 0), 0);
        let mut strategy =
            QLearningStrategy::new(PolicyConfig::default().with_exploration_rate(1.0)).with_seed(1);

        let turn = strategy.take_turn(&mut agent, &mut board);
        assert_eq!(turn.action, Action::Stay);
        assert!(strategy.last_decision().unwrap().explored);
        assert_eq!(agent.position(), Position::new(0, 0));
        assert!(strategy.table_size() >= 1);
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let board = Board::parse(
            "
            .*..
            ..^.
            ....
            *...
        ",
        )
        .unwrap();
        let agent = Agent::new(Side::Computer, Position::new(2, 2), 3);
        let state = MazeState::observe(&agent, &board);

        let picks = |seed: u64| {
            let mut strategy = QLearningStrategy::new(PolicyConfig::default()).with_seed(seed);
            (0..25)
                .map(|_| strategy.select_action(&state, &agent, &board))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(77), picks(77));
    }

    #[test]
    fn test_reset_clears_table() {
        let mut board = Board::new(3);
        let mut agent = Agent::new(Side::Computer, Position::new(1, 1), 1);
        let mut strategy = QLearningStrategy::new(PolicyConfig::default()).with_seed(5);
        strategy.take_turn(&mut agent, &mut board);
        assert!(strategy.table_size() > 0);

        strategy.reset();
        assert_eq!(strategy.table_size(), 0);
        assert!(strategy.last_decision().is_none());
    }
}
