//! Strategy port - pluggable decision making for one side of the duel
//!
//! Every agent shares the same state shape ([`Agent`]); what differs between
//! a scripted opponent and the learning agent is only how the next action is
//! chosen. That choice sits behind this trait, supplied when the game is
//! built.

use crate::{
    agent::{Action, ActionReport, Agent},
    maze::Board,
};

/// The action a strategy took on its turn and what came of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnRecord {
    pub action: Action,
    pub report: ActionReport,
}

/// Strategy trait - Unified interface for everything that can play a turn
///
/// # Examples
///
/// ```no_run
/// use maze_duel::{
///     agent::Agent,
///     maze::Board,
///     ports::Strategy,
/// };
///
/// fn play_out(strategy: &mut dyn Strategy, agent: &mut Agent, board: &mut Board, turns: usize) {
///     for _ in 0..turns {
///         strategy.take_turn(agent, board);
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Choose and apply exactly one action for `agent`.
    ///
    /// Never fails: when nothing is possible the strategy stays in place.
    fn take_turn(&mut self, agent: &mut Agent, board: &mut Board) -> TurnRecord;

    /// Get the strategy's name.
    ///
    /// Used for identification in training output and logging.
    fn name(&self) -> &str;

    /// Forget anything learned so far.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for stateless strategies.
    fn reset(&mut self) {}

    /// Seed the strategy's internal random number generator.
    ///
    /// Training pipelines call this when supplied with a deterministic seed.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn set_rng_seed(&mut self, _seed: u64) {}

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
