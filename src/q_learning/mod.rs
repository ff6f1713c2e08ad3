//! Tabular Q-learning for the computer side
//!
//! The learning agent featurizes the board into a small [`MazeState`],
//! picks an action epsilon-greedily from a Q-table whose unseen entries are
//! seeded by a hand-written heuristic, and applies the one-step Q-learning
//! update after every move:
//!
//! ```text
//! Q(S,A) ← Q(S,A) + α · (r + γ · max_a Q(S′,a) − Q(S,A))
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use maze_duel::{config::PolicyConfig, q_learning::QLearningStrategy};
//!
//! let strategy = QLearningStrategy::new(PolicyConfig::default()).with_seed(42);
//! assert_eq!(strategy.table_size(), 0);
//! ```

pub mod agent;
pub mod heuristic;
pub mod q_table;
pub mod state;

// Public re-exports
pub use agent::{Decision, QLearningStrategy};
pub use heuristic::heuristic_value;
pub use q_table::QTable;
pub use state::{MazeState, Neighbor};
