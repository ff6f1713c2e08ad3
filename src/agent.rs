//! Agents: the state both sides share and the actions they can take

pub mod action;
pub mod state;

pub use action::{Action, ActionReport};
pub use state::{Agent, GEM_POINTS, TRAP_PENALTY};
