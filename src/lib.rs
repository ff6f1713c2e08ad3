//! Gem maze duel: a human and a tabular Q-learning agent race for gems
//!
//! This crate provides:
//! - The maze board, its generator, and the token-aware action rules
//! - An epsilon-greedy Q-learning strategy with heuristic seeding
//! - Scripted strategies for the human side and as training opponents
//! - The alternating turn loop driven by discrete human intents
//! - A multi-episode training pipeline with pluggable observers
//!
//! # Example
//!
//! ```no_run
//! use maze_duel::{
//!     config::{GameConfig, PolicyConfig},
//!     game::{Game, Intent},
//!     maze::Direction,
//!     q_learning::QLearningStrategy,
//! };
//!
//! let learner = QLearningStrategy::new(PolicyConfig::default()).with_seed(7);
//! let mut game = Game::new(GameConfig::default().with_seed(7), Box::new(learner))?;
//!
//! if game.submit(Intent::Move(Direction::East)).is_accepted() {
//!     game.play_computer_turn();
//! }
//! println!("{}", game.board());
//! # Ok::<(), maze_duel::Error>(())
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod strategies;

pub use error::{Error, Result};
