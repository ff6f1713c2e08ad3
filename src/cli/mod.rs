//! CLI infrastructure for the maze duel
//!
//! This module provides the command-line interface for training the
//! learning agent, simulating a single game, and printing configuration.

pub mod commands;
pub mod config;
pub mod output;
