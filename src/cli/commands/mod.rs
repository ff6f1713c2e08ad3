//! Subcommands of the `maze-duel` binary

pub mod config;
pub mod simulate;
pub mod train;
