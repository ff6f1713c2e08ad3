//! Shared configuration helpers for CLI commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    config::{MazeDuelConfig, PolicyConfig},
    ports::Strategy,
    q_learning::QLearningStrategy,
    strategies::{GreedyStrategy, RandomStrategy},
};

/// Scripted strategy playing the human side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Random,
    Greedy,
}

impl OpponentKind {
    pub fn label(self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::Greedy => "greedy",
        }
    }

    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        let name = "Human".to_string();
        match (self, seed) {
            (OpponentKind::Random, Some(seed)) => Box::new(RandomStrategy::with_seed(name, seed)),
            (OpponentKind::Random, None) => Box::new(RandomStrategy::new(name)),
            (OpponentKind::Greedy, Some(seed)) => Box::new(GreedyStrategy::with_seed(name, seed)),
            (OpponentKind::Greedy, None) => Box::new(GreedyStrategy::new(name)),
        }
    }
}

/// Load the config file if one was given, apply a seed override, and
/// validate the result.
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<MazeDuelConfig> {
    let mut config = match path {
        Some(path) => MazeDuelConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MazeDuelConfig::default(),
    };
    if seed.is_some() {
        config.game.seed = seed;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// The learning agent for the computer side
pub fn build_learner(policy: &PolicyConfig, seed: Option<u64>) -> QLearningStrategy {
    let learner = QLearningStrategy::new(policy.clone());
    match seed {
        Some(seed) => learner.with_seed(seed),
        None => learner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_override() {
        let config = load_config(None, Some(9)).unwrap();
        assert_eq!(config.game.seed, Some(9));
        assert_eq!(config.policy, PolicyConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duel.json");
        std::fs::write(&path, r#"{"game": {"grid_size": 6, "wall_count": 4, "gem_count": 5, "trap_count": 2}}"#)
            .unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.game.grid_size, 6);
        assert_eq!(config.game.rounds, 20);

        std::fs::write(&path, r#"{"game": {"grid_size": 1}}"#).unwrap();
        assert!(load_config(Some(&path), None).is_err());
    }

    #[test]
    fn test_opponent_names() {
        assert_eq!(OpponentKind::Greedy.build(Some(1)).name(), "Human");
        assert_eq!(OpponentKind::Random.label(), "random");
    }
}
