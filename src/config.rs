//! Game and policy configuration
//!
//! All values are fixed inputs supplied at game start. They can be built in
//! code with the `with_*` methods or loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, maze::TrapRule};

/// Board and turn-loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    pub wall_count: usize,
    pub gem_count: usize,
    pub trap_count: usize,
    /// Number of full rounds (human then computer) before the game ends
    pub rounds: u32,
    /// Token balance each side starts with
    pub initial_tokens: u32,
    pub trap_rule: TrapRule,
    /// Seed for board generation and scripted opponents
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            wall_count: 20,
            gem_count: 15,
            trap_count: 10,
            rounds: 20,
            initial_tokens: 3,
            trap_rule: TrapRule::Penalize,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the wall, gem and trap counts used by board generation.
    pub fn with_counts(mut self, walls: usize, gems: usize, traps: usize) -> Self {
        self.wall_count = walls;
        self.gem_count = gems;
        self.trap_count = traps;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_initial_tokens(mut self, tokens: u32) -> Self {
        self.initial_tokens = tokens;
        self
    }

    pub fn with_trap_rule(mut self, trap_rule: TrapRule) -> Self {
        self.trap_rule = trap_rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cells available for walls, gems and traps (everything but the two
    /// start corners)
    pub fn free_cells(&self) -> usize {
        (self.grid_size * self.grid_size).saturating_sub(2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(Error::invalid_config(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        let placed = self.wall_count + self.gem_count + self.trap_count;
        if placed > self.free_cells() {
            return Err(Error::invalid_config(format!(
                "{placed} walls, gems and traps do not fit in {} free cells",
                self.free_cells()
            )));
        }
        if self.rounds == 0 {
            return Err(Error::invalid_config("rounds must be greater than 0"));
        }
        Ok(())
    }
}

/// Learning agent constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// α
    pub learning_rate: f64,
    /// γ
    pub discount_factor: f64,
    /// ε, probability of picking a random legal action
    pub exploration_rate: f64,
    /// Subtracted from the reward of every action
    pub step_penalty: f64,
    /// Exclusive upper bound of the random tie-break added to heuristic seeds
    pub jitter: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.2,
            step_penalty: 0.1,
            jitter: 0.1,
        }
    }
}

impl PolicyConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("exploration_rate", self.exploration_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if !self.step_penalty.is_finite() || self.step_penalty < 0.0 {
            return Err(Error::invalid_config(format!(
                "step_penalty must be non-negative and finite, got {}",
                self.step_penalty
            )));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(Error::invalid_config(format!(
                "jitter must be non-negative and finite, got {}",
                self.jitter
            )));
        }
        Ok(())
    }
}

/// Top-level configuration, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeDuelConfig {
    pub game: GameConfig,
    pub policy: PolicyConfig,
}

impl MazeDuelConfig {
    /// Load and validate a configuration file. Missing fields take their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        let config: MazeDuelConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MazeDuelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.grid_size, 10);
        assert_eq!(config.game.rounds, 20);
        assert_eq!(config.game.initial_tokens, 3);
        assert_eq!(config.policy.exploration_rate, 0.2);
    }

    #[test]
    fn test_rejects_overfull_board() {
        let config = GameConfig::default()
            .with_grid_size(3)
            .with_counts(4, 2, 2);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(config.with_counts(3, 2, 2).validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let policy = PolicyConfig::default().with_exploration_rate(1.5);
        assert!(policy.validate().is_err());
        let policy = PolicyConfig::default().with_learning_rate(-0.1);
        assert!(policy.validate().is_err());
        let policy = PolicyConfig::default().with_discount_factor(1.5);
        assert!(policy.validate().is_err());
        assert!(PolicyConfig::default().with_discount_factor(1.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MazeDuelConfig =
            serde_json::from_str(r#"{"game": {"rounds": 5, "trap_rule": "block"}}"#).unwrap();
        assert_eq!(config.game.rounds, 5);
        assert_eq!(config.game.trap_rule, TrapRule::Block);
        assert_eq!(config.game.grid_size, 10);
        assert_eq!(config.policy, PolicyConfig::default());
    }
}
