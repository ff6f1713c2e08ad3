//! Training pipeline for the learning agent

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{EpisodeSummary, Game, GameResult},
    maze::Side,
    ports::{Observer, Strategy},
    q_learning::QLearningStrategy,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes (full games)
    pub episodes: usize,

    /// Random seed for both strategies
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            seed: None,
        }
    }
}

/// Result of a training run, from the computer's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    pub wins: usize,
    pub losses: usize,
    pub ties: usize,

    pub win_rate: f64,
    pub loss_rate: f64,
    pub tie_rate: f64,

    /// Mean gems per episode for the computer side
    pub mean_computer_gems: f64,

    /// Mean gems per episode for the human side
    pub mean_human_gems: f64,

    /// Q-table entries after the final episode (0 for non-learning strategies)
    pub q_table_size: usize,
}

impl TrainingResult {
    /// Build a result from per-episode summaries
    pub fn from_episodes(episodes: &[EpisodeSummary], q_table_size: usize) -> Self {
        let total = episodes.len();
        let count = |result: GameResult| episodes.iter().filter(|e| e.result == result).count();
        let wins = count(GameResult::ComputerWins);
        let losses = count(GameResult::HumanWins);
        let ties = count(GameResult::Tie);

        let rate = |n: usize| {
            if total > 0 {
                n as f64 / total as f64
            } else {
                0.0
            }
        };
        let mean = |gems: fn(&EpisodeSummary) -> u32| {
            if total > 0 {
                episodes.iter().map(|e| f64::from(gems(e))).sum::<f64>() / total as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes: total,
            wins,
            losses,
            ties,
            win_rate: rate(wins),
            loss_rate: rate(losses),
            tie_rate: rate(ties),
            mean_computer_gems: mean(|e| e.computer_gems),
            mean_human_gems: mean(|e| e.human_gems),
            q_table_size,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays repeated games between a scripted human stand-in and the game's
/// computer strategy.
///
/// The [`Game`] is reset between episodes, so each episode gets a fresh board
/// and fresh agents while the computer strategy keeps its table.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run all episodes on `game`, with `human` playing the human side
    pub fn run(&mut self, game: &mut Game, human: &mut dyn Strategy) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            game.computer_strategy_mut().set_rng_seed(seed);
            human.set_rng_seed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut episodes = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            if episode > 0 {
                game.reset();
            }
            let summary = self.play_episode(episode, game, human)?;
            log::info!(
                "episode {episode}: {:?} (human {} gems, computer {} gems)",
                summary.result,
                summary.human_gems,
                summary.computer_gems
            );
            episodes.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let q_table_size = game
            .computer_strategy()
            .as_any()
            .downcast_ref::<QLearningStrategy>()
            .map_or(0, QLearningStrategy::table_size);

        Ok(TrainingResult::from_episodes(&episodes, q_table_size))
    }

    fn play_episode(
        &mut self,
        episode: usize,
        game: &mut Game,
        human: &mut dyn Strategy,
    ) -> Result<EpisodeSummary> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        while let Some(record) = game.play_round(human) {
            for observer in &mut self.observers {
                observer.on_turn(episode, record.round, Side::Human, &record.human)?;
                observer.on_turn(episode, record.round, Side::Computer, &record.computer)?;
            }
        }

        let summary = game.summary();
        for observer in &mut self.observers {
            observer.on_episode_end(episode, &summary)?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GameConfig, PolicyConfig},
        strategies::RandomStrategy,
    };

    fn small_game(seed: u64) -> Game {
        let config = GameConfig::default()
            .with_grid_size(5)
            .with_counts(3, 4, 2)
            .with_rounds(6)
            .with_seed(seed);
        Game::new(
            config,
            Box::new(QLearningStrategy::new(PolicyConfig::default())),
        )
        .unwrap()
    }

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            episodes: 10,
            seed: Some(42),
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut game = small_game(42);
        let mut human = RandomStrategy::new("Human".to_string());

        let result = pipeline.run(&mut game, &mut human).unwrap();

        assert_eq!(result.total_episodes, 10);
        assert_eq!(result.wins + result.losses + result.ties, 10);
        assert!(result.q_table_size > 0);
        assert!((result.win_rate + result.loss_rate + result.tie_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let run = || {
            let mut pipeline = TrainingPipeline::new(TrainingConfig {
                episodes: 5,
                seed: Some(7),
            });
            let mut game = small_game(7);
            let mut human = RandomStrategy::new("Human".to_string());
            pipeline.run(&mut game, &mut human).unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.wins, second.wins);
        assert_eq!(first.losses, second.losses);
        assert_eq!(first.q_table_size, second.q_table_size);
        assert_eq!(first.mean_computer_gems, second.mean_computer_gems);
    }

    #[test]
    fn test_result_from_episodes() {
        let episode = |result, human_gems, computer_gems| EpisodeSummary {
            result,
            rounds: 20,
            human_gems,
            computer_gems,
            human_score: 0,
            computer_score: 0,
        };
        let result = TrainingResult::from_episodes(
            &[
                episode(GameResult::ComputerWins, 1, 3),
                episode(GameResult::HumanWins, 4, 0),
                episode(GameResult::ComputerWins, 0, 2),
                episode(GameResult::Tie, 1, 1),
            ],
            12,
        );
        assert_eq!((result.wins, result.losses, result.ties), (2, 1, 1));
        assert!((result.win_rate - 0.5).abs() < 1e-9);
        assert!((result.mean_computer_gems - 1.5).abs() < 1e-9);
        assert!((result.mean_human_gems - 1.5).abs() < 1e-9);
        assert_eq!(result.q_table_size, 12);

        let empty = TrainingResult::from_episodes(&[], 0);
        assert_eq!(empty.win_rate, 0.0);
        assert_eq!(empty.mean_human_gems, 0.0);
    }
}
