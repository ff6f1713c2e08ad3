//! Tests for the training pipeline and its observers

use std::sync::{Arc, Mutex};

use maze_duel::{
    Result,
    config::{GameConfig, PolicyConfig},
    game::{EpisodeSummary, Game},
    maze::Side,
    pipeline::{
        JsonlObserver, MetricsObserver, Observer, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    ports::TurnRecord,
    q_learning::QLearningStrategy,
    strategies::{GreedyStrategy, RandomStrategy},
};

fn small_config(seed: u64) -> GameConfig {
    GameConfig::default()
        .with_grid_size(6)
        .with_counts(5, 6, 3)
        .with_rounds(10)
        .with_seed(seed)
}

fn learning_game(seed: u64) -> Game {
    Game::new(
        small_config(seed),
        Box::new(QLearningStrategy::new(PolicyConfig::default())),
    )
    .unwrap()
}

/// Records the event sequence for later inspection
#[derive(Clone, Default)]
struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for EventLog {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.push(format!("start {total_episodes}"));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.push(format!("episode {episode}"));
        Ok(())
    }

    fn on_turn(&mut self, _episode: usize, round: u32, side: Side, _turn: &TurnRecord) -> Result<()> {
        self.push(format!("turn {round} {side:?}"));
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.push(format!("end {episode} {}", summary.rounds));
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.push("done".to_string());
        Ok(())
    }
}

/// Forwards to a shared metrics observer so the test can read it afterwards
struct SharedMetrics(Arc<Mutex<MetricsObserver>>);

impl Observer for SharedMetrics {
    fn on_turn(&mut self, episode: usize, round: u32, side: Side, turn: &TurnRecord) -> Result<()> {
        self.0.lock().unwrap().on_turn(episode, round, side, turn)
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.0.lock().unwrap().on_episode_end(episode, summary)
    }
}

#[test]
fn test_basic_training_pipeline() {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 30,
        seed: Some(42),
    });
    let mut game = learning_game(42);
    let mut human = RandomStrategy::new("Human".to_string());

    let result = pipeline.run(&mut game, &mut human).unwrap();

    assert_eq!(result.total_episodes, 30);
    assert_eq!(result.wins + result.losses + result.ties, 30);
    assert!(result.win_rate >= 0.0 && result.win_rate <= 1.0);
    assert!(result.mean_computer_gems >= 0.0 && result.mean_computer_gems <= 6.0);
    assert!(result.mean_human_gems + result.mean_computer_gems <= 6.0);
    assert!(result.q_table_size > 0);
}

#[test]
fn test_observer_event_sequence() {
    let log = EventLog::default();
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 2,
        seed: Some(1),
    })
    .with_observer(Box::new(log.clone()));
    let mut game = Game::new(
        small_config(1).with_rounds(2),
        Box::new(QLearningStrategy::new(PolicyConfig::default())),
    )
    .unwrap();
    let mut human = GreedyStrategy::new("Human".to_string());

    pipeline.run(&mut game, &mut human).unwrap();

    let expected = [
        "start 2",
        "episode 0",
        "turn 1 Human",
        "turn 1 Computer",
        "turn 2 Human",
        "turn 2 Computer",
        "end 0 2",
        "episode 1",
        "turn 1 Human",
        "turn 1 Computer",
        "turn 2 Human",
        "turn 2 Computer",
        "end 1 2",
        "done",
    ];
    assert_eq!(log.events(), expected);
}

#[test]
fn test_table_persists_across_episodes() {
    let mut game = learning_game(8);
    let mut human = RandomStrategy::new("Human".to_string());

    let first = TrainingPipeline::new(TrainingConfig {
        episodes: 3,
        seed: Some(8),
    })
    .run(&mut game, &mut human)
    .unwrap();
    let second = TrainingPipeline::new(TrainingConfig {
        episodes: 3,
        seed: None,
    })
    .run(&mut game, &mut human)
    .unwrap();

    assert!(first.q_table_size > 0);
    assert!(second.q_table_size >= first.q_table_size);
}

#[test]
fn test_metrics_match_result() {
    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 12,
        seed: Some(3),
    })
    .with_observer(Box::new(SharedMetrics(Arc::clone(&metrics))));
    let mut game = learning_game(3);
    let mut human = GreedyStrategy::new("Human".to_string());

    let result = pipeline.run(&mut game, &mut human).unwrap();
    let summary = metrics.lock().unwrap().summary();

    assert_eq!(summary.total_episodes, result.total_episodes);
    assert_eq!(summary.wins, result.wins);
    assert_eq!(summary.losses, result.losses);
    assert_eq!(summary.ties, result.ties);
    assert!((summary.avg_computer_gems - result.mean_computer_gems).abs() < 1e-9);
}

#[test]
fn test_jsonl_and_result_files() {
    let dir = tempfile::tempdir().unwrap();
    let observations = dir.path().join("episodes.jsonl");

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 4,
        seed: Some(6),
    })
    .with_observer(Box::new(JsonlObserver::new(&observations).unwrap()));
    let mut game = learning_game(6);
    let mut human = RandomStrategy::new("Human".to_string());
    let result = pipeline.run(&mut game, &mut human).unwrap();

    let contents = std::fs::read_to_string(&observations).unwrap();
    assert_eq!(contents.lines().count(), 4);
    for line in contents.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["turns"].as_array().unwrap().len(), 20);
    }

    let saved = dir.path().join("result.json");
    result.save(&saved).unwrap();
    let loaded = TrainingResult::load(&saved).unwrap();
    assert_eq!(loaded.total_episodes, 4);
    assert_eq!(loaded.q_table_size, result.q_table_size);
}
