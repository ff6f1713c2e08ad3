//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::Action,
    game::{EpisodeSummary, GameResult},
    maze::Side,
    ports::{Observer, TurnRecord},
};

/// One turn as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnObservation {
    pub round: u32,
    pub side: Side,
    pub action: Action,
    pub applied: bool,
    pub gem_collected: bool,
    pub trap_triggered: bool,
}

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub episode: usize,
    pub summary: EpisodeSummary,
    pub turns: Vec<TurnObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
    ties: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} L:{} T:{}", self.wins, self.losses, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        match summary.result {
            GameResult::ComputerWins => self.wins += 1,
            GameResult::HumanWins => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics from the computer's side
pub struct MetricsObserver {
    wins: usize,
    losses: usize,
    ties: usize,
    total_episodes: usize,
    human_gems: u64,
    computer_gems: u64,
    human_score: i64,
    computer_score: i64,
    tokens_spent: [usize; 2],
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            wins: 0,
            losses: 0,
            ties: 0,
            total_episodes: 0,
            human_gems: 0,
            computer_gems: 0,
            human_score: 0,
            computer_score: 0,
            tokens_spent: [0; 2],
        }
    }

    fn per_episode(&self, total: f64) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            total / self.total_episodes as f64
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        self.per_episode(self.wins as f64)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        self.per_episode(self.losses as f64)
    }

    /// Get current tie rate
    pub fn tie_rate(&self) -> f64 {
        self.per_episode(self.ties as f64)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
            win_rate: self.win_rate(),
            loss_rate: self.loss_rate(),
            tie_rate: self.tie_rate(),
            avg_human_gems: self.per_episode(self.human_gems as f64),
            avg_computer_gems: self.per_episode(self.computer_gems as f64),
            avg_human_score: self.per_episode(self.human_score as f64),
            avg_computer_score: self.per_episode(self.computer_score as f64),
            human_tokens_spent: self.tokens_spent[0],
            computer_tokens_spent: self.tokens_spent[1],
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub tie_rate: f64,
    pub avg_human_gems: f64,
    pub avg_computer_gems: f64,
    pub avg_human_score: f64,
    pub avg_computer_score: f64,
    pub human_tokens_spent: usize,
    pub computer_tokens_spent: usize,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_turn(
        &mut self,
        _episode: usize,
        _round: u32,
        side: Side,
        turn: &TurnRecord,
    ) -> Result<()> {
        if turn.report.token_spent {
            let index = match side {
                Side::Human => 0,
                Side::Computer => 1,
            };
            self.tokens_spent[index] += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.total_episodes += 1;
        match summary.result {
            GameResult::ComputerWins => self.wins += 1,
            GameResult::HumanWins => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }
        self.human_gems += u64::from(summary.human_gems);
        self.computer_gems += u64::from(summary.computer_gems);
        self.human_score += i64::from(summary.human_score);
        self.computer_score += i64::from(summary.computer_score);
        Ok(())
    }
}

/// JSONL observer - Exports observations to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_turns: Vec<TurnObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current_turns: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_turns.clear();
        Ok(())
    }

    fn on_turn(&mut self, _episode: usize, round: u32, side: Side, turn: &TurnRecord) -> Result<()> {
        self.current_turns.push(TurnObservation {
            round,
            side,
            action: turn.action,
            applied: turn.report.applied,
            gem_collected: turn.report.gem_collected,
            trap_triggered: turn.report.trap_triggered,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        let observation = Observation {
            episode,
            summary: *summary,
            turns: std::mem::take(&mut self.current_turns),
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}
