//! Observer port - abstraction for training observation
//!
//! Observers receive training events without the pipeline knowing how they
//! are displayed or aggregated.

use crate::{Result, game::EpisodeSummary, maze::Side, ports::TurnRecord};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_turn(...)` - For each turn taken by either side
///    - `on_episode_end(episode, summary)`
/// 3. `on_training_end()` - Once at the end
///
/// Every method defaults to doing nothing.
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a side has acted in `round` (1-based).
    fn on_turn(
        &mut self,
        _episode: usize,
        _round: u32,
        _side: Side,
        _turn: &TurnRecord,
    ) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Use this to finalize outputs or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
