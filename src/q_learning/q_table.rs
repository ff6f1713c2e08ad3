//! Q-table implementation for the learning agent

use std::collections::HashMap;

use crate::agent::Action;

use super::state::MazeState;

/// Q-table mapping (state, action) pairs to Q-values.
///
/// Entries are created lazily from a caller-supplied seed the first time a
/// pair is evaluated and are never removed except by [`QTable::reset`].
#[derive(Debug, Clone)]
pub struct QTable {
    q_values: HashMap<(MazeState, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get the stored Q-value, if the pair has been evaluated
    pub fn get(&self, state: &MazeState, action: Action) -> Option<f64> {
        self.q_values.get(&(*state, action)).copied()
    }

    /// Get the Q-value, storing `seed()` first if the pair is unseen
    pub fn get_or_seed(
        &mut self,
        state: &MazeState,
        action: Action,
        seed: impl FnOnce() -> f64,
    ) -> f64 {
        *self.q_values.entry((*state, action)).or_insert_with(seed)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: MazeState, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Select the greedy action (highest Q-value) from legal actions.
    ///
    /// Unseen pairs are seeded with `seed(action)` before comparison. Ties go
    /// to the earliest action in `legal_actions`. Returns `None` only when
    /// `legal_actions` is empty.
    pub fn greedy_action(
        &mut self,
        state: &MazeState,
        legal_actions: &[Action],
        mut seed: impl FnMut(Action) -> f64,
    ) -> Option<(Action, f64)> {
        let mut best: Option<(Action, f64)> = None;
        for &action in legal_actions {
            let value = self.get_or_seed(state, action, || seed(action));
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The pair must already hold a value; an unseen pair is treated as 0.
    /// Returns the new value.
    pub fn q_learning_update(
        &mut self,
        state: MazeState,
        action: Action,
        reward: f64,
        max_next_q: f64,
    ) -> f64 {
        let current_q = self.get(&state, action).unwrap_or(0.0);
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Reset all Q-values
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}
