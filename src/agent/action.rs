//! Actions an agent can attempt on its turn

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::maze::{Direction, Position};

/// A single turn's action.
///
/// Wall placement is relative to the acting agent; teleport names an absolute
/// destination. `Stay` is only chosen when nothing else is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    PlaceWall(Direction),
    RemoveTrap,
    Teleport(Position),
    Stay,
}

impl Action {
    /// Whether a successful use of this action spends a token
    pub fn uses_token(self) -> bool {
        matches!(
            self,
            Action::PlaceWall(_) | Action::RemoveTrap | Action::Teleport(_)
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(direction) => write!(f, "move {direction:?}"),
            Action::PlaceWall(direction) => write!(f, "wall {direction:?}"),
            Action::RemoveTrap => write!(f, "remove trap"),
            Action::Teleport(target) => write!(f, "teleport {target}"),
            Action::Stay => write!(f, "stay"),
        }
    }
}

/// What actually happened when an action was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionReport {
    /// False when the action was impossible and nothing changed
    pub applied: bool,
    pub token_spent: bool,
    pub gem_collected: bool,
    /// The agent ended its action standing on a trap
    pub trap_triggered: bool,
}

impl ActionReport {
    pub(crate) fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }
}
