//! Discrete inputs from the human side and how the game answered them

use serde::{Deserialize, Serialize};

use crate::{
    maze::{Direction, Position},
    ports::TurnRecord,
};

/// Which special action a token is spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    PlaceWall,
    RemoveTrap,
    Teleport,
}

/// A single input from the human side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    /// `target` is an adjacent cell for walls and a visited cell for
    /// teleports; it is ignored for trap removal, which clears the trap
    /// returned by [`crate::agent::Agent::removable_trap`]. A wall without a
    /// target goes on the first empty neighbour in random order.
    UseToken {
        kind: TokenKind,
        target: Option<Position>,
    },
    Reset,
}

/// How the game responded to an [`Intent`]
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    /// The human acted; the computer moves next.
    Accepted(TurnRecord),
    /// The action was impossible. Nothing changed and it is still the
    /// human's turn.
    NoEffect,
    /// Not the human's turn: the computer is due or the game is over.
    Ignored,
    /// Board and agents were reinitialized.
    Reset,
}

impl IntentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IntentOutcome::Accepted(_))
    }
}
