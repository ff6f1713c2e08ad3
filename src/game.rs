//! The turn loop: one board, one human side, one computer side

pub mod intent;
pub mod session;

pub use intent::{Intent, IntentOutcome, TokenKind};
pub use session::{EpisodeSummary, Game, GameResult, Phase, RoundRecord};
