//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! The game and training pipeline depend only on these traits; concrete
//! strategies and observers are adapters plugged in at construction.

pub mod observer;
pub mod strategy;

pub use observer::Observer;
pub use strategy::{Strategy, TurnRecord};
