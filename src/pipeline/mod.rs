//! Training pipeline abstractions
//!
//! This module provides:
//! - Multi-episode training of the computer strategy against a scripted
//!   human stand-in
//! - Observers recording progress, metrics and per-turn traces

pub mod observers;
pub mod training;

pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
    TurnObservation,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Observer, Strategy};
