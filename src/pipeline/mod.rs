//! Training pipeline abstractions
//!
//! This module provides:
//! - The episode loop that drives an agent through an environment
//! - Observers for progress, metrics and JSONL export
//! - A random baseline agent

pub mod baseline;
pub mod observers;
pub mod training;

pub use baseline::RandomAgent;
pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, StepRecord,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Environment, Observer, Step};
