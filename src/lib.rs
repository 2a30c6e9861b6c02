//! Tabular Q-learning policy for a grid pursuit/evasion game
//!
//! This crate provides:
//! - A sparse Q-table keyed on (agent position, adversary position, action)
//! - ε-greedy action selection with uniform random tie-breaking
//! - An episode controller that learns from running scores and freezes
//!   itself once its training budget is spent
//! - Ports for plugging in an external game engine and training observers
//!
//! The maze itself (layout, legal moves, scoring, adversary behaviour) is
//! supplied by the caller through [`ports::Environment`].

pub mod app;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use app::AgentConfig;
pub use error::{Error, Result};
pub use q_learning::{QLearnAgent, QTable};
pub use types::{Direction, EpisodeOutcome, FinalObservation, Observation, Position, StateKey};
