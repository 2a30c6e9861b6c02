//! Environment port - the external game engine

use crate::{
    Result,
    types::{Direction, FinalObservation, Observation},
};

/// Outcome of advancing the game by one agent move
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The game continues; the agent decides again on this frame.
    Continue(Observation),
    /// The episode is over.
    Terminal(FinalObservation),
}

/// Game engine that supplies observations and applies moves
///
/// Maze layout, adversary movement, legality and scoring all live behind
/// this trait. The training pipeline only sees observations.
pub trait Environment {
    /// Start a new episode and return its first frame.
    fn reset(&mut self) -> Result<Observation>;

    /// Apply the agent's move (`None` when the agent had no legal move)
    /// and advance the adversary.
    fn step(&mut self, action: Option<Direction>) -> Result<Step>;
}
