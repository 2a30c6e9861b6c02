//! Agent port - the two callbacks the game loop drives a policy through

use crate::types::{Direction, FinalObservation, Observation};

/// A policy the external game loop consults once per turn
///
/// The game loop calls [`Agent::decide`] at every decision point of an
/// episode and [`Agent::notify_episode_end`] exactly once after the terminal
/// frame. Calls are strictly sequential; an agent owns all of its state and
/// is never shared between concurrently stepped environments.
///
/// # Examples
///
/// ```
/// use pacman_qlearn::{
///     ports::Agent,
///     types::{Direction, FinalObservation, Observation},
/// };
///
/// struct AlwaysEast;
///
/// impl Agent for AlwaysEast {
///     fn decide(&mut self, observation: &Observation) -> Option<Direction> {
///         observation
///             .legal_actions
///             .contains(&Direction::East)
///             .then_some(Direction::East)
///     }
///
///     fn notify_episode_end(&mut self, _observation: &FinalObservation) {}
///
///     fn name(&self) -> &str {
///         "always-east"
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait Agent {
    /// Called before the first frame of an episode.
    fn start_episode(&mut self) {}

    /// Choose a move for the current frame.
    ///
    /// Returns `None` when no movement action is legal, which normally only
    /// happens on a terminal frame.
    fn decide(&mut self, observation: &Observation) -> Option<Direction>;

    /// Called once when an episode concludes.
    fn notify_episode_end(&mut self, observation: &FinalObservation);

    /// Used for identification in logs and results.
    fn name(&self) -> &str;

    /// Reseed the agent's random source.
    ///
    /// Pipelines call this when given a deterministic seed. Agents without
    /// randomness can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
