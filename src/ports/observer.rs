//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats or metrics.

use crate::{
    Result,
    types::{Direction, FinalObservation, Observation},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_decision(...)` - For each decision the agent makes
///    - `on_episode_end(episode, final_observation, steps)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use pacman_qlearn::{ports::Observer, types::FinalObservation};
///
/// struct ScoreLog {
///     scores: Vec<f64>,
/// }
///
/// impl Observer for ScoreLog {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         observation: &FinalObservation,
///         _steps: usize,
///     ) -> pacman_qlearn::Result<()> {
///         self.scores.push(observation.score);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called before the first frame of an episode (0-based index).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the agent has chosen `action` for `observation`.
    fn on_decision(
        &mut self,
        _episode: usize,
        _step: usize,
        _observation: &Observation,
        _action: Option<Direction>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the agent has been told the episode ended.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _observation: &FinalObservation,
        _steps: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
