//! Training pipeline: runs an agent through episodes of an environment

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Agent, Environment, Observer, Step},
    types::{EpisodeOutcome, FinalObservation},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Decisions allowed per episode before the run is aborted
    pub max_steps_per_episode: usize,

    /// Random seed handed to the agent before the first episode
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10,
            max_steps_per_episode: 10_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Mean final score
    pub average_score: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(wins: usize, losses: usize, total_score: f64) -> Self {
        let total_episodes = wins + losses;
        let (win_rate, average_score) = if total_episodes > 0 {
            (
                wins as f64 / total_episodes as f64,
                total_score / total_episodes as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_episodes,
            wins,
            losses,
            win_rate,
            average_score,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single agent in a single environment
///
/// The pipeline is the game loop: it calls `decide` once per frame and
/// `notify_episode_end` once per episode, strictly in sequence.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run `num_episodes` episodes and tally the outcomes
    pub fn run(
        &mut self,
        agent: &mut dyn Agent,
        environment: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        let mut wins = 0;
        let mut losses = 0;
        let mut total_score = 0.0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode in 0..self.config.num_episodes {
            let outcome = match self.play_episode(episode, agent, environment) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("{} aborted in episode {episode}: {err}", agent.name());
                    return Err(err);
                }
            };

            match outcome.outcome {
                EpisodeOutcome::Win => wins += 1,
                EpisodeOutcome::Loss => losses += 1,
            }
            total_score += outcome.score;
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(wins, losses, total_score))
    }

    fn play_episode(
        &mut self,
        episode: usize,
        agent: &mut dyn Agent,
        environment: &mut dyn Environment,
    ) -> Result<FinalObservation> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        agent.start_episode();
        let mut observation = environment.reset()?;
        let mut step = 0;

        let final_observation = loop {
            if step >= self.config.max_steps_per_episode {
                return Err(Error::StepLimitExceeded {
                    episode,
                    limit: self.config.max_steps_per_episode,
                });
            }

            let action = agent.decide(&observation);
            for observer in &mut self.observers {
                observer.on_decision(episode, step, &observation, action)?;
            }
            step += 1;

            match environment.step(action)? {
                Step::Continue(next) => observation = next,
                Step::Terminal(final_observation) => break final_observation,
            }
        };

        agent.notify_episode_end(&final_observation);

        for observer in &mut self.observers {
            observer.on_episode_end(episode, &final_observation, step)?;
        }

        Ok(final_observation)
    }
}
