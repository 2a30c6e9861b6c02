//! Configuration types for agent creation.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    str::FromStr,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Learning rate, exploration rate and discount factor.
///
/// These are the values the policy engine reads on every decision. Only the
/// training-budget cutoff ever changes them after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use pacman_qlearn::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_alpha(0.5)
///     .with_num_training(200)
///     .with_seed(42);
/// assert_eq!(config.epsilon, 0.025);
///
/// let parsed: AgentConfig = "alpha=0.5,numTraining=200".parse().unwrap();
/// assert_eq!(parsed.alpha, 0.5);
/// assert_eq!(parsed.num_training, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Number of episodes after which learning and exploration switch off
    pub num_training: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_ALPHA: f64 = 0.2;
    pub const DEFAULT_EPSILON: f64 = 0.025;
    pub const DEFAULT_GAMMA: f64 = 0.8;
    pub const DEFAULT_NUM_TRAINING: usize = 10;

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_num_training(mut self, num_training: usize) -> Self {
        self.num_training = num_training;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters {
            alpha: self.alpha,
            epsilon: self.epsilon,
            gamma: self.gamma,
        }
    }

    /// Check that α, ε and γ are finite and lie in `[0, 1]`.
    ///
    /// Agents accept any value without calling this; it is for callers that
    /// take configuration from untrusted input.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("epsilon", self.epsilon),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).context("Failed to deserialize agent config")
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, self).context("Failed to serialize agent config")?;

        Ok(())
    }

    fn apply_argument(&mut self, key: &str, value: &str, argument: &str) -> Result<()> {
        match key {
            "alpha" => self.alpha = parse_value(argument, value)?,
            "epsilon" => self.epsilon = parse_value(argument, value)?,
            "gamma" => self.gamma = parse_value(argument, value)?,
            "numTraining" | "num_training" => self.num_training = parse_value(argument, value)?,
            "seed" => self.seed = Some(parse_value(argument, value)?),
            _ => {
                return Err(Error::ParseAgentArgument {
                    argument: argument.to_string(),
                    reason: format!("unknown key '{key}'"),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T>(argument: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| Error::ParseAgentArgument {
        argument: argument.to_string(),
        reason: e.to_string(),
    })
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            epsilon: Self::DEFAULT_EPSILON,
            gamma: Self::DEFAULT_GAMMA,
            num_training: Self::DEFAULT_NUM_TRAINING,
            seed: None,
        }
    }
}

/// Parses the game engine's agent-argument string, e.g.
/// `alpha=0.1,epsilon=0.05,gamma=0.9,numTraining=100`.
impl FromStr for AgentConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut config = AgentConfig::default();
        for argument in s.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let (key, value) =
                argument
                    .split_once('=')
                    .ok_or_else(|| Error::ParseAgentArgument {
                        argument: argument.to_string(),
                        reason: "expected key=value".to_string(),
                    })?;
            config.apply_argument(key.trim(), value.trim(), argument)?;
        }
        Ok(config)
    }
}
