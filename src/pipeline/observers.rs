//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the game loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    types::{Direction, EpisodeOutcome, FinalObservation, Observation},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        observation: &FinalObservation,
        _steps: usize,
    ) -> Result<()> {
        match observation.outcome {
            EpisodeOutcome::Win => self.wins += 1,
            EpisodeOutcome::Loss => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("{} L:{}", self.wins, self.losses));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} L:{}", self.wins, self.losses));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcomes, scores and episode lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    losses: usize,
    scores: Vec<f64>,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_episodes(&self) -> usize {
        self.scores.len()
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.wins as f64 / self.scores.len() as f64
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }

    /// Average number of decisions per episode
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Final scores in episode order
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            wins: self.wins,
            losses: self.losses,
            win_rate: self.win_rate(),
            average_score: self.average_score(),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub average_score: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        observation: &FinalObservation,
        steps: usize,
    ) -> Result<()> {
        match observation.outcome {
            EpisodeOutcome::Win => self.wins += 1,
            EpisodeOutcome::Loss => self.losses += 1,
        }
        self.scores.push(observation.score);
        self.episode_lengths.push(steps);
        Ok(())
    }
}

/// A single decision inside an exported episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub agent: (i32, i32),
    pub adversary: Option<(i32, i32)>,
    pub score: f64,
    pub action: Option<Direction>,
}

/// Complete record of one episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub final_score: f64,
    pub steps: Vec<StepRecord>,
}

/// JSONL observer - Writes one JSON object per finished episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_decision(
        &mut self,
        _episode: usize,
        step: usize,
        observation: &Observation,
        action: Option<Direction>,
    ) -> Result<()> {
        self.current_steps.push(StepRecord {
            step,
            agent: (observation.agent.x, observation.agent.y),
            adversary: observation.adversary.map(|p| (p.x, p.y)),
            score: observation.score,
            action,
        });
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        observation: &FinalObservation,
        _steps: usize,
    ) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            outcome: observation.outcome,
            final_score: observation.score,
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}
