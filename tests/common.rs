//! Common test utilities for the pacman_qlearn test suite.
//!
//! Provides a tiny deterministic pursuit game used to drive agents through
//! complete episodes.

#![allow(dead_code)]

use pacman_qlearn::{
    Error, Result,
    ports::{Environment, Step},
    types::{Direction, EpisodeOutcome, FinalObservation, Observation, Position},
};

pub const FOOD_REWARD: f64 = 500.0;
pub const CAUGHT_PENALTY: f64 = 500.0;
pub const TIME_PENALTY: f64 = 1.0;

/// One-row corridor `0..length` at `y = 1`.
///
/// The agent starts at x = 1 with the ghost at x = 0 and food at the far
/// end. After every agent move the ghost steps one cell toward the agent.
/// Reaching the food wins; sharing a cell with the ghost loses. Each move
/// costs one point.
pub struct Corridor {
    length: i32,
    agent: i32,
    ghost: i32,
    score: f64,
    track_ghost: bool,
    finished: bool,
}

impl Corridor {
    pub fn new(length: i32) -> Self {
        assert!(length >= 3, "corridor needs room for ghost, agent and food");
        Self {
            length,
            agent: 1,
            ghost: 0,
            score: 0.0,
            track_ghost: true,
            finished: false,
        }
    }

    /// Report no adversary in observations, as a ghost-free maze would.
    pub fn without_ghost_tracking(mut self) -> Self {
        self.track_ghost = false;
        self
    }

    fn observation(&self) -> Observation {
        let mut legal = vec![Direction::Stop];
        if self.agent + 1 < self.length {
            legal.push(Direction::East);
        }
        if self.agent > 0 {
            legal.push(Direction::West);
        }

        let obs = Observation::new((self.agent, 1), self.score).with_legal_actions(legal);
        if self.track_ghost {
            obs.with_adversary((self.ghost, 1))
        } else {
            obs
        }
    }

    fn end(&mut self, outcome: EpisodeOutcome) -> Step {
        self.finished = true;
        Step::Terminal(FinalObservation::new(self.score, outcome))
    }
}

impl Environment for Corridor {
    fn reset(&mut self) -> Result<Observation> {
        self.agent = 1;
        self.ghost = 0;
        self.score = 0.0;
        self.finished = false;
        Ok(self.observation())
    }

    fn step(&mut self, action: Option<Direction>) -> Result<Step> {
        if self.finished {
            return Err(Error::EnvironmentFailure {
                message: "corridor stepped after the episode ended".to_string(),
            });
        }

        let (dx, _) = action.map(Direction::delta).unwrap_or((0, 0));
        self.agent = (self.agent + dx).clamp(0, self.length - 1);
        self.score -= TIME_PENALTY;

        if self.agent == self.ghost {
            self.score -= CAUGHT_PENALTY;
            return Ok(self.end(EpisodeOutcome::Loss));
        }
        if self.agent == self.length - 1 {
            self.score += FOOD_REWARD;
            return Ok(self.end(EpisodeOutcome::Win));
        }

        self.ghost += (self.agent - self.ghost).signum();
        if self.agent == self.ghost {
            self.score -= CAUGHT_PENALTY;
            return Ok(self.end(EpisodeOutcome::Loss));
        }

        Ok(Step::Continue(self.observation()))
    }
}

pub fn start_position() -> Position {
    Position::new(1, 1)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
