//! Baseline agents for comparison against the learner

use rand::{SeedableRng, random, rngs::StdRng};

use crate::{
    ports::Agent,
    q_learning::policy,
    types::{Direction, FinalObservation, Observation},
};

/// Uniformly random agent over the non-stop legal moves
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn decide(&mut self, observation: &Observation) -> Option<Direction> {
        let candidates = policy::movement_actions(&observation.legal_actions);
        policy::explore(&mut self.rng, &candidates)
    }

    fn notify_episode_end(&mut self, _observation: &FinalObservation) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
