//! Q-learning agent
//!
//! Drives the value table through one episode at a time: every decision
//! first updates the previous decision point, then remembers the current
//! one; the end of an episode applies the terminal update and counts the
//! episode against the training budget.

use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    app::{AgentConfig, Hyperparameters},
    ports::Agent,
    q_learning::{
        memory::{EpisodeMemory, EpisodePhase, LearningMode, Transition},
        policy,
        q_table::QTable,
    },
    types::{Direction, FinalObservation, Observation, Position},
};

/// Notice emitted once, when the training budget is spent.
pub const TRAINING_DONE_MESSAGE: &str = "Training Done (turning off epsilon and alpha)";

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent keyed on (agent position, adversary position, action)
///
/// The reward of each update is the running score captured at the previous
/// decision, not the score difference between frames, and the bootstrap at
/// episode end is the final score itself.
///
/// # Examples
///
/// ```
/// use pacman_qlearn::{
///     app::AgentConfig,
///     q_learning::QLearnAgent,
///     types::{Direction, EpisodeOutcome, FinalObservation, Observation, Position},
/// };
///
/// let config = AgentConfig::default().with_epsilon(0.0).with_seed(7);
/// let mut agent = QLearnAgent::new(&config);
///
/// let frame = Observation::new((1, 1), 5.0)
///     .with_adversary((2, 2))
///     .with_legal_actions([Direction::East, Direction::Stop]);
/// assert_eq!(agent.decide(&frame), Some(Direction::East));
///
/// agent.notify_episode_end(&FinalObservation::new(10.0, EpisodeOutcome::Win));
/// let q = agent.lookup(Position::new(1, 1), Position::new(2, 2), Direction::East);
/// assert!((q - 2.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct QLearnAgent<R = StdRng> {
    q_table: QTable,
    params: Hyperparameters,
    num_training: usize,
    episodes_so_far: usize,
    memory: EpisodeMemory,
    phase: EpisodePhase,
    mode: LearningMode,
    rng: R,
}

impl QLearnAgent<StdRng> {
    /// Create an agent seeded from `config.seed`, or from OS entropy if unset.
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_rng(config, build_rng(config.seed))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for QLearnAgent<StdRng> {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

impl<R: Rng> QLearnAgent<R> {
    /// Create an agent drawing exploration and tie-break randomness from `rng`.
    pub fn with_rng(config: &AgentConfig, rng: R) -> Self {
        Self {
            q_table: QTable::new(),
            params: config.hyperparameters(),
            num_training: config.num_training,
            episodes_so_far: 0,
            memory: EpisodeMemory::Empty,
            phase: EpisodePhase::AwaitingFirstDecision,
            mode: LearningMode::Training,
            rng,
        }
    }

    /// Mark the start of a new episode.
    ///
    /// Optional: the first [`decide`](Self::decide) after an episode end
    /// starts the next episode on its own.
    pub fn start_episode(&mut self) {
        self.memory.clear();
        self.phase = EpisodePhase::AwaitingFirstDecision;
    }

    /// Choose an action for the current frame and learn from the previous one.
    ///
    /// The previous decision point is updated toward
    /// `previous score + γ · max_a Q(current state, a)`. On the first decision
    /// of an episode there is no previous point and the update lands on the
    /// `NoPrevious` sentinel entry instead of being skipped.
    pub fn decide(&mut self, observation: &Observation) -> Option<Direction> {
        let agent = observation.agent;
        let adversary = observation.adversary_or_origin();
        let candidates = policy::movement_actions(&observation.legal_actions);

        let table = &self.q_table;
        let value_of = |action: Direction| table.lookup(agent, adversary, action);
        let action =
            policy::select_action(&mut self.rng, self.params.epsilon, &candidates, value_of);
        let next_value = policy::best_value(&candidates, value_of);

        self.learn(next_value);

        trace!(
            "decide agent={agent} adversary={adversary} score={} -> {action:?}",
            observation.score
        );

        self.memory = EpisodeMemory::Populated(Transition {
            agent,
            adversary,
            action,
            score: observation.score,
        });
        self.phase = EpisodePhase::InEpisode;

        action
    }

    /// Apply the terminal update and count the finished episode.
    ///
    /// The previous decision point is updated toward
    /// `previous score + γ · final score`. When the number of finished
    /// episodes reaches the training budget, α and ε are set to zero for the
    /// rest of the run.
    pub fn notify_episode_end(&mut self, observation: &FinalObservation) {
        self.learn(observation.score);

        self.memory.clear();
        self.phase = EpisodePhase::EpisodeEnded;
        self.episodes_so_far += 1;

        debug!(
            "episode {} ended ({:?}, score {}), {} q-values stored",
            self.episodes_so_far,
            observation.outcome,
            observation.score,
            self.q_table.len()
        );

        if self.episodes_so_far == self.num_training {
            self.finish_training();
        }
    }

    fn learn(&mut self, next_value: f64) -> f64 {
        let key = self.memory.table_key();
        let reward = self.memory.reward();
        let new_q = self
            .q_table
            .temporal_difference(key, reward, next_value, &self.params);
        trace!("update {key:?} reward={reward} next={next_value} -> {new_q}");
        new_q
    }

    fn finish_training(&mut self) {
        info!("{TRAINING_DONE_MESSAGE}");
        self.params.alpha = 0.0;
        self.params.epsilon = 0.0;
        self.mode = LearningMode::Evaluation;
    }

    /// Stored Q-value for a decision triple, 0.0 if never written.
    pub fn lookup(&self, agent: Position, adversary: Position, action: Direction) -> f64 {
        self.q_table.lookup(agent, adversary, action)
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.params
    }

    pub fn alpha(&self) -> f64 {
        self.params.alpha
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    pub fn gamma(&self) -> f64 {
        self.params.gamma
    }

    pub fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    pub fn num_training(&self) -> usize {
        self.num_training
    }

    pub fn memory(&self) -> &EpisodeMemory {
        &self.memory
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn mode(&self) -> LearningMode {
        self.mode
    }

    pub fn is_training(&self) -> bool {
        self.mode == LearningMode::Training
    }
}

impl<R: Rng + SeedableRng + 'static> Agent for QLearnAgent<R> {
    fn start_episode(&mut self) {
        QLearnAgent::start_episode(self);
    }

    fn decide(&mut self, observation: &Observation) -> Option<Direction> {
        QLearnAgent::decide(self, observation)
    }

    fn notify_episode_end(&mut self, observation: &FinalObservation) {
        QLearnAgent::notify_episode_end(self, observation);
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
