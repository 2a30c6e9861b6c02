//! Tabular Q-learning for the pursuit game
//!
//! The agent learns Q(agent position, adversary position, action) from
//! repeated episodes and acts ε-greedily on it.
//!
//! ## Update rule
//!
//! After every decision the previous decision point is moved toward
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
//! ```
//!
//! where `r` is the score recorded at the previous decision. At the end of
//! an episode `max_a' Q(s',a')` is replaced by the final score.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`q_table`] | Sparse value table, 0.0 for unseen keys |
//! | [`policy`] | ε-greedy selection with random tie-breaking |
//! | [`memory`] | Previous-decision memory and episode phases |
//! | [`agent`] | Episode controller tying the three together |
//!
//! ## Usage Example
//!
//! ```no_run
//! use pacman_qlearn::{app::AgentConfig, q_learning::QLearnAgent};
//!
//! let config: AgentConfig = "alpha=0.2,epsilon=0.05,gamma=0.8,numTraining=100"
//!     .parse()
//!     .unwrap();
//! let agent = QLearnAgent::new(&config);
//! ```

pub mod agent;
pub mod memory;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{QLearnAgent, TRAINING_DONE_MESSAGE};
pub use memory::{EpisodeMemory, EpisodePhase, LearningMode, Transition};
pub use q_table::QTable;
