//! Per-episode memory of the previous decision

use crate::types::{Direction, Position, TableKey};

/// The most recent decision point of the current episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub agent: Position,
    pub adversary: Position,
    /// `None` when the decision point offered no movement action.
    pub action: Option<Direction>,
    /// Running score captured at the decision, used as the reward of the
    /// next update.
    pub score: f64,
}

/// Previous-transition memory owned by the policy engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EpisodeMemory {
    #[default]
    Empty,
    Populated(Transition),
}

impl EpisodeMemory {
    /// Value-table key the next update writes to.
    ///
    /// `Empty` still maps to a key: the first update of every episode is
    /// applied to [`TableKey::NoPrevious`] rather than skipped.
    pub fn table_key(&self) -> TableKey {
        match self {
            EpisodeMemory::Empty => TableKey::NoPrevious,
            EpisodeMemory::Populated(t) => TableKey::Decision {
                agent: t.agent,
                adversary: t.adversary,
                action: t.action,
            },
        }
    }

    /// Reward for the next update: the score snapshot, 0.0 when empty.
    pub fn reward(&self) -> f64 {
        match self {
            EpisodeMemory::Empty => 0.0,
            EpisodeMemory::Populated(t) => t.score,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EpisodeMemory::Empty)
    }

    pub fn clear(&mut self) {
        *self = EpisodeMemory::Empty;
    }
}

/// Where the controller is within an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodePhase {
    #[default]
    AwaitingFirstDecision,
    InEpisode,
    EpisodeEnded,
}

/// Whether the agent is still learning
///
/// Switches to `Evaluation` once, when the training budget is spent, and
/// never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearningMode {
    #[default]
    Training,
    Evaluation,
}
