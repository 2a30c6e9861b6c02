//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::{
    app::Hyperparameters,
    types::{Direction, Position, StateKey, TableKey},
};

/// Q-table mapping (agent, adversary, action) keys to Q-values
///
/// Unseen keys read as 0.0 and are only materialized on first write.
/// Entries are never removed for the lifetime of the table.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    q_values: HashMap<TableKey, f64>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Q-value for a decision triple, or 0.0 if never written
    pub fn lookup(&self, agent: Position, adversary: Position, action: Direction) -> f64 {
        self.get(&StateKey::new(agent, adversary, action).into())
    }

    /// Overwrite (or create) the Q-value for a decision triple
    pub fn update(&mut self, agent: Position, adversary: Position, action: Direction, value: f64) {
        self.set(StateKey::new(agent, adversary, action).into(), value);
    }

    pub fn get(&self, key: &TableKey) -> f64 {
        self.q_values.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: TableKey, value: f64) {
        self.q_values.insert(key, value);
    }

    /// Temporal-difference update toward `reward + γ·next_value`
    ///
    /// Q(k) ← Q(k) + α[r + γ·next_value − Q(k)]
    ///
    /// The entry is written even when α is zero. Returns the new value.
    pub fn temporal_difference(
        &mut self,
        key: TableKey,
        reward: f64,
        next_value: f64,
        params: &Hyperparameters,
    ) -> f64 {
        let current_q = self.get(&key);
        let td_target = reward + params.gamma * next_value;
        let td_error = td_target - current_q;
        let new_q = current_q + params.alpha * td_error;
        self.set(key, new_q);
        new_q
    }

    pub fn contains(&self, key: &TableKey) -> bool {
        self.q_values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableKey, &f64)> {
        self.q_values.iter()
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
