// src/agent/mod.rs

//! Tabular Q-learning agent with epsilon-greedy exploration.

mod catalog;
mod q_table;

pub use catalog::ActionCatalog;
pub use q_table::QTable;

use crate::core::constants::qsynth_constants::{
    ALPHA, DECAY_RATE, EPSILON, EPSILON_MIN, GAMMA, STATE_BUCKETS,
};
use crate::core::{QsynthError, QsynthResult};
use crate::operations::Operation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Learning hyperparameters. `Default` carries the classroom values.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Rows of the Q-table.
    pub state_size: usize,
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Initial exploration rate.
    pub epsilon: f64,
    /// Multiplier applied to epsilon once per episode.
    pub decay_rate: f64,
    /// Floor for epsilon.
    pub epsilon_min: f64,
    /// Seed for action sampling; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            state_size: STATE_BUCKETS,
            alpha: ALPHA,
            gamma: GAMMA,
            epsilon: EPSILON,
            decay_rate: DECAY_RATE,
            epsilon_min: EPSILON_MIN,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> QsynthResult<()> {
        if self.state_size == 0 {
            return invalid("state_size must be positive".to_string());
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
            ("decay_rate", self.decay_rate),
            ("epsilon_min", self.epsilon_min),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{} = {} outside [0, 1]", name, value));
            }
        }
        if self.epsilon_min > self.epsilon {
            return invalid(format!(
                "epsilon_min ({}) exceeds epsilon ({})",
                self.epsilon_min, self.epsilon
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> QsynthResult<()> {
    Err(QsynthError::InvalidConfig { message })
}

/// Q-learning agent over a dense `state_size × catalog.len()` table.
#[derive(Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    epsilon: f64,
    q_table: QTable,
    catalog: ActionCatalog,
    rng: StdRng,
}

impl QLearningAgent {
    /// Creates an agent with an all-zero Q-table.
    pub fn new(config: AgentConfig, catalog: ActionCatalog) -> QsynthResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            epsilon: config.epsilon,
            q_table: QTable::new(config.state_size, catalog.len()),
            catalog,
            rng,
            config,
        })
    }

    /// Epsilon-greedy selection.
    ///
    /// With probability `epsilon` a uniformly random action index, otherwise
    /// the greedy one. Returns the action together with its index.
    pub fn choose_action(&mut self, state: usize) -> QsynthResult<(Operation, usize)> {
        // Validate the state even when exploring.
        self.q_table.row(state)?;
        let index = if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(0..self.catalog.len())
        } else {
            self.q_table.best_action(state)?
        };
        Ok((*self.catalog.get(index)?, index))
    }

    /// Greedy selection, ignoring epsilon. Ties go to the lowest index.
    pub fn greedy_action(&self, state: usize) -> QsynthResult<(Operation, usize)> {
        let index = self.q_table.best_action(state)?;
        Ok((*self.catalog.get(index)?, index))
    }

    /// One-step Q-learning update:
    /// `Q[s,a] += alpha * (reward + gamma * max_a' Q[s',a'] - Q[s,a])`.
    pub fn update_q_table(&mut self, state: usize, action: usize, reward: f64, next_state: usize) -> QsynthResult<()> {
        let current = self.q_table.get(state, action)?;
        let next_best = self.q_table.max_value(next_state)?;
        let updated = current + self.config.alpha * (reward + self.config.gamma * next_best - current);
        self.q_table.set(state, action, updated)
    }

    /// `epsilon ← max(epsilon_min, epsilon * decay_rate)`.
    pub fn decay_exploration(&mut self) {
        self.epsilon = self.config.epsilon_min.max(self.epsilon * self.config.decay_rate);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
