// src/agent/q_table.rs

use crate::core::{QsynthError, QsynthResult};

/// Dense `states × actions` table of action values, zero-initialized and
/// never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    states: usize,
    actions: usize,
    values: Vec<f64>,
}

impl QTable {
    pub fn new(states: usize, actions: usize) -> Self {
        Self {
            states,
            actions,
            values: vec![0.0; states * actions],
        }
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    /// All action values for `state`.
    pub fn row(&self, state: usize) -> QsynthResult<&[f64]> {
        self.check_state(state)?;
        let start = state * self.actions;
        Ok(&self.values[start..start + self.actions])
    }

    pub fn get(&self, state: usize, action: usize) -> QsynthResult<f64> {
        Ok(self.row(state)?[self.check_action(action)?])
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) -> QsynthResult<()> {
        self.check_state(state)?;
        let action = self.check_action(action)?;
        self.values[state * self.actions + action] = value;
        Ok(())
    }

    /// `max_a Q[state, a]`.
    pub fn max_value(&self, state: usize) -> QsynthResult<f64> {
        Ok(self.row(state)?.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// `argmax_a Q[state, a]`; ties go to the lowest action index.
    pub fn best_action(&self, state: usize) -> QsynthResult<usize> {
        let row = self.row(state)?;
        let mut best = 0;
        for (action, value) in row.iter().enumerate().skip(1) {
            if *value > row[best] {
                best = action;
            }
        }
        Ok(best)
    }

    fn check_state(&self, state: usize) -> QsynthResult<()> {
        if state < self.states {
            Ok(())
        } else {
            Err(QsynthError::StateOutOfRange {
                index: state,
                state_size: self.states,
            })
        }
    }

    fn check_action(&self, action: usize) -> QsynthResult<usize> {
        if action < self.actions {
            Ok(action)
        } else {
            Err(QsynthError::ActionOutOfRange {
                index: action,
                action_size: self.actions,
            })
        }
    }
}
