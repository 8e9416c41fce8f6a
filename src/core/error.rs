// src/core/error.rs

//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Index of a qubit inside the fixed register an environment builds circuits on.
/// Qubit 0 is the least significant bit of a computational basis index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures raised while building circuits, simulating them, or learning over them.
///
/// None of these are retried: the training loop propagates them with `?`
/// and the run ends.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum QsynthError {
    /// A gate application is malformed (e.g. control and target coincide).
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A gate references a qubit outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// Offending qubit
        qubit: QubitId,
        /// Width of the register
        num_qubits: usize,
    },

    /// The simulator could not produce a unitary for the circuit.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid Configuration: {message}")]
    InvalidConfig {
        /// InvalidConfig failure message
        message: String,
    },

    /// A state index does not address a row of the Q-table.
    #[error("State index {index} out of range for {state_size} states")]
    StateOutOfRange { index: usize, state_size: usize },

    /// An action index does not address the action catalog.
    #[error("Action index {index} out of range for {action_size} actions")]
    ActionOutOfRange { index: usize, action_size: usize },

    /// The state index table is full; allocating another index would
    /// address a Q-table row that does not exist.
    #[error("State space exhausted: all {capacity} state indices are allocated")]
    StateSpaceExhausted { capacity: usize },

    /// A matrix expected to be unitary deviates from `U†U = I`.
    #[error("Matrix is not unitary: max deviation {deviation:.3e}")]
    NotUnitary { deviation: f64 },
}

/// Result alias used throughout the crate.
pub type QsynthResult<T> = Result<T, QsynthError>;
