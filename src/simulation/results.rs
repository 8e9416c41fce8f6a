// src/simulation/results.rs
use crate::core::Unitary;
use std::fmt;

/// Holds the results of a circuit simulation: the operator the circuit implements.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    unitary: Unitary,
    gate_count: usize,
}

impl SimulationResult {
    pub(crate) fn new(unitary: Unitary, gate_count: usize) -> Self {
        Self { unitary, gate_count }
    }

    /// The circuit's overall unitary.
    pub fn unitary(&self) -> &Unitary {
        &self.unitary
    }

    /// Consumes the result, returning the unitary.
    pub fn into_unitary(self) -> Unitary {
        self.unitary
    }

    /// Number of gates that were composed.
    pub fn gate_count(&self) -> usize {
        self.gate_count
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({} gates):", self.gate_count)?;
        write!(f, "{}", self.unitary)
    }
}
