// src/simulation/mod.rs

//! Computes the unitary implemented by a `qsynth::circuits::Circuit`.
//! This module contains the `Simulator` entry point and the internal
//! `UnitaryEngine` that composes gate matrices.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::QsynthError;
use engine::UnitaryEngine;

/// Unitary simulator for gate-only circuits.
#[derive(Debug, Default)]
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// The empty circuit implements the identity on its register.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` holding the circuit's unitary.
    /// * `Err(QsynthError)` if the register is empty or too wide, or an
    ///   operation references a qubit the register does not have.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, QsynthError> {
        let mut engine = UnitaryEngine::init(circuit.num_qubits())?;

        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }

        Ok(SimulationResult::new(engine.into_unitary(), circuit.size()))
    }
}
