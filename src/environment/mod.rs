// src/environment/mod.rs

//! The circuit-building environment the agent interacts with.
//!
//! Each episode starts from the empty circuit. Every step appends one gate,
//! re-simulates the whole circuit, and scores it against a fixed target.
//! Circuits are mapped to small integer states through
//! [`CircuitFingerprint`] buckets and a bounded [`StateIndexTable`].

mod state_table;
mod target;

pub use state_table::StateIndexTable;
pub use target::TargetGate;

use crate::circuits::Circuit;
use crate::core::constants::qsynth_constants::{
    FIDELITY_THRESHOLD, GATE_PENALTY, NUM_QUBITS, STATE_BUCKETS, SUCCESS_BONUS,
};
use crate::core::{QsynthError, QsynthResult, Unitary};
use crate::fingerprint::CircuitFingerprint;
use crate::operations::Operation;
use crate::simulation::Simulator;
use crate::validation::process_fidelity;
use tracing::{debug, trace};

/// Environment settings. `Default` reproduces the classroom setup:
/// two qubits, iSWAP target, 100 buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub num_qubits: usize,
    pub target: TargetGate,
    /// Number of fingerprint buckets.
    pub state_buckets: usize,
    /// Maximum number of dense state indices; should equal the agent's state size.
    pub state_capacity: usize,
    pub fidelity_threshold: f64,
    pub gate_penalty: f64,
    pub success_bonus: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            num_qubits: NUM_QUBITS,
            target: TargetGate::default(),
            state_buckets: STATE_BUCKETS,
            state_capacity: STATE_BUCKETS,
            fidelity_threshold: FIDELITY_THRESHOLD,
            gate_penalty: GATE_PENALTY,
            success_bonus: SUCCESS_BONUS,
        }
    }
}

impl EnvConfig {
    /// Rejects settings the environment cannot honor.
    ///
    /// Bucket count may not exceed the index capacity: every bucket must be
    /// able to own a Q-table row.
    pub fn validate(&self) -> QsynthResult<()> {
        if self.state_buckets == 0 {
            return Err(QsynthError::InvalidConfig {
                message: "state_buckets must be positive".to_string(),
            });
        }
        if self.state_buckets > self.state_capacity {
            return Err(QsynthError::InvalidConfig {
                message: format!(
                    "state_buckets ({}) exceeds state_capacity ({})",
                    self.state_buckets, self.state_capacity
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.fidelity_threshold) {
            return Err(QsynthError::InvalidConfig {
                message: format!("fidelity_threshold {} outside [0, 1]", self.fidelity_threshold),
            });
        }
        Ok(())
    }
}

/// Outcome of one environment step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// State index of the circuit after the step.
    pub state: usize,
    pub reward: f64,
    /// Fidelity crossed the threshold.
    pub done: bool,
    pub fidelity: f64,
}

/// Reward for the current circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardSignal {
    pub reward: f64,
    pub done: bool,
    pub fidelity: f64,
}

/// Builds circuits gate by gate and scores them against a fixed target.
#[derive(Debug)]
pub struct QuantumEnv {
    config: EnvConfig,
    circuit: Circuit,
    target: Unitary,
    simulator: Simulator,
    states: StateIndexTable,
}

impl QuantumEnv {
    /// Creates an environment holding an empty circuit.
    ///
    /// # Errors
    /// `QsynthError::InvalidConfig` if the configuration is rejected or the
    /// target does not act on `num_qubits` qubits.
    pub fn new(config: EnvConfig) -> QsynthResult<Self> {
        config.validate()?;
        let target = config.target.unitary()?;
        let register_dim = 1usize.checked_shl(config.num_qubits as u32).unwrap_or(0);
        if target.dim() != register_dim {
            return Err(QsynthError::InvalidConfig {
                message: format!(
                    "Target {} is {}-dimensional but the register has {} qubits",
                    config.target,
                    target.dim(),
                    config.num_qubits
                ),
            });
        }
        Ok(Self {
            circuit: Circuit::new(config.num_qubits),
            states: StateIndexTable::new(config.state_capacity),
            simulator: Simulator::new(),
            target,
            config,
        })
    }

    /// Discards the current circuit and returns the empty circuit's state index.
    pub fn reset(&mut self) -> QsynthResult<usize> {
        self.circuit = Circuit::new(self.config.num_qubits);
        let state = self.current_state_index()?;
        debug!(state, "environment reset");
        Ok(state)
    }

    /// Appends `op`, then scores the new circuit.
    ///
    /// The reward is absolute: `-gate_penalty * circuit_size`, recomputed from
    /// the whole circuit every step, plus `success_bonus` when the fidelity
    /// exceeds the threshold (which also sets `done`).
    ///
    /// # Errors
    /// Invalid qubits leave the circuit unchanged and return the validation
    /// error. Simulation failures propagate.
    pub fn step(&mut self, op: &Operation) -> QsynthResult<StepResult> {
        self.circuit.add_operation(*op)?;
        let state = self.current_state_index()?;
        let RewardSignal { reward, done, fidelity } = self.reward()?;
        trace!(%op, state, reward, fidelity, done, "step");
        Ok(StepResult {
            state,
            reward,
            done,
            fidelity,
        })
    }

    /// Scores the current circuit without modifying it.
    pub fn reward(&self) -> QsynthResult<RewardSignal> {
        let result = self.simulator.run(&self.circuit)?;
        let fidelity = process_fidelity(result.unitary(), &self.target)?;

        let mut reward = -self.config.gate_penalty * self.circuit.size() as f64;
        let mut done = false;
        if fidelity > self.config.fidelity_threshold {
            done = true;
            reward += self.config.success_bonus;
        }
        Ok(RewardSignal { reward, done, fidelity })
    }

    /// Prints the current circuit diagram to stdout.
    pub fn render(&self) {
        println!("{}", self.circuit);
    }

    fn current_state_index(&mut self) -> QsynthResult<usize> {
        let bucket = CircuitFingerprint::of(&self.circuit).bucket(self.config.state_buckets)?;
        self.states.index_for(bucket, &self.circuit)
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of gates in the current circuit.
    pub fn circuit_size(&self) -> usize {
        self.circuit.size()
    }

    /// The first circuit that was assigned `index`.
    pub fn circuit_for_state(&self, index: usize) -> Option<&Circuit> {
        self.states.circuit_for(index)
    }

    pub fn state_table(&self) -> &StateIndexTable {
        &self.states
    }

    pub fn target(&self) -> &Unitary {
        &self.target
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}
