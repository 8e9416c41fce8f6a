// src/lib.rs

//! `qsynth` - Tabular Q-learning search for short gate sequences
//!
//! An agent appends gates from a fixed catalog to a two-qubit circuit and is
//! rewarded for reaching a target unitary (iSWAP by default) with as few
//! gates as possible. Circuits are simulated exactly, scored by process
//! fidelity, and bucketed into a small state space by hashing their diagram.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod fingerprint;
pub mod environment;
pub mod agent;
pub mod training;

// Re-export the most common types for easier top-level use
pub use core::{QsynthError, QsynthResult, QubitId, Unitary};
pub use operations::{Operation, SingleQubitGate};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Simulator, SimulationResult};
pub use validation::{check_unitarity, process_fidelity, validate_unitary};
pub use fingerprint::CircuitFingerprint;
pub use environment::{EnvConfig, QuantumEnv, StateIndexTable, StepResult, TargetGate};
pub use agent::{ActionCatalog, AgentConfig, QLearningAgent, QTable};
pub use training::{
    evaluate_agent, train_agent, EpisodeOutcome, EpisodeReport, EvaluationPolicy, RunSummary, TrainingConfig,
};

// Example 1: A hand-built iSWAP
// S on both qubits, then H, a CNOT in each direction, and H reproduce
// iSWAP exactly, so the environment reports success on the sixth step.
/// ```
/// use qsynth::{EnvConfig, Operation, QsynthError, QuantumEnv, QubitId, SingleQubitGate};
///
/// fn gate(gate: SingleQubitGate, q: usize) -> Operation {
///     Operation::Gate { gate, target: QubitId(q) }
/// }
///
/// let mut env = QuantumEnv::new(EnvConfig::default())?;
/// env.reset()?;
///
/// let ops = [
///     gate(SingleQubitGate::S, 0),
///     gate(SingleQubitGate::S, 1),
///     gate(SingleQubitGate::H, 0),
///     Operation::ControlledX { control: QubitId(0), target: QubitId(1) },
///     Operation::ControlledX { control: QubitId(1), target: QubitId(0) },
///     gate(SingleQubitGate::H, 1),
/// ];
/// let mut last = None;
/// for op in &ops {
///     last = Some(env.step(op)?);
/// }
/// let last = last.unwrap();
///
/// env.render();
/// assert!(last.done);
/// assert!(last.fidelity > 0.99);
/// // +100 bonus, -5 for each of the six gates
/// assert_eq!(last.reward, 70.0);
/// # Ok::<(), QsynthError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: A short training run
// A seeded agent on the default environment; the summary accounts for
// every episode whatever its outcome.
/// ```
/// use qsynth::{ActionCatalog, AgentConfig, EnvConfig, QLearningAgent, QuantumEnv, TrainingConfig, train_agent};
///
/// let mut env = QuantumEnv::new(EnvConfig::default())?;
/// let catalog = ActionCatalog::standard(2)?;
/// let mut agent = QLearningAgent::new(AgentConfig { seed: Some(7), ..AgentConfig::default() }, catalog)?;
///
/// let config = TrainingConfig { episodes: 20, report_every: 0, ..TrainingConfig::default() };
/// let summary = train_agent(&mut agent, &mut env, &config)?;
///
/// assert_eq!(summary.episodes, 20);
/// assert_eq!(summary.solved + summary.overflowed + summary.step_limited, 20);
/// assert!(agent.epsilon() < 0.9);
/// # Ok::<(), qsynth::QsynthError>(())
/// ```
#[doc(hidden)]
const _: () = ();
