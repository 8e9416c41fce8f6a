//! Constants shared by the simulator, the environment and the learner.

/// Register, reward and hyperparameter constants.
pub mod qsynth_constants {
    /// Width of the register circuits are built on.
    pub const NUM_QUBITS: usize = 2;
    /// A circuit counts as solved once its fidelity to the target exceeds this.
    pub const FIDELITY_THRESHOLD: f64 = 0.99;
    /// Added to the reward when the fidelity threshold is crossed.
    pub const SUCCESS_BONUS: f64 = 100.0;
    /// Penalty per gate in the circuit, charged on every step.
    pub const GATE_PENALTY: f64 = 5.0;
    /// Episodes are truncated once the circuit holds more gates than this.
    pub const MAX_GATES: usize = 10;
    /// Charged to the episode reward on truncation.
    pub const OVERFLOW_PENALTY: f64 = 100.0;
    /// Number of buckets circuit fingerprints are reduced into.
    pub const STATE_BUCKETS: usize = 100;

    pub const ALPHA: f64 = 0.05;
    pub const GAMMA: f64 = 0.95;
    pub const EPSILON: f64 = 0.9;
    pub const DECAY_RATE: f64 = 0.99;
    pub const EPSILON_MIN: f64 = 0.01;

    pub const EPISODES: usize = 100_000;
    pub const MAX_STEPS_PER_EPISODE: usize = 10_000;
    /// Progress is logged every this many episodes.
    pub const REPORT_EVERY: usize = 100;
}
