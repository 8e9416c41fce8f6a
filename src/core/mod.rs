// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod unitary;

// Re-export public types for convenient access via `qsynth::core::TypeName`
pub use error::{QsynthError, QsynthResult, QubitId};
pub use unitary::Unitary;

pub mod constants;
pub use constants::qsynth_constants::NUM_QUBITS; // Re-export
