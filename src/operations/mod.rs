// src/operations/mod.rs

//! Defines the gate applications a circuit is built from.
//!
//! The set is closed: the learner only ever chooses among the six
//! single-qubit Clifford+T gates below and a CNOT, so both are plain enums
//! rather than string-keyed patterns.

use crate::core::{QsynthError, QsynthResult, QubitId};
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A fixed single-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleQubitGate {
    /// Hadamard
    H,
    /// Phase (π/2)
    S,
    /// Phase (π/4)
    T,
    /// Pauli-X
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z
    Z,
}

impl SingleQubitGate {
    /// The 2×2 matrix in the {|0>, |1>} basis.
    pub fn matrix(&self) -> [[Complex<f64>; 2]; 2] {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        let i = Complex::i();
        match self {
            SingleQubitGate::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            SingleQubitGate::S => [[one, zero], [zero, i]],
            // e^(iπ/4) = (1+i)/√2
            SingleQubitGate::T => [[one, zero], [zero, Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]],
            SingleQubitGate::X => [[zero, one], [one, zero]],
            SingleQubitGate::Y => [[zero, -i], [i, zero]],
            SingleQubitGate::Z => [[one, zero], [zero, -one]],
        }
    }

    /// Symbol drawn on the wire.
    pub fn symbol(&self) -> &'static str {
        match self {
            SingleQubitGate::H => "H",
            SingleQubitGate::S => "S",
            SingleQubitGate::T => "T",
            SingleQubitGate::X => "X",
            SingleQubitGate::Y => "Y",
            SingleQubitGate::Z => "Z",
        }
    }
}

impl fmt::Display for SingleQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One gate application inside a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A single-qubit gate on `target`.
    Gate {
        gate: SingleQubitGate,
        target: QubitId,
    },

    /// CNOT: flips `target` when `control` is |1>.
    ControlledX {
        control: QubitId,
        target: QubitId,
    },
}

impl Operation {
    /// Returns every qubit the operation touches, control first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::ControlledX { control, target } => vec![*control, *target],
        }
    }

    /// Checks the operation against a register of `num_qubits` qubits.
    ///
    /// # Errors
    /// * `QsynthError::QubitOutOfRange` if any qubit lies outside the register.
    /// * `QsynthError::InvalidOperation` if a CNOT's control and target coincide.
    pub fn validate(&self, num_qubits: usize) -> QsynthResult<()> {
        for qubit in self.involved_qubits() {
            if qubit.0 >= num_qubits {
                return Err(QsynthError::QubitOutOfRange { qubit, num_qubits });
            }
        }
        if let Operation::ControlledX { control, target } = self {
            if control == target {
                return Err(QsynthError::InvalidOperation {
                    message: format!("Control and target cannot both be {}", control),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { gate, target } => write!(f, "{}({})", gate, target),
            Operation::ControlledX { control, target } => write!(f, "CX({}, {})", control, target),
        }
    }
}
