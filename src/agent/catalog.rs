// src/agent/catalog.rs

use crate::core::{QsynthError, QsynthResult, QubitId};
use crate::operations::{Operation, SingleQubitGate};

/// The fixed, ordered list of actions the agent chooses from.
///
/// Every entry is validated against the register once, at construction, so
/// an action taken from the catalog never fails qubit validation later.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCatalog {
    num_qubits: usize,
    actions: Vec<Operation>,
}

impl ActionCatalog {
    /// The 14 classroom actions on a two-qubit register, in order:
    /// H q0, H q1, CX q0→q1, CX q1→q0, then S, T, X, Y, Z on q0 and q1.
    pub fn standard(num_qubits: usize) -> QsynthResult<Self> {
        let q0 = QubitId(0);
        let q1 = QubitId(1);
        let on_both = |gate: SingleQubitGate| {
            [
                Operation::Gate { gate, target: q0 },
                Operation::Gate { gate, target: q1 },
            ]
        };

        let mut actions = Vec::with_capacity(14);
        actions.extend(on_both(SingleQubitGate::H));
        actions.push(Operation::ControlledX { control: q0, target: q1 });
        actions.push(Operation::ControlledX { control: q1, target: q0 });
        for gate in [
            SingleQubitGate::S,
            SingleQubitGate::T,
            SingleQubitGate::X,
            SingleQubitGate::Y,
            SingleQubitGate::Z,
        ] {
            actions.extend(on_both(gate));
        }
        Self::new(num_qubits, actions)
    }

    /// Builds a catalog from arbitrary actions.
    ///
    /// # Errors
    /// `QsynthError::InvalidConfig` for an empty list, or the validation
    /// error of the first action that does not fit the register.
    pub fn new(num_qubits: usize, actions: Vec<Operation>) -> QsynthResult<Self> {
        if actions.is_empty() {
            return Err(QsynthError::InvalidConfig {
                message: "Action catalog cannot be empty".to_string(),
            });
        }
        for action in &actions {
            action.validate(num_qubits)?;
        }
        Ok(Self { num_qubits, actions })
    }

    pub fn get(&self, index: usize) -> QsynthResult<&Operation> {
        self.actions.get(index).ok_or(QsynthError::ActionOutOfRange {
            index,
            action_size: self.actions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.actions.iter()
    }
}
