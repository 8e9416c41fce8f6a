// src/simulation/engine.rs
use crate::core::{QsynthError, QsynthResult, QubitId, Unitary};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::Zero;

/// Accumulates the operator of a gate sequence, one gate at a time.
///
/// Each gate `G` is left-multiplied onto the running product (`U ← G·U`) by
/// applying it to every column of `U` as if the column were a state vector.
/// Qubit `q` corresponds to bit `q` of a basis index (little-endian).
/// (Internal visibility)
#[derive(Debug)]
pub(crate) struct UnitaryEngine {
    num_qubits: usize,
    unitary: Unitary,
}

impl UnitaryEngine {
    /// Starts from the identity on `num_qubits` qubits.
    pub(crate) fn init(num_qubits: usize) -> QsynthResult<Self> {
        if num_qubits == 0 {
            return Err(QsynthError::SimulationError {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .filter(|d| d.checked_mul(*d).is_some())
            .ok_or_else(|| QsynthError::SimulationError {
                message: format!("{} qubits overflow the unitary dimension", num_qubits),
            })?;

        Ok(Self {
            num_qubits,
            unitary: Unitary::identity(dim),
        })
    }

    pub(crate) fn unitary(&self) -> &Unitary {
        &self.unitary
    }

    pub(crate) fn into_unitary(self) -> Unitary {
        self.unitary
    }

    /// Applies one operation to the running product.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> QsynthResult<()> {
        match op {
            Operation::Gate { gate, target } => {
                let target_idx = self.qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &gate.matrix())
            }
            Operation::ControlledX { control, target } => {
                let control_idx = self.qubit_index(control)?;
                let target_idx = self.qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(QsynthError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for controlled operation".to_string(),
                    });
                }

                let one = Complex::new(1.0, 0.0);
                let zero = Complex::zero();
                // Basis order: |control, target> -> |00>, |01>, |10>, |11>
                let cx_matrix: [[Complex<f64>; 4]; 4] = [
                    [one, zero, zero, zero],
                    [zero, one, zero, zero],
                    [zero, zero, zero, one],
                    [zero, zero, one, zero],
                ];
                self.apply_two_qubit_gate(control_idx, target_idx, &cx_matrix)
            }
        }
    }

    fn qubit_index(&self, qubit: &QubitId) -> QsynthResult<usize> {
        if qubit.0 < self.num_qubits {
            Ok(qubit.0)
        } else {
            Err(QsynthError::QubitOutOfRange {
                qubit: *qubit,
                num_qubits: self.num_qubits,
            })
        }
    }

    /// Applies a 2x2 matrix to `target_idx` across every column.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) -> QsynthResult<()> {
        let dim = self.unitary.dim();
        let k_mask = 1usize << target_idx;
        let elements = self.unitary.elements_mut();

        for col in 0..dim {
            for i0 in (0..dim).filter(|i| i & k_mask == 0) {
                let i1 = i0 | k_mask;
                let psi_0 = elements[i0 * dim + col];
                let psi_1 = elements[i1 * dim + col];
                elements[i0 * dim + col] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
                elements[i1 * dim + col] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
            }
        }
        Ok(())
    }

    /// Applies a 4x4 matrix whose basis is `|b1, b2>`, with `b1` the bit of
    /// `idx1` and `b2` the bit of `idx2`.
    fn apply_two_qubit_gate(&mut self, idx1: usize, idx2: usize, matrix: &[[Complex<f64>; 4]; 4]) -> QsynthResult<()> {
        if idx1 == idx2 {
            return Err(QsynthError::InvalidOperation {
                message: "Target indices for a two-qubit gate cannot be the same".to_string(),
            });
        }

        let dim = self.unitary.dim();
        let m1 = 1usize << idx1;
        let m2 = 1usize << idx2;
        let elements = self.unitary.elements_mut();

        for col in 0..dim {
            for base in (0..dim).filter(|i| i & (m1 | m2) == 0) {
                let indices = [base, base | m2, base | m1, base | m1 | m2];

                let mut psi = [Complex::zero(); 4];
                for (j, idx) in indices.iter().enumerate() {
                    psi[j] = elements[idx * dim + col];
                }

                for (row, idx) in indices.iter().enumerate() {
                    let mut acc = Complex::zero();
                    for (k, amp) in psi.iter().enumerate() {
                        acc += matrix[row][k] * *amp;
                    }
                    elements[idx * dim + col] = acc;
                }
            }
        }
        Ok(())
    }
}
