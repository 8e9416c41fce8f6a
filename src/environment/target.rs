// src/environment/target.rs

use crate::core::{QsynthResult, Unitary};
use crate::operations::SingleQubitGate;
use num_complex::Complex;
use std::fmt;

/// Two-qubit operators the environment can be asked to synthesize.
///
/// Matrices are written in the computational basis with qubit 0 as the
/// least significant bit, matching the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetGate {
    /// CNOT with qubit 1 as control: swaps |10> and |11>.
    Cnot,
    /// CNOT · (H ⊗ I): maps |00> to a Bell state.
    BellState,
    Cz,
    Swap,
    /// `[[1,0,0,0],[0,0,i,0],[0,i,0,0],[0,0,0,1]]`
    #[default]
    ISwap,
}

impl TargetGate {
    /// The 4×4 target matrix.
    pub fn unitary(&self) -> QsynthResult<Unitary> {
        let o = Complex::new(0.0, 0.0);
        let l = Complex::new(1.0, 0.0);
        let i = Complex::i();
        let cnot = Unitary::from_array([[l, o, o, o], [o, l, o, o], [o, o, o, l], [o, o, l, o]]);
        match self {
            TargetGate::Cnot => Ok(cnot),
            TargetGate::BellState => {
                let h = Unitary::from_array(SingleQubitGate::H.matrix());
                cnot.matmul(&h.kron(&Unitary::identity(2)))
            }
            TargetGate::Cz => Ok(Unitary::from_array([[l, o, o, o], [o, l, o, o], [o, o, l, o], [o, o, o, -l]])),
            TargetGate::Swap => Ok(Unitary::from_array([[l, o, o, o], [o, o, l, o], [o, l, o, o], [o, o, o, l]])),
            TargetGate::ISwap => Ok(Unitary::from_array([[l, o, o, o], [o, o, i, o], [o, i, o, o], [o, o, o, l]])),
        }
    }
}

impl fmt::Display for TargetGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetGate::Cnot => "CNOT",
            TargetGate::BellState => "Bell-state preparation",
            TargetGate::Cz => "CZ",
            TargetGate::Swap => "SWAP",
            TargetGate::ISwap => "iSWAP",
        };
        f.write_str(name)
    }
}
