// src/core/unitary.rs

use super::error::{QsynthError, QsynthResult};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// A dense square complex matrix, stored row-major.
///
/// Used both for the operator a circuit implements and for the fixed target
/// the environment scores against. Nothing here enforces unitarity; see
/// [`crate::validation::check_unitarity`] for that.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct Unitary {
    dim: usize,
    elements: Vec<Complex<f64>>,
}

impl Unitary {
    /// The `dim × dim` identity.
    pub fn identity(dim: usize) -> Self {
        let mut elements = vec![Complex::zero(); dim * dim];
        for i in 0..dim {
            elements[i * dim + i] = Complex::one();
        }
        Self { dim, elements }
    }

    /// Builds a matrix from its rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<Complex<f64>>]) -> QsynthResult<Self> {
        let dim = rows.len();
        let mut elements = Vec::with_capacity(dim * dim);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(QsynthError::SimulationError {
                    message: format!("Row {} has {} entries, expected {}", r, row.len(), dim),
                });
            }
            elements.extend_from_slice(row);
        }
        Ok(Self { dim, elements })
    }

    /// Shorthand for fixed-size real/complex literal matrices.
    pub fn from_array<const N: usize>(rows: [[Complex<f64>; N]; N]) -> Self {
        Self {
            dim: N,
            elements: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at (`row`, `col`). Panics when out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.elements[row * self.dim + col]
    }

    /// Row-major view of all entries.
    pub fn elements(&self) -> &[Complex<f64>] {
        &self.elements
    }

    /// Mutable access for the simulation engine.
    pub(crate) fn elements_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.elements
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        let n = self.dim;
        let mut elements = vec![Complex::zero(); n * n];
        for r in 0..n {
            for c in 0..n {
                elements[c * n + r] = self.elements[r * n + c].conj();
            }
        }
        Self { dim: n, elements }
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Unitary) -> QsynthResult<Self> {
        if self.dim != rhs.dim {
            return Err(QsynthError::SimulationError {
                message: format!("Cannot multiply {}x{} by {}x{}", self.dim, self.dim, rhs.dim, rhs.dim),
            });
        }
        let n = self.dim;
        let mut elements = vec![Complex::zero(); n * n];
        for r in 0..n {
            for k in 0..n {
                let a = self.elements[r * n + k];
                if a.is_zero() {
                    continue;
                }
                for c in 0..n {
                    elements[r * n + c] += a * rhs.elements[k * n + c];
                }
            }
        }
        Ok(Self { dim: n, elements })
    }

    /// Kronecker product `self ⊗ rhs`; `self` acts on the high-order bits.
    pub fn kron(&self, rhs: &Unitary) -> Self {
        let (n, m) = (self.dim, rhs.dim);
        let dim = n * m;
        let mut elements = vec![Complex::zero(); dim * dim];
        for r1 in 0..n {
            for c1 in 0..n {
                let a = self.elements[r1 * n + c1];
                for r2 in 0..m {
                    for c2 in 0..m {
                        elements[(r1 * m + r2) * dim + (c1 * m + c2)] = a * rhs.elements[r2 * m + c2];
                    }
                }
            }
        }
        Self { dim, elements }
    }

    pub fn trace(&self) -> Complex<f64> {
        (0..self.dim).map(|i| self.elements[i * self.dim + i]).sum()
    }
}

impl fmt::Display for Unitary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unitary[{}x{}]", self.dim, self.dim)?;
        for r in 0..self.dim {
            write!(f, "  [")?;
            for c in 0..self.dim {
                write!(f, "{}{:.4}", if c > 0 { ", " } else { "" }, self.get(r, c))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn identity_has_unit_trace_per_dimension() {
        let id = Unitary::identity(4);
        assert_eq!(id.trace(), c(4.0, 0.0));
        assert_eq!(id.adjoint(), id);
    }

    #[test]
    fn adjoint_conjugates_and_transposes() {
        let m = Unitary::from_array([[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]);
        // Pauli-Y is Hermitian
        assert_eq!(m.adjoint(), m);

        let s = Unitary::from_array([[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]]);
        assert_eq!(s.adjoint().get(1, 1), c(0.0, -1.0));
    }

    #[test]
    fn kron_places_left_factor_on_high_bits() -> QsynthResult<()> {
        let x = Unitary::from_array([[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]);
        let xi = x.kron(&Unitary::identity(2));
        // X on the high bit maps |00> (0) to |10> (2)
        assert_eq!(xi.get(2, 0), c(1.0, 0.0));
        assert_eq!(xi.get(1, 0), c(0.0, 0.0));
        assert_eq!(xi.matmul(&xi)?, Unitary::identity(4));
        Ok(())
    }

    #[test]
    fn matmul_rejects_dimension_mismatch() {
        let err = Unitary::identity(2).matmul(&Unitary::identity(4));
        assert!(matches!(err, Err(QsynthError::SimulationError { .. })));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![c(1.0, 0.0), c(0.0, 0.0)], vec![c(0.0, 0.0)]];
        assert!(Unitary::from_rows(&rows).is_err());
    }
}
