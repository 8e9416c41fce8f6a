// src/validation/mod.rs

//! Scores and sanity checks on unitaries.

use crate::core::{QsynthError, QsynthResult, Unitary};
use num_complex::Complex;

// Default tolerance values (can be overridden by caller)
const DEFAULT_UNITARITY_TOLERANCE: f64 = 1e-9;

/// Normalized overlap between two operators, in `[0, 1]`.
///
/// Computed as `|trace(actual† · target)| / dim`. Global phase does not
/// affect the score, so a circuit reproducing the target up to a phase
/// scores 1.
///
/// # Errors
/// `QsynthError::SimulationError` if the dimensions differ or are zero.
pub fn process_fidelity(actual: &Unitary, target: &Unitary) -> QsynthResult<f64> {
    if actual.dim() != target.dim() || actual.dim() == 0 {
        return Err(QsynthError::SimulationError {
            message: format!(
                "Cannot compare a {}-dimensional unitary with a {}-dimensional target",
                actual.dim(),
                target.dim()
            ),
        });
    }
    // trace(A†·B) = Σ_{k,i} conj(A[k][i]) · B[k][i]
    let overlap: Complex<f64> = actual
        .elements()
        .iter()
        .zip(target.elements())
        .map(|(a, b)| a.conj() * *b)
        .sum();
    Ok(overlap.norm() / actual.dim() as f64)
}

/// Checks `u†u ≈ I` entry by entry.
///
/// # Arguments
/// * `u` - The matrix to check.
/// * `tolerance` - Largest allowed absolute deviation of any entry. Defaults to 1e-9.
///
/// # Returns
/// * `Err(QsynthError::NotUnitary)` carrying the largest deviation found.
pub fn check_unitarity(u: &Unitary, tolerance: Option<f64>) -> QsynthResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_UNITARITY_TOLERANCE);
    let product = u.adjoint().matmul(u)?;
    let identity = Unitary::identity(u.dim());
    let deviation = product
        .elements()
        .iter()
        .zip(identity.elements())
        .map(|(p, i)| (*p - *i).norm())
        .fold(0.0_f64, f64::max);
    if deviation > effective_tolerance {
        Err(QsynthError::NotUnitary { deviation })
    } else {
        Ok(())
    }
}

/// Runs every check with default tolerances.
pub fn validate_unitary(u: &Unitary) -> QsynthResult<()> {
    check_unitarity(u, None)
}
