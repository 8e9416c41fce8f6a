// src/fingerprint/mod.rs

//! Reduces circuits to a small, fixed set of state buckets.
//!
//! A fingerprint is the SHA-256 digest of a circuit's canonical text (its
//! wire diagram). Buckets are that digest read as a big-endian integer
//! modulo the bucket count. Identical diagrams always land in the same
//! bucket. Distinct circuits can and do collide: with 100 buckets the
//! learner sees an aliased, lossy view of the circuit space. That is
//! accepted, not reported as an error.

use crate::circuits::Circuit;
use crate::core::{QsynthError, QsynthResult};
use sha2::{Digest, Sha256};
use std::fmt;

/// Canonical text plus its digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CircuitFingerprint {
    canonical: String,
    digest: [u8; 32],
}

impl CircuitFingerprint {
    /// Fingerprints the given circuit.
    pub fn of(circuit: &Circuit) -> Self {
        Self::from_canonical(circuit.to_string())
    }

    /// Fingerprints an already-rendered canonical text.
    pub fn from_canonical(canonical: String) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(canonical.as_bytes()));
        Self { canonical, digest }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Reduces the digest into `[0, buckets)`.
    ///
    /// # Errors
    /// `QsynthError::InvalidConfig` when `buckets` is zero.
    pub fn bucket(&self, buckets: usize) -> QsynthResult<usize> {
        if buckets == 0 {
            return Err(QsynthError::InvalidConfig {
                message: "Bucket count must be positive".to_string(),
            });
        }
        Ok(digest_mod(&self.digest, buckets as u128) as usize)
    }
}

impl fmt::Display for CircuitFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.digest {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Big-endian `digest mod modulus` by Horner's rule, one byte at a time.
fn digest_mod(digest: &[u8], modulus: u128) -> u128 {
    digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + byte as u128) % modulus)
}
