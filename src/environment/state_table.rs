// src/environment/state_table.rs

use crate::circuits::Circuit;
use crate::core::{QsynthError, QsynthResult};
use std::collections::HashMap;
use tracing::debug;

/// First circuit seen for a dense index, together with its bucket.
#[derive(Debug, Clone)]
struct StateEntry {
    bucket: usize,
    circuit: Circuit,
}

/// Bidirectional map between fingerprint buckets and dense state indices.
///
/// Indices are handed out in first-seen order (0, 1, 2, ...) and never
/// reclaimed. Growth is capped at `capacity`, the number of rows in the
/// Q-table, so an index returned here is always a valid row.
#[derive(Debug, Clone)]
pub struct StateIndexTable {
    capacity: usize,
    bucket_to_index: HashMap<usize, usize>,
    entries: Vec<StateEntry>,
}

impl StateIndexTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bucket_to_index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the index for `bucket`, allocating one on first encounter.
    /// `circuit` is remembered as the representative of a newly allocated index.
    ///
    /// # Errors
    /// `QsynthError::StateSpaceExhausted` when a new index would reach `capacity`.
    pub fn index_for(&mut self, bucket: usize, circuit: &Circuit) -> QsynthResult<usize> {
        if let Some(&index) = self.bucket_to_index.get(&bucket) {
            return Ok(index);
        }
        if self.entries.len() >= self.capacity {
            return Err(QsynthError::StateSpaceExhausted { capacity: self.capacity });
        }
        let index = self.entries.len();
        self.bucket_to_index.insert(bucket, index);
        self.entries.push(StateEntry {
            bucket,
            circuit: circuit.clone(),
        });
        debug!(bucket, index, gates = circuit.size(), "allocated state index");
        Ok(index)
    }

    /// Looks up an already allocated index without allocating.
    pub fn get(&self, bucket: usize) -> Option<usize> {
        self.bucket_to_index.get(&bucket).copied()
    }

    /// The bucket an index was allocated for.
    pub fn bucket_of(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|e| e.bucket)
    }

    /// The circuit that first produced `index`. Later circuits aliased into
    /// the same bucket are not recorded.
    pub fn circuit_for(&self, index: usize) -> Option<&Circuit> {
        self.entries.get(index).map(|e| &e.circuit)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
