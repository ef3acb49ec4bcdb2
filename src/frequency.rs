use std::collections::BTreeMap;

use crate::error::{HuffError, Result};

/// Occurrence count of every distinct byte in an input.
///
/// Backed by a `BTreeMap` so iteration is always in ascending symbol order,
/// which the tree builder relies on for its tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    /// Counts every byte of `data`. Fails with `EmptyInput` on an empty slice.
    pub fn count(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let mut counts = BTreeMap::new();
        for &byte in data {
            *counts.entry(byte).or_insert(0) += 1;
        }
        Ok(FrequencyMap { counts })
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
