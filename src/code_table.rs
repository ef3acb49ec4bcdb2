use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{HuffError, Result};
use crate::tree::{HuffNode, HuffmanTree};

/// Largest table the one-byte size field can describe.
pub const MAX_TABLE_SIZE: usize = u8::MAX as usize;

/// Root-to-leaf path of a symbol, `false` for left and `true` for right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.0.starts_with(&other.0)
    }

    /// Parses ASCII `0`/`1` digits. Returns `None` on any other byte.
    pub fn from_ascii(digits: &[u8]) -> Option<Code> {
        digits
            .iter()
            .map(|&d| match d {
                b'0' => Some(false),
                b'1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()
            .map(Code)
    }

    pub fn to_ascii(&self) -> Vec<u8> {
        self.0.iter().map(|&bit| if bit { b'1' } else { b'0' }).collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, kept in the order entries were assigned.
///
/// That order is also the order keys and values are written to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<(u8, Code)>,
    index: HashMap<u8, usize>,
}

impl CodeTable {
    /// Walks the tree depth first, left before right.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut entries = Vec::new();
        assign_codes(&tree.root, &mut Vec::new(), &mut entries);
        Self::from_entries(entries)
    }

    /// Checks the table invariants: 1..=255 entries, unique non-empty codes,
    /// unique symbols, prefix-free. Violations are reported as a corrupted header
    /// since this is how a parsed table gets validated.
    pub fn from_entries(entries: Vec<(u8, Code)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        if entries.len() > MAX_TABLE_SIZE {
            return Err(HuffError::TooManySymbols(entries.len()));
        }

        let mut index = HashMap::with_capacity(entries.len());
        let mut seen = HashSet::with_capacity(entries.len());
        for (i, (symbol, code)) in entries.iter().enumerate() {
            if code.is_empty() {
                return Err(HuffError::header(format!("empty code for symbol {symbol:#04x}")));
            }
            if index.insert(*symbol, i).is_some() {
                return Err(HuffError::header(format!("duplicate key {symbol:#04x}")));
            }
            if !seen.insert(code) {
                return Err(HuffError::header(format!("duplicate code {code}")));
            }
        }

        let table = CodeTable { entries, index };
        if let Some((short, long)) = table.prefix_violation() {
            return Err(HuffError::header(format!("code {short} is a prefix of {long}")));
        }
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.index.get(&symbol).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.entries.iter().map(|(symbol, code)| (*symbol, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Reverse mapping used by the decoder, keyed by the raw bits.
    pub fn decoding_map(&self) -> HashMap<Vec<bool>, u8> {
        self.entries
            .iter()
            .map(|(symbol, code)| (code.bits().to_vec(), *symbol))
            .collect()
    }

    /// First pair `(a, b)` where `a` is a proper prefix of `b`.
    fn prefix_violation(&self) -> Option<(&Code, &Code)> {
        let mut codes: Vec<&Code> = self.entries.iter().map(|(_, c)| c).collect();
        // After a lexicographic sort a prefix always lands right before one of
        // its extensions.
        codes.sort_by(|a, b| a.bits().cmp(b.bits()));
        codes
            .windows(2)
            .find(|pair| pair[1].starts_with(pair[0]))
            .map(|pair| (pair[0], pair[1]))
    }
}

// Zero-weight leaves are fillers and never get a code
fn assign_codes(node: &HuffNode, prefix: &mut Vec<bool>, entries: &mut Vec<(u8, Code)>) {
    match node {
        HuffNode::Leaf { symbol, weight } => {
            if *weight > 0 {
                entries.push((*symbol, Code(prefix.clone())));
            }
        }
        HuffNode::Internal { left, right, .. } => {
            prefix.push(false);
            assign_codes(left, prefix, entries);
            prefix.pop();

            prefix.push(true);
            assign_codes(right, prefix, entries);
            prefix.pop();
        }
    }
}
