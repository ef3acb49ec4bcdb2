use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{HuffError, Result};
use crate::frequency::FrequencyMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Joins two subtrees; `left` is the one extracted first.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Priority-queue slot. Only the queue compares these; nodes themselves have
/// no ordering.
///
/// Leaves get sequence numbers in ascending symbol order and internal nodes
/// get the next free number when created, so `(weight, seq)` is a total order.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

// Reversed so BinaryHeap pops the lightest entry first
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree for `freqs`.
    ///
    /// The root is always an internal node. With a single distinct symbol the
    /// real leaf is paired with a zero-weight filler leaf on the right, so the
    /// symbol still gets the one-bit code `0`.
    pub fn from_frequencies(freqs: &FrequencyMap) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(freqs.len());
        let mut next_seq = 0;
        for (symbol, count) in freqs.iter() {
            heap.push(QueueEntry {
                weight: count,
                seq: next_seq,
                node: HuffNode::leaf(symbol, count),
            });
            next_seq += 1;
        }

        let root = match heap.len() {
            0 => return Err(HuffError::EmptyInput),
            1 => {
                let only = heap.pop().ok_or(HuffError::EmptyInput)?.node;
                let filler = match &only {
                    HuffNode::Leaf { symbol, .. } => symbol.wrapping_add(1),
                    HuffNode::Internal { .. } => 0,
                };
                HuffNode::merge(only, HuffNode::leaf(filler, 0))
            }
            _ => {
                while heap.len() > 1 {
                    let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                        break;
                    };
                    let node = HuffNode::merge(first.node, second.node);
                    heap.push(QueueEntry {
                        weight: node.weight(),
                        seq: next_seq,
                        node,
                    });
                    next_seq += 1;
                }
                heap.pop().ok_or(HuffError::EmptyInput)?.node
            }
        };

        debug!(symbols = freqs.len(), weight = root.weight(), "built huffman tree");
        Ok(HuffmanTree { root })
    }
}
