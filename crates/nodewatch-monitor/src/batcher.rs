//! Dead node batching
//!
//! Dead nodes accumulate until the threshold is reached, then the whole batch
//! is handed off for deregistration and the batcher starts over empty.

use nodewatch_common::NodeIdentity;

/// A drained batch of dead nodes, ready for one deregistration request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadBatch(Vec<NodeIdentity>);

impl DeadBatch {
    pub fn as_slice(&self) -> &[NodeIdentity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<NodeIdentity> {
        self.0
    }
}

/// Accumulates dead nodes for one pass
#[derive(Debug)]
pub struct DeadBatcher {
    threshold: usize,
    current: Vec<NodeIdentity>,
}

impl DeadBatcher {
    /// A threshold of zero is treated as one
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            threshold,
            current: Vec::with_capacity(threshold),
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn record(&mut self, node: NodeIdentity) {
        self.current.push(node);
    }

    pub fn should_flush(&self) -> bool {
        self.current.len() >= self.threshold
    }

    /// Take everything accumulated so far, leaving the batcher empty
    pub fn drain(&mut self) -> DeadBatch {
        DeadBatch(std::mem::replace(
            &mut self.current,
            Vec::with_capacity(self.threshold),
        ))
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
