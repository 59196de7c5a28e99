use std::fmt::Debug;

use super::{FifoReplacer, LruReplacer};
use crate::typedef::SlotId;

/// A page-replacement policy over a fixed array of slots.
pub trait Replacer: Send + Sync + Debug {
    /// Record the event that the page in `slot` was referenced, either as a hit or right after
    /// being loaded on a fault.
    fn record_access(&mut self, slot: SlotId);

    /// Picks the slot whose page is replaced on a fault. Empty slots count as the oldest.
    fn evict(&mut self) -> SlotId;

    /// Returns the policy this replacer implements.
    fn policy(&self) -> Policy;
}

/// The replacement policies compared by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fifo,
    Lru,
}

impl Policy {
    /// Every policy, in the column order of the performance table.
    pub const ALL: [Policy; 2] = [Policy::Fifo, Policy::Lru];

    /// Creates a fresh replacer of this policy over `capacity` slots.
    pub fn replacer(self, capacity: usize) -> Box<dyn Replacer> {
        match self {
            Policy::Fifo => Box::new(FifoReplacer::new(capacity)),
            Policy::Lru => Box::new(LruReplacer::new(capacity)),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Fifo => f.pad("FIFO"),
            Policy::Lru => f.pad("LRU"),
        }
    }
}
