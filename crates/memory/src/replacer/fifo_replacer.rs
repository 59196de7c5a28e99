use super::replacer::{Policy, Replacer};
use crate::typedef::SlotId;

/// Evicts slots in strict round-robin order, one step per fault, regardless of hits.
#[derive(Debug)]
pub struct FifoReplacer {
    capacity: usize,
    next_victim: SlotId,
}

impl FifoReplacer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a replacer needs at least one slot");
        FifoReplacer {
            capacity,
            next_victim: 0,
        }
    }
}

impl Replacer for FifoReplacer {
    /// Accesses do not change the eviction order.
    fn record_access(&mut self, _slot: SlotId) {}

    /// Returns the slot under the cursor and advances it.
    fn evict(&mut self) -> SlotId {
        let victim = self.next_victim;
        self.next_victim = (self.next_victim + 1) % self.capacity;
        victim
    }

    fn policy(&self) -> Policy {
        Policy::Fifo
    }
}
