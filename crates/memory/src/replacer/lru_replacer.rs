use super::replacer::{Policy, Replacer};
use crate::typedef::SlotId;

/// Evicts the least recently referenced slot.
///
/// Every slot carries the timestamp of its last reference; a slot that was never referenced
/// keeps timestamp 0 and is therefore always picked before any occupied one. This is the same
/// ordering as bumping a staleness counter on every other slot after each reference.
#[derive(Debug)]
pub struct LruReplacer {
    last_accessed: Vec<u64>,
    current_timestamp: u64,
}

impl LruReplacer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a replacer needs at least one slot");
        LruReplacer {
            last_accessed: vec![0; capacity],
            current_timestamp: 1,
        }
    }

    fn current_timestamp(&mut self) -> u64 {
        let old_timestamp = self.current_timestamp;
        self.current_timestamp += 1;
        old_timestamp
    }
}

impl Replacer for LruReplacer {
    /// Marks `slot` as the most recently used.
    fn record_access(&mut self, slot: SlotId) {
        let timestamp = self.current_timestamp();
        self.last_accessed[slot] = timestamp;
    }

    /// Returns the slot with the oldest timestamp; ties go to the lowest index.
    fn evict(&mut self) -> SlotId {
        let mut victim = 0;
        for (slot, &timestamp) in self.last_accessed.iter().enumerate().skip(1) {
            if timestamp < self.last_accessed[victim] {
                victim = slot;
            }
        }
        victim
    }

    fn policy(&self) -> Policy {
        Policy::Lru
    }
}
