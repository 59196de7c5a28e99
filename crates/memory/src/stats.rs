use crate::config::SWAP_IN_COST_MS;
use crate::frame::FrameTable;
use crate::process::ProcessRegistry;

/// Fault and swap counters. They only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub page_faults: u64,
    pub swap_time_ms: u64,
}

impl MemoryStats {
    pub(crate) fn record_fault(&mut self) {
        self.page_faults += 1;
    }

    pub(crate) fn record_swap_in(&mut self) {
        self.swap_time_ms += SWAP_IN_COST_MS;
    }
}

/// A snapshot of frame usage and fragmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryUsage {
    pub total_frames: usize,
    pub used_frames: usize,
    pub free_frames: usize,
    pub total_memory_kb: u64,
    pub used_memory_kb: u64,
    pub free_memory_kb: u64,
    /// Share of total memory that is not in use, in percent.
    pub external_fragmentation: f64,
    /// Share of used memory that lies unused inside resident pages, in percent.
    pub internal_fragmentation: f64,
    pub utilization: f64,
    pub page_faults: u64,
    pub swap_time_ms: u64,
}

impl MemoryUsage {
    pub(crate) fn collect(
        frames: &FrameTable,
        processes: &ProcessRegistry,
        page_size_kb: u32,
        stats: &MemoryStats,
    ) -> Self {
        let page_size_kb = u64::from(page_size_kb);
        let used_frames = frames.used_count();
        let total_memory_kb = frames.len() as u64 * page_size_kb;
        let used_memory_kb = used_frames as u64 * page_size_kb;

        // A process can hold more page capacity than it asked for; the excess is wasted.
        let wasted_kb: u64 = processes
            .iter()
            .map(|p| {
                let resident_kb = frames.owned_by(p.process_id()) as u64 * page_size_kb;
                resident_kb.saturating_sub(u64::from(p.memory_requirement_kb()))
            })
            .sum();

        let utilization = percent(used_memory_kb, total_memory_kb);
        Self {
            total_frames: frames.len(),
            used_frames,
            free_frames: frames.len() - used_frames,
            total_memory_kb,
            used_memory_kb,
            free_memory_kb: total_memory_kb - used_memory_kb,
            external_fragmentation: 100.0 - utilization,
            internal_fragmentation: percent(wasted_kb, used_memory_kb),
            utilization,
            page_faults: stats.page_faults,
            swap_time_ms: stats.swap_time_ms,
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_of_partially_filled_table() {
        let mut frames = FrameTable::new(4).unwrap();
        let processes = ProcessRegistry::from_requirements(&[25, 4]).unwrap();
        // Process 1 needs 3 pages of 10 KB for 25 KB: 5 KB wasted.
        frames.assign(0, 1, 1);
        frames.assign(1, 1, 2);
        frames.assign(2, 1, 3);

        let stats = MemoryStats {
            page_faults: 2,
            swap_time_ms: 10,
        };
        let usage = MemoryUsage::collect(&frames, &processes, 10, &stats);
        assert_eq!(3, usage.used_frames);
        assert_eq!(1, usage.free_frames);
        assert_eq!(40, usage.total_memory_kb);
        assert_eq!(30, usage.used_memory_kb);
        assert_eq!(10, usage.free_memory_kb);
        assert!((usage.utilization - 75.0).abs() < 1e-9);
        assert!((usage.external_fragmentation - 25.0).abs() < 1e-9);
        assert!((usage.internal_fragmentation - 5.0 / 30.0 * 100.0).abs() < 1e-9);
        assert_eq!(2, usage.page_faults);
        assert_eq!(10, usage.swap_time_ms);
    }

    #[test]
    fn test_usage_of_empty_table() {
        let frames = FrameTable::new(2).unwrap();
        let processes = ProcessRegistry::from_requirements(&[5]).unwrap();
        let usage = MemoryUsage::collect(&frames, &processes, 4, &MemoryStats::default());
        assert_eq!(0.0, usage.utilization);
        assert_eq!(100.0, usage.external_fragmentation);
        assert_eq!(0.0, usage.internal_fragmentation);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = MemoryStats::default();
        stats.record_fault();
        stats.record_fault();
        stats.record_swap_in();
        assert_eq!(2, stats.page_faults);
        assert_eq!(SWAP_IN_COST_MS, stats.swap_time_ms);
    }
}
