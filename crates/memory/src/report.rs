//! Console renderings of the simulation state.
//!
//! Frames are numbered from 1 in the memory map, matching how operators refer to them.
use std::fmt;

use crate::frame::FrameTable;
use crate::process::ProcessRegistry;
use crate::simulator::{PerformanceMetrics, PerformanceReport};
use crate::stats::MemoryUsage;

const MAP_RULE: &str = "-------------------------------------------------";
const TABLE_RULE: &str = "+-----------------------------+---------------+---------------+";

impl fmt::Display for FrameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Map:")?;
        writeln!(f, "{:<8}{:<16}{:<16}{}", "Frame", "Status", "Process ID", "Page")?;
        writeln!(f, "{}", MAP_RULE)?;
        for (index, frame) in self.iter().enumerate() {
            match frame.page() {
                Some(page) => writeln!(
                    f,
                    "{:<8}{:<16}{:<16}{}",
                    index + 1,
                    "Assigned",
                    page.process_id,
                    page.page_number
                )?,
                None => writeln!(f, "{:<8}{:<16}{:<16}{}", index + 1, "Free", "N/A", "N/A")?,
            }
        }
        write!(f, "{}", MAP_RULE)
    }
}

impl fmt::Display for ProcessRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Active Processes:")?;
        for process in self.iter() {
            write!(
                f,
                "\nProcess {} - Memory Required: {} KB, State: {}",
                process.process_id(),
                process.memory_requirement_kb(),
                process.state()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Usage Statistics:")?;
        writeln!(f, "Total Frames: {}", self.total_frames)?;
        writeln!(f, "Used Frames: {}", self.used_frames)?;
        writeln!(f, "Free Frames: {}", self.free_frames)?;
        writeln!(f, "Total Memory: {} KB", self.total_memory_kb)?;
        writeln!(f, "Used Memory: {} KB", self.used_memory_kb)?;
        writeln!(f, "Free Memory: {} KB", self.free_memory_kb)?;
        writeln!(f, "External Fragmentation: {:.2} %", self.external_fragmentation)?;
        writeln!(f, "Internal Fragmentation: {:.2} %", self.internal_fragmentation)?;
        writeln!(f, "Memory Utilization: {:.2}%", self.utilization)?;
        writeln!(f, "Total Page Faults: {}", self.page_faults)?;
        write!(f, "Swap Time: {} ms", self.swap_time_ms)
    }
}

impl PerformanceReport {
    fn row(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        value: impl Fn(&PerformanceMetrics) -> f64,
    ) -> fmt::Result {
        writeln!(
            f,
            "| {:<27} | {:>13.2} | {:>13.2} |",
            label,
            value(&self.fifo),
            value(&self.lru)
        )
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TABLE_RULE)?;
        writeln!(
            f,
            "| {:<27} | {:<13} | {:<13} |",
            "Entity", self.fifo.policy, self.lru.policy
        )?;
        writeln!(f, "{}", TABLE_RULE)?;
        self.row(f, "Memory Utilization (%)", |m| m.memory_utilization)?;
        self.row(f, "Fragmentation (simulated %)", |m| m.fragmentation * 100.0)?;
        self.row(f, "Allocation Time (micros)", |m| m.allocation_time)?;
        self.row(f, "Deallocation Time (micros)", |m| m.deallocation_time)?;
        self.row(f, "Throughput (pages/ms)", |m| m.throughput)?;
        self.row(f, "Response Time (micros)", |m| m.response_time)?;
        self.row(f, "Page Faults", |m| m.page_faults as f64)?;
        self.row(f, "Thrashing Rate", |m| m.thrashing_rate)?;
        self.row(f, "Overhead (micros)", |m| m.overhead)?;
        write!(f, "{}", TABLE_RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::memory_manager::MemoryManager;
    use crate::simulator::ReplacementSimulator;
    use std::time::Duration;

    #[test]
    fn test_memory_map_lists_every_frame() {
        let config = SimulationConfig::new(3, 10, vec![15]);
        let mut mm = MemoryManager::new(&config).unwrap();
        mm.allocate().unwrap();

        let map = mm.frames().to_string();
        let lines: Vec<_> = map.lines().collect();
        assert_eq!(7, lines.len());
        assert_eq!("1       Assigned        1               1", lines[3]);
        assert_eq!("2       Assigned        1               2", lines[4]);
        assert!(lines[6].starts_with("---"));
        assert!(map.contains("3       Free            N/A             N/A"));
    }

    #[test]
    fn test_process_list_shows_state() {
        let config = SimulationConfig::new(1, 10, vec![5, 50]);
        let mut mm = MemoryManager::new(&config).unwrap();
        mm.allocate().unwrap();

        let list = mm.processes().to_string();
        assert!(list.contains("Process 1 - Memory Required: 5 KB, State: RUNNING"));
        assert!(list.contains("Process 2 - Memory Required: 50 KB, State: WAITING"));
    }

    #[test]
    fn test_usage_block() {
        let config = SimulationConfig::new(4, 10, vec![25]);
        let mut mm = MemoryManager::new(&config).unwrap();
        mm.allocate().unwrap();

        let usage = mm.memory_usage().to_string();
        assert!(usage.contains("Used Frames: 3"));
        assert!(usage.contains("Free Memory: 10 KB"));
        assert!(usage.contains("External Fragmentation: 25.00 %"));
        assert!(usage.contains("Memory Utilization: 75.00%"));
        assert!(usage.ends_with("Swap Time: 0 ms"));
    }

    #[test]
    fn test_performance_table_has_both_columns() {
        let report = ReplacementSimulator::new(3, 5)
            .unwrap()
            .with_fault_delay(Duration::ZERO)
            .with_seed(Some(3))
            .run();
        let table = report.to_string();
        assert!(table.contains("| Entity                      | FIFO          | LRU           |"));
        assert!(table.contains("| Page Faults                 |          5.00 |          5.00 |"));
        assert!(table.contains("| Thrashing Rate              |          1.00 |          1.00 |"));
        assert!(table.contains("Fragmentation (simulated %)"));
    }
}
