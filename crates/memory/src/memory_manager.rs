use log::{debug, info, warn};
use pagesim_error::Error;
use std::time::Duration;

use crate::backing_store::BackingStore;
use crate::config::{Operation, SimulationConfig};
use crate::frame::FrameTable;
use crate::process::{required_pages, Process, ProcessRegistry};
use crate::simulator::{PerformanceReport, ReplacementSimulator};
use crate::stats::{MemoryStats, MemoryUsage};
use crate::typedef::{PageNumber, ProcessId};
use crate::Result;

/// The result of one allocation attempt for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub process_id: ProcessId,
    pub pages_needed: usize,
    /// Free frames claimed in the first scan.
    pub claimed_pages: usize,
    /// Frames of this process swapped out to cover the shortfall.
    pub evicted_pages: usize,
    /// Frames the process holds once the attempt is over.
    pub resident_pages: usize,
}

impl AllocationOutcome {
    pub fn is_satisfied(&self) -> bool {
        self.resident_pages == self.pages_needed
    }

    /// Converts an unsatisfied outcome into [`Error::AllocationFailure`].
    pub fn check(&self) -> Result<()> {
        if self.is_satisfied() {
            Ok(())
        } else {
            Err(Error::AllocationFailure {
                process_id: self.process_id,
                resident: self.resident_pages,
                needed: self.pages_needed,
            })
        }
    }
}

/// Owns every table of a simulation and runs allocation over them.
#[derive(Debug)]
pub struct MemoryManager {
    frames: FrameTable,           // Physical frames, fixed in number
    backing_store: BackingStore,  // Pages swapped out of frames
    processes: ProcessRegistry,   // Processes in registration order
    stats: MemoryStats,           // Fault and swap counters
    page_size_kb: u32,
    seed: Option<u64>,
    fault_delay: Duration,
}

impl MemoryManager {
    /// Builds the tables described by `config`. Nothing is allocated yet.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            frames: FrameTable::new(config.total_frames)?,
            backing_store: BackingStore::new(config.backing_store_capacity),
            processes: ProcessRegistry::from_requirements(&config.processes)?,
            stats: MemoryStats::default(),
            page_size_kb: config.page_size_kb,
            seed: config.seed,
            fault_delay: config.fault_delay(),
        })
    }

    /// Runs one allocation attempt for every process, in registration order.
    ///
    /// Each attempt starts from scratch for its process: the frames it held are released and
    /// free frames are claimed in index order, numbering pages from 1. If free frames run out,
    /// the process's own frames are swapped out until claimed plus evicted pages reach the
    /// requirement. Frames held by other processes are never reclaimed, so a short process
    /// always ends up waiting.
    pub fn allocate(&mut self) -> Result<Vec<AllocationOutcome>> {
        let mut outcomes = Vec::with_capacity(self.processes.len());
        for process in self.processes.iter_mut() {
            let outcome = allocate_process(
                process,
                &mut self.frames,
                &mut self.backing_store,
                &mut self.stats,
                self.page_size_kb,
            )?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Frees every frame held by `process_id` and returns how many were freed.
    ///
    /// Backing store entries of the process stay where they are, and the process keeps its state.
    pub fn deallocate(&mut self, process_id: ProcessId) -> usize {
        let freed = self.frames.release_process(process_id);
        info!("Memory deallocated for process {} ({} frames)", process_id, freed);
        freed
    }

    /// Records a page of `process_id` as swapped out and counts a page fault.
    ///
    /// Returns `None` when the backing store is full; nothing is counted then.
    pub fn swap_out(&mut self, process_id: ProcessId, page_number: PageNumber) -> Option<usize> {
        swap_out_page(
            &mut self.backing_store,
            &mut self.stats,
            process_id,
            page_number,
        )
    }

    /// Marks the earliest swapped-out copy of the page as resident and charges the swap time.
    ///
    /// Only bookkeeping changes; no frame is assigned. Returns false if no such copy exists.
    pub fn swap_in(&mut self, process_id: ProcessId, page_number: PageNumber) -> bool {
        match self.backing_store.swap_in(process_id, page_number) {
            Some(_) => {
                self.stats.record_swap_in();
                true
            }
            None => {
                debug!(
                    "Page {} of process {} is not swapped out",
                    page_number, process_id
                );
                false
            }
        }
    }

    /// Grows the requirement of `process_id` by `extra_kb` and reruns allocation.
    pub fn request_additional_memory(
        &mut self,
        process_id: ProcessId,
        extra_kb: u32,
    ) -> Result<Vec<AllocationOutcome>> {
        self.processes.grow_requirement(process_id, extra_kb)?;
        info!(
            "Process {} requested {} KB more memory",
            process_id, extra_kb
        );
        self.allocate()
    }

    /// Replaces every requirement and reruns allocation.
    pub fn update_requirements(&mut self, requirements: &[u32]) -> Result<Vec<AllocationOutcome>> {
        self.processes.update_requirements(requirements)?;
        self.allocate()
    }

    /// Applies a scripted operation. Operations that do not allocate return no outcomes.
    pub fn apply(&mut self, operation: &Operation) -> Result<Vec<AllocationOutcome>> {
        match operation {
            Operation::Deallocate { process_id } => {
                self.deallocate(*process_id);
                Ok(Vec::new())
            }
            Operation::Request {
                process_id,
                extra_kb,
            } => self.request_additional_memory(*process_id, *extra_kb),
            Operation::Update { requirements } => self.update_requirements(requirements),
            Operation::SwapIn {
                process_id,
                page_number,
            } => {
                self.swap_in(*process_id, *page_number);
                Ok(Vec::new())
            }
        }
    }

    /// Returns a snapshot of frame usage, fragmentation and counters.
    pub fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage::collect(&self.frames, &self.processes, self.page_size_kb, &self.stats)
    }

    /// Compares FIFO and LRU using the frame count and process count as trace parameters.
    pub fn performance_report(&self) -> Result<PerformanceReport> {
        let mut simulator = ReplacementSimulator::new(self.frames.len(), self.processes.len())?
            .with_fault_delay(self.fault_delay)
            .with_seed(self.seed);
        Ok(simulator.run())
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    pub fn processes(&self) -> &ProcessRegistry {
        &self.processes
    }

    pub fn backing_store(&self) -> &BackingStore {
        &self.backing_store
    }

    pub fn stats(&self) -> &MemoryStats {
        &self.stats
    }

    pub fn page_size_kb(&self) -> u32 {
        self.page_size_kb
    }
}

fn swap_out_page(
    backing_store: &mut BackingStore,
    stats: &mut MemoryStats,
    process_id: ProcessId,
    page_number: PageNumber,
) -> Option<usize> {
    let index = backing_store.swap_out(process_id, page_number)?;
    stats.record_fault();
    Some(index)
}

/// Runs a single allocation attempt for `process`.
fn allocate_process(
    process: &mut Process,
    frames: &mut FrameTable,
    backing_store: &mut BackingStore,
    stats: &mut MemoryStats,
    page_size_kb: u32,
) -> Result<AllocationOutcome> {
    let process_id = process.process_id();
    let pages_needed = required_pages(process.memory_requirement_kb(), page_size_kb)?;

    // 1. start from scratch for this process
    frames.release_process(process_id);

    // 2. claim free frames in index order
    let mut claimed_pages = 0;
    for frame_id in 0..frames.len() {
        if claimed_pages == pages_needed {
            break;
        }
        let page_number = PageNumber::try_from(claimed_pages + 1)?;
        if frames.assign(frame_id, process_id, page_number) {
            claimed_pages += 1;
        }
    }

    // 3. on shortfall, swap out this process's own frames
    let mut evicted_pages = 0;
    if claimed_pages < pages_needed {
        for frame_id in 0..frames.len() {
            if claimed_pages + evicted_pages >= pages_needed {
                break;
            }
            if frames.get(frame_id).and_then(|f| f.owner()) != Some(process_id) {
                continue;
            }
            if let Some(page) = frames.release(frame_id) {
                swap_out_page(backing_store, stats, process_id, page.page_number);
                evicted_pages += 1;
            }
        }
    }

    // 4. update the process state
    let outcome = AllocationOutcome {
        process_id,
        pages_needed,
        claimed_pages,
        evicted_pages,
        resident_pages: frames.owned_by(process_id),
    };
    if outcome.is_satisfied() {
        process.mark_running();
        info!("Process {} allocated {} pages", process_id, pages_needed);
    } else {
        process.mark_waiting();
        warn!(
            "Process {} could not be allocated due to insufficient memory ({} of {} pages resident)",
            process_id, outcome.resident_pages, pages_needed
        );
    }
    Ok(outcome)
}
