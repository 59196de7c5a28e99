use log::debug;
use pagesim_error::errconfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{validate_frame_count, DEFAULT_FAULT_DELAY_US, MAX_FRAMES, MAX_PAGES};
use crate::replacer::Policy;
use crate::typedef::{PageId, SlotId};
use crate::Result;

/// What happened while replaying the reference string under one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRun {
    pub policy: Policy,
    pub page_faults: usize,
    pub hits: usize,
    /// The slot chosen on each fault, in order.
    pub victims: Vec<SlotId>,
    /// Slot contents once the trace is done.
    pub resident: Vec<Option<PageId>>,
    /// Wall-clock time spent on the reference steps, fault delays included.
    pub allocation_time: Duration,
}

/// Derived figures for one policy. Times are in microseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub policy: Policy,
    pub page_faults: usize,
    pub memory_utilization: f64,
    /// Simulated placeholder drawn at random, not a measurement.
    pub fragmentation: f64,
    pub allocation_time: f64,
    pub deallocation_time: f64,
    /// References per millisecond of allocation time.
    pub throughput: f64,
    pub response_time: f64,
    pub thrashing_rate: f64,
    pub overhead: f64,
}

impl PerformanceMetrics {
    fn derive(run: &PolicyRun, total_frames: usize, reference_count: usize, fragmentation: f64) -> Self {
        let allocation_time = run.allocation_time.as_secs_f64() * 1_000_000.0;
        let references = reference_count as f64;
        Self {
            policy: run.policy,
            page_faults: run.page_faults,
            memory_utilization: total_frames as f64 / MAX_FRAMES as f64 * 100.0,
            fragmentation,
            allocation_time,
            deallocation_time: allocation_time * 0.2,
            throughput: references / (allocation_time / 1000.0),
            response_time: allocation_time / references,
            thrashing_rate: run.page_faults as f64 / references,
            overhead: allocation_time * 0.1,
        }
    }
}

/// FIFO and LRU side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub fifo: PerformanceMetrics,
    pub lru: PerformanceMetrics,
}

/// Replays a reference string against an empty frame array under each policy.
#[derive(Debug)]
pub struct ReplacementSimulator {
    total_frames: usize,
    reference_string: Vec<PageId>,
    fault_delay: Duration,
    rng: StdRng,
}

impl ReplacementSimulator {
    /// Creates a simulator over the synthetic trace `1, 2, ..., reference_count`.
    pub fn new(total_frames: usize, reference_count: usize) -> Result<Self> {
        validate_reference_count(reference_count)?;
        let reference_string = (1..).take(reference_count).collect();
        Self::with_reference_string(total_frames, reference_string)
    }

    /// Creates a simulator over an explicit reference string.
    pub fn with_reference_string(total_frames: usize, reference_string: Vec<PageId>) -> Result<Self> {
        validate_frame_count(total_frames)?;
        validate_reference_count(reference_string.len())?;
        Ok(Self {
            total_frames,
            reference_string,
            fault_delay: Duration::from_micros(DEFAULT_FAULT_DELAY_US),
            rng: StdRng::seed_from_u64(rand::rng().random()),
        })
    }

    /// Sets the delay slept on every fault.
    pub fn with_fault_delay(mut self, fault_delay: Duration) -> Self {
        self.fault_delay = fault_delay;
        self
    }

    /// Seeds the fragmentation placeholder; `None` keeps a randomly seeded generator.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn reference_string(&self) -> &[PageId] {
        &self.reference_string
    }

    /// Replays the reference string under `policy`, starting from empty slots.
    pub fn run_policy(&self, policy: Policy) -> PolicyRun {
        let mut replacer = policy.replacer(self.total_frames);
        let mut slots: Vec<Option<PageId>> = vec![None; self.total_frames];
        let mut victims = Vec::new();
        let mut hits = 0;
        let mut allocation_time = Duration::ZERO;

        for &page in &self.reference_string {
            let start = Instant::now();

            // 1. check if the page is resident
            match slots.iter().position(|&s| s == Some(page)) {
                Some(slot) => {
                    hits += 1;
                    replacer.record_access(slot);
                }
                None => {
                    // 2. fault: pick a slot and load the page into it
                    let slot = replacer.evict();
                    if !self.fault_delay.is_zero() {
                        thread::sleep(self.fault_delay);
                    }
                    debug!("{}: page {} replaces {:?} in slot {}", policy, page, slots[slot], slot);
                    slots[slot] = Some(page);
                    replacer.record_access(slot);
                    victims.push(slot);
                }
            }

            allocation_time += start.elapsed();
        }

        PolicyRun {
            policy,
            page_faults: victims.len(),
            hits,
            victims,
            resident: slots,
            allocation_time,
        }
    }

    /// Runs every policy and derives the comparison table.
    pub fn run(&mut self) -> PerformanceReport {
        // `Policy::ALL` is FIFO then LRU.
        let [fifo, lru] = Policy::ALL.map(|policy| {
            let run = self.run_policy(policy);
            let fragmentation = f64::from(self.rng.random_range(1..=10u32)) / 10.0;
            PerformanceMetrics::derive(
                &run,
                self.total_frames,
                self.reference_string.len(),
                fragmentation,
            )
        });
        PerformanceReport { fifo, lru }
    }
}

fn validate_reference_count(reference_count: usize) -> Result<()> {
    if reference_count == 0 || reference_count > MAX_PAGES {
        return errconfig!(
            "reference string length must be between 1 and {}, got {}",
            MAX_PAGES,
            reference_count
        );
    }
    Ok(())
}
