use crate::typedef::{PageNumber, ProcessId};
use crate::{Error, Result};
use pagesim_error::errconfig;
use serde::Deserialize;
use std::time::Duration;

/// Upper bound on the number of physical frames.
pub const MAX_FRAMES: usize = 100;
/// Upper bound on the number of processes.
pub const MAX_PROCESSES: usize = 100;
/// Upper bound on the length of a reference string.
pub const MAX_PAGES: usize = 100;
/// Default number of entries the backing store accepts.
pub const DEFAULT_BACKING_STORE_CAPACITY: usize = 200;
/// Swap time charged for every page brought back from the backing store.
pub const SWAP_IN_COST_MS: u64 = 10;
/// Default delay slept on every fault of a replacement run.
pub const DEFAULT_FAULT_DELAY_US: u64 = 100;

/// An ad-hoc request applied to a running simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// Free every frame held by a process.
    Deallocate { process_id: ProcessId },
    /// Grow a process's requirement and rerun allocation.
    Request { process_id: ProcessId, extra_kb: u32 },
    /// Replace every requirement, in registration order, and rerun allocation.
    Update { requirements: Vec<u32> },
    /// Mark a swapped-out page as resident again.
    SwapIn {
        process_id: ProcessId,
        page_number: PageNumber,
    },
}

/// Everything needed to set up a simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub total_frames: usize,
    pub page_size_kb: u32,
    /// Memory requirement of each process in KB, in registration order.
    pub processes: Vec<u32>,
    #[serde(default = "default_backing_store_capacity")]
    pub backing_store_capacity: usize,
    /// Seed for the simulated fragmentation figure. Unseeded runs draw from the thread rng.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_fault_delay_us")]
    pub fault_delay_us: u64,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

fn default_backing_store_capacity() -> usize {
    DEFAULT_BACKING_STORE_CAPACITY
}

fn default_fault_delay_us() -> u64 {
    DEFAULT_FAULT_DELAY_US
}

impl SimulationConfig {
    /// Creates a configuration with default store capacity, fault delay and no operations.
    pub fn new(total_frames: usize, page_size_kb: u32, processes: Vec<u32>) -> Self {
        Self {
            total_frames,
            page_size_kb,
            processes,
            backing_store_capacity: DEFAULT_BACKING_STORE_CAPACITY,
            seed: None,
            fault_delay_us: DEFAULT_FAULT_DELAY_US,
            operations: Vec::new(),
        }
    }

    /// Parses and validates a TOML scenario.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| Error::InvalidInput(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the fragmentation seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every bound; the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        validate_frame_count(self.total_frames)?;
        validate_page_size(self.page_size_kb)?;
        validate_requirements(&self.processes)?;
        if self.backing_store_capacity == 0 {
            return errconfig!("backing store capacity must be positive");
        }
        Ok(())
    }

    pub fn fault_delay(&self) -> Duration {
        Duration::from_micros(self.fault_delay_us)
    }
}

pub(crate) fn validate_frame_count(total_frames: usize) -> Result<()> {
    if total_frames == 0 || total_frames > MAX_FRAMES {
        return errconfig!(
            "frame count must be between 1 and {}, got {}",
            MAX_FRAMES,
            total_frames
        );
    }
    Ok(())
}

pub(crate) fn validate_page_size(page_size_kb: u32) -> Result<()> {
    if page_size_kb == 0 {
        return errconfig!("page size must be positive");
    }
    Ok(())
}

/// Checks a full requirement list: 1..=MAX_PROCESSES entries, each positive.
pub(crate) fn validate_requirements(requirements: &[u32]) -> Result<()> {
    if requirements.is_empty() || requirements.len() > MAX_PROCESSES {
        return errconfig!(
            "process count must be between 1 and {}, got {}",
            MAX_PROCESSES,
            requirements.len()
        );
    }
    if let Some(pos) = requirements.iter().position(|&kb| kb == 0) {
        return errconfig!("memory requirement of process {} must be positive", pos + 1);
    }
    Ok(())
}
