//! The memory-allocation and page-replacement engine of pagesim.
//!
//! [`memory_manager::MemoryManager`] owns the frame table, the backing store, the process
//! registry and the fault counters, and runs allocation over them. The replacement comparison
//! lives in [`simulator::ReplacementSimulator`] and is independent of that state.
pub mod backing_store;
pub mod config;
pub mod frame;
pub mod memory_manager;
pub mod process;
pub mod replacer;
pub mod report;
pub mod simulator;
pub mod stats;
pub mod typedef;

pub use pagesim_error::Error;
pub type Result<T> = std::result::Result<T, pagesim_error::Error>;
