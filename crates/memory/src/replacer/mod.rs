pub mod fifo_replacer;
pub mod lru_replacer;
#[allow(clippy::module_inception)]
pub mod replacer;

pub use fifo_replacer::FifoReplacer;
pub use lru_replacer::LruReplacer;
pub use replacer::{Policy, Replacer};
