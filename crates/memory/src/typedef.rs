/// Identifier of a simulated process, assigned sequentially from 1.
pub type ProcessId = u32;
/// One-based page number within a process.
pub type PageNumber = u32;
/// Index of a physical frame in the frame table.
pub type FrameId = usize;
/// Index of a slot in the frame array of a replacement run.
pub type SlotId = usize;
/// A page id in a reference string.
pub type PageId = u32;
