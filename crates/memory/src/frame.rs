use core::fmt;

use crate::config::validate_frame_count;
use crate::typedef::{FrameId, PageNumber, ProcessId};
use crate::Result;

/// The page held by an assigned frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidentPage {
    pub process_id: ProcessId,
    pub page_number: PageNumber,
}

/// A physical frame. A free frame carries neither an owner nor a page number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    page: Option<ResidentPage>,
}

impl Frame {
    /// Creates a free frame.
    pub(crate) fn new() -> Self {
        Self { page: None }
    }

    /// Checks if the frame holds a page.
    pub fn is_assigned(&self) -> bool {
        self.page.is_some()
    }

    /// Returns the page held by this frame, if any.
    pub fn page(&self) -> Option<ResidentPage> {
        self.page
    }

    /// Returns the id of the owning process, if any.
    pub fn owner(&self) -> Option<ProcessId> {
        self.page.map(|p| p.process_id)
    }

    /// Returns the page number within the owning process, if any.
    pub fn page_number(&self) -> Option<PageNumber> {
        self.page.map(|p| p.page_number)
    }

    pub(crate) fn assign(&mut self, process_id: ProcessId, page_number: PageNumber) {
        self.page = Some(ResidentPage {
            process_id,
            page_number,
        });
    }

    /// Frees the frame, returning the page it held.
    pub(crate) fn reset(&mut self) -> Option<ResidentPage> {
        self.page.take()
    }
}

/// The fixed-size registry of physical frames.
///
/// The table is sized once at construction and never grows or shrinks.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl fmt::Debug for FrameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTable")
            .field("total", &self.len())
            .field("used", &self.used_count())
            .finish()
    }
}

impl FrameTable {
    /// Creates a table of `total_frames` free frames, rejecting counts outside `1..=MAX_FRAMES`.
    pub fn new(total_frames: usize) -> Result<Self> {
        validate_frame_count(total_frames)?;
        let mut frames = Vec::with_capacity(total_frames);
        frames.resize_with(total_frames, Frame::new);
        Ok(Self { frames })
    }

    /// Returns the total number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.get(frame_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Returns the number of assigned frames.
    pub fn used_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_assigned()).count()
    }

    /// Returns the number of free frames.
    pub fn free_count(&self) -> usize {
        self.len() - self.used_count()
    }

    /// Returns the number of frames held by `process_id`.
    pub fn owned_by(&self, process_id: ProcessId) -> usize {
        self.frames
            .iter()
            .filter(|f| f.owner() == Some(process_id))
            .count()
    }

    /// Assigns a page to a free frame. Returns false if the frame is out of range or taken.
    pub(crate) fn assign(
        &mut self,
        frame_id: FrameId,
        process_id: ProcessId,
        page_number: PageNumber,
    ) -> bool {
        match self.frames.get_mut(frame_id) {
            Some(frame) if !frame.is_assigned() => {
                frame.assign(process_id, page_number);
                true
            }
            _ => false,
        }
    }

    /// Frees a single frame, returning the page it held.
    pub(crate) fn release(&mut self, frame_id: FrameId) -> Option<ResidentPage> {
        self.frames.get_mut(frame_id).and_then(Frame::reset)
    }

    /// Frees every frame held by `process_id` and returns how many were freed.
    pub(crate) fn release_process(&mut self, process_id: ProcessId) -> usize {
        self.frames
            .iter_mut()
            .filter(|f| f.owner() == Some(process_id))
            .filter_map(Frame::reset)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FRAMES;
    use crate::Error;

    #[test]
    fn test_new_table_is_free() {
        let table = FrameTable::new(4).unwrap();
        assert_eq!(4, table.len());
        assert_eq!(4, table.free_count());
        assert!(table.iter().all(|f| f.owner().is_none() && f.page_number().is_none()));
    }

    #[test]
    fn test_frame_count_bounds() {
        assert!(matches!(FrameTable::new(0), Err(Error::Config(_))));
        assert!(matches!(
            FrameTable::new(MAX_FRAMES + 1),
            Err(Error::Config(_))
        ));
        assert_eq!(MAX_FRAMES, FrameTable::new(MAX_FRAMES).unwrap().len());
    }

    #[test]
    fn test_assign_and_release() {
        let mut table = FrameTable::new(3).unwrap();
        assert!(table.assign(1, 7, 1));
        // A taken frame cannot be reassigned.
        assert!(!table.assign(1, 8, 1));
        assert!(!table.assign(3, 7, 2));

        let frame = table.get(1).unwrap();
        assert!(frame.is_assigned());
        assert_eq!(Some(7), frame.owner());
        assert_eq!(Some(1), frame.page_number());
        assert_eq!(1, table.used_count());

        assert_eq!(
            Some(ResidentPage {
                process_id: 7,
                page_number: 1
            }),
            table.release(1)
        );
        assert_eq!(None, table.release(1));
        assert_eq!(Frame::default(), *table.get(1).unwrap());
    }

    #[test]
    fn test_release_process_only_touches_owner() {
        let mut table = FrameTable::new(5).unwrap();
        table.assign(0, 1, 1);
        table.assign(1, 2, 1);
        table.assign(2, 1, 2);
        table.assign(4, 2, 2);

        assert_eq!(2, table.release_process(1));
        assert_eq!(0, table.owned_by(1));
        assert_eq!(2, table.owned_by(2));
        assert_eq!(3, table.free_count());
        assert_eq!(0, table.release_process(1));
    }
}
