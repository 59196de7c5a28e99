use crate::typedef::{PageNumber, ProcessId};
use log::{debug, warn};

/// A page recorded in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackingStoreEntry {
    pub process_id: ProcessId,
    pub page_number: PageNumber,
    /// Set once the page has been swapped back in.
    pub resident: bool,
}

/// Append-only log of pages swapped out of frames.
///
/// Entries are never removed; swapping a page back in only flips its `resident` flag, so the log
/// keeps growing until `capacity` is reached.
#[derive(Debug)]
pub struct BackingStore {
    entries: Vec<BackingStoreEntry>,
    /// The maximum number of entries the store accepts.
    capacity: usize,
}

impl BackingStore {
    /// Creates an empty store holding at most `capacity` entries.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Appends a non-resident entry for the page and returns its index.
    ///
    /// No duplicate check is made. Returns `None` without recording anything if the store is full.
    pub(crate) fn swap_out(
        &mut self,
        process_id: ProcessId,
        page_number: PageNumber,
    ) -> Option<usize> {
        if self.is_full() {
            warn!(
                "Backing store full ({} entries), dropping page {} of process {}",
                self.capacity, page_number, process_id
            );
            return None;
        }
        self.entries.push(BackingStoreEntry {
            process_id,
            page_number,
            resident: false,
        });
        debug!(
            "Swapping out page {} of process {} to disk",
            page_number, process_id
        );
        Some(self.entries.len() - 1)
    }

    /// Marks the earliest matching non-resident entry as resident and returns its index.
    ///
    /// Later duplicates are left untouched. The page is not placed back into a frame.
    pub(crate) fn swap_in(&mut self, process_id: ProcessId, page_number: PageNumber) -> Option<usize> {
        let index = self.entries.iter().position(|e| {
            e.process_id == process_id && e.page_number == page_number && !e.resident
        })?;
        self.entries[index].resident = true;
        debug!(
            "Swapping in page {} of process {} from disk",
            page_number, process_id
        );
        Some(index)
    }

    pub fn entries(&self) -> &[BackingStoreEntry] {
        &self.entries
    }

    /// Returns the number of entries ever appended.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Returns the entries of `process_id` that are still swapped out.
    pub fn swapped_out(&self, process_id: ProcessId) -> impl Iterator<Item = &BackingStoreEntry> {
        self.entries
            .iter()
            .filter(move |e| e.process_id == process_id && !e.resident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_out_appends_duplicates() {
        let mut store = BackingStore::new(8);
        assert_eq!(Some(0), store.swap_out(1, 1));
        assert_eq!(Some(1), store.swap_out(1, 1));
        assert_eq!(Some(2), store.swap_out(2, 3));
        assert_eq!(3, store.len());
        assert_eq!(2, store.swapped_out(1).count());
        assert!(store.entries().iter().all(|e| !e.resident));
    }

    #[test]
    fn test_swap_in_flips_earliest_match_only() {
        let mut store = BackingStore::new(8);
        store.swap_out(1, 2);
        store.swap_out(3, 2);
        store.swap_out(1, 2);

        assert_eq!(Some(0), store.swap_in(1, 2));
        assert!(store.entries()[0].resident);
        assert!(!store.entries()[2].resident);

        // The next swap-in of the same page takes the duplicate.
        assert_eq!(Some(2), store.swap_in(1, 2));
        assert_eq!(None, store.swap_in(1, 2));
        assert_eq!(None, store.swap_in(9, 9));

        // Swapping in never removes entries.
        assert_eq!(3, store.len());
    }

    #[test]
    fn test_full_store_drops_swap_out() {
        let mut store = BackingStore::new(2);
        store.swap_out(1, 1);
        store.swap_out(1, 2);
        assert!(store.is_full());
        assert_eq!(None, store.swap_out(1, 3));
        assert_eq!(2, store.len());
    }
}
