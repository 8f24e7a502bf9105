//! Owned per-frame results for handing off to consumers.

use crate::tracker::entry::{Entry, EntryId};
use crate::tracker::region::Point;

/// Immutable copy of one frame's results.
///
/// The cache itself is single-threaded; a capture thread can publish one of
/// these per frame for a UI thread to read.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot<P, M> {
    frame_time: u64,
    current: Vec<Entry<P, M>>,
    new_entries: Vec<Entry<P, M>>,
    removed_entries: Vec<Entry<P, M>>,
}

impl<P, M> FrameSnapshot<P, M> {
    pub(crate) fn new(
        frame_time: u64,
        current: Vec<Entry<P, M>>,
        new_entries: Vec<Entry<P, M>>,
        removed_entries: Vec<Entry<P, M>>,
    ) -> Self {
        Self {
            frame_time,
            current,
            new_entries,
            removed_entries,
        }
    }

    pub fn frame_time(&self) -> u64 {
        self.frame_time
    }

    pub fn current(&self) -> &[Entry<P, M>] {
        &self.current
    }

    pub fn new_this_frame(&self) -> &[Entry<P, M>] {
        &self.new_entries
    }

    pub fn removed_this_frame(&self) -> &[Entry<P, M>] {
        &self.removed_entries
    }

    pub fn current_ids(&self) -> Vec<EntryId> {
        self.current.iter().map(Entry::id).collect()
    }
}

/// Everything an overlay needs to draw one tracked code.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem<P> {
    pub id: EntryId,
    pub points: [Point; 4],
    pub payload: P,
    pub center: Point,
}

impl<P: Clone> OverlayItem<P> {
    pub fn from_entry<M>(entry: &Entry<P, M>) -> Self {
        Self {
            id: entry.id(),
            points: *entry.points(),
            payload: entry.payload().clone(),
            center: entry.center(),
        }
    }
}
