//! A single tracked read (one physical code followed across frames).

use crate::tracker::error::RegionError;
use crate::tracker::region::{ExpansionProfile, Point, Region};

/// Stable identity of a tracked code. Issued in increasing order, never reused.
pub type EntryId = u64;

/// Tracked read.
///
/// Entries are immutable: when a code is seen again the cache builds a new
/// entry carrying the old ID instead of updating this one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<P, M> {
    id: EntryId,
    payload: P,
    region: Region,
    /// Tolerant region used only for matching, derived once from `region`
    expanded_region: Region,
    metadata: M,
    /// Frame time (ms) of the last frame this code was actually read in
    last_seen: u64,
}

impl<P, M> Entry<P, M> {
    pub(crate) fn new(
        id: EntryId,
        payload: P,
        region: Region,
        metadata: M,
        last_seen: u64,
        profile: &ExpansionProfile,
    ) -> Result<Self, RegionError> {
        Ok(Self {
            id,
            payload,
            expanded_region: region.expanded_with(profile)?,
            region,
            metadata,
            last_seen,
        })
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn points(&self) -> &[Point; 4] {
        self.region.points()
    }

    pub fn center(&self) -> Point {
        self.region.center()
    }

    pub fn expanded_region(&self) -> &Region {
        &self.expanded_region
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }

    /// True once more than `max_age_ms` has passed since the last read.
    pub fn is_stale(&self, frame_time: u64, max_age_ms: u64) -> bool {
        frame_time.saturating_sub(self.last_seen) > max_age_ms
    }
}
