//! Per-frame reconciliation of raw reads into stable tracked results.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::tracker::admission::{Admission, FramePhase};
use crate::tracker::entry::{Entry, EntryId};
use crate::tracker::error::DetectionError;
use crate::tracker::matching;
use crate::tracker::metadata::RegionMetadata;
use crate::tracker::region::{ExpansionProfile, Point, Region};
use crate::tracker::rotation::FrameOrientation;
use crate::tracker::snapshot::{FrameSnapshot, OverlayItem};

/// Configuration for the [`TrackingCache`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long (ms) an entry survives without being read again
    pub max_age_ms: u64,
    pub expansion: ExpansionProfile,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_ms: 500,
            expansion: ExpansionProfile::default(),
        }
    }
}

/// Temporal cache of reads.
///
/// Smooths over frames where a code fails to read, so results don't flicker.
/// For every frame:
///
/// 1. call [`start_frame`](Self::start_frame),
/// 2. call [`add_detection`](Self::add_detection) (or [`add_read`](Self::add_read))
///    once per read,
/// 3. call [`end_frame`](Self::end_frame).
///
/// Afterwards [`current`](Self::current), [`new_this_frame`](Self::new_this_frame)
/// and [`removed_this_frame`](Self::removed_this_frame) describe the frame.
pub struct TrackingCache<P, M> {
    /// Entries visible after the last completed frame
    current: Vec<Entry<P, M>>,
    /// Entries collected for the frame in progress
    working: Vec<Entry<P, M>>,
    /// `claimed[i]` is set once `current[i]` has been matched this frame
    claimed: Vec<bool>,
    new_entries: Vec<Entry<P, M>>,
    removed_entries: Vec<Entry<P, M>>,
    next_id: EntryId,
    frame_time: u64,
    phase: FramePhase,
    epoch: Instant,
    config: CacheConfig,
}

impl<P, M> Default for TrackingCache<P, M>
where
    P: PartialEq + Clone,
    M: Clone,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<P, M> TrackingCache<P, M>
where
    P: PartialEq + Clone,
    M: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            current: Vec::new(),
            working: Vec::new(),
            claimed: Vec::new(),
            new_entries: Vec::new(),
            removed_entries: Vec::new(),
            next_id: 0,
            frame_time: 0,
            phase: FramePhase::Idle,
            epoch: Instant::now(),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Begin a new frame stamped with the cache's own clock.
    pub fn start_frame(&mut self) {
        let now = self.epoch.elapsed().as_millis() as u64;
        self.start_frame_at(now);
    }

    /// Begin a new frame at an explicit timestamp (ms).
    pub fn start_frame_at(&mut self, timestamp_ms: u64) {
        if self.phase == FramePhase::Collecting {
            warn!(
                frame_time = self.frame_time,
                "start_frame called twice; discarding the unfinished frame"
            );
        }

        self.working.clear();
        self.new_entries.clear();
        self.removed_entries.clear();
        self.claimed.clear();
        self.claimed.resize(self.current.len(), false);

        self.frame_time = timestamp_ms;
        self.phase = FramePhase::Collecting;
    }

    /// Add one read to the frame in progress.
    ///
    /// `points` are the region corners in display orientation, clockwise.
    /// Malformed reads are rejected and dropped without touching the cache.
    pub fn add_detection(
        &mut self,
        payload: P,
        points: &[Point],
        metadata: M,
    ) -> Result<Admission, DetectionError> {
        if self.phase != FramePhase::Collecting {
            warn!("detection dropped: no frame in progress");
            return Err(DetectionError::FrameNotStarted);
        }

        let region = Region::from_points(points).inspect_err(|e| {
            warn!(error = %e, "detection dropped: malformed region");
        })?;

        let matched = matching::find_duplicate(&payload, &region, &self.current, &self.claimed);
        let id = match matched {
            Some(idx) => self.current[idx].id(),
            None => self.next_id,
        };

        // Build the entry before recording the match so a rejected region
        // leaves the frame untouched.
        let entry = Entry::new(
            id,
            payload,
            region,
            metadata,
            self.frame_time,
            &self.config.expansion,
        )
        .inspect_err(|e| {
            warn!(error = %e, "detection dropped: region cannot be expanded");
        })?;

        let admission = match matched {
            Some(idx) => {
                self.claimed[idx] = true;
                Admission::Matched(id)
            }
            None => Admission::New(self.issue_id()),
        };

        if admission.is_new() {
            debug!(id, center_x = region.center().x, center_y = region.center().y, "new entry");
            self.new_entries.push(entry.clone());
        }
        self.working.push(entry);

        Ok(admission)
    }

    /// Add a read whose region lives in its metadata.
    ///
    /// Reads without a region are skipped. The region is rotated into
    /// display orientation before matching.
    pub fn add_read(
        &mut self,
        payload: P,
        metadata: M,
        orientation: &FrameOrientation,
    ) -> Result<Admission, DetectionError>
    where
        M: RegionMetadata,
    {
        let Some(raw) = metadata.read_region() else {
            trace!("read without region skipped");
            return Ok(Admission::Skipped);
        };
        let points = orientation.apply_all(raw);
        self.add_detection(payload, &points, metadata)
    }

    /// Finish the frame: carry over recent unmatched entries and expire stale ones.
    pub fn end_frame(&mut self) {
        if self.phase != FramePhase::Collecting {
            warn!("end_frame called without start_frame; ignoring");
            return;
        }

        let previous = std::mem::take(&mut self.current);
        for (entry, claimed) in previous.into_iter().zip(self.claimed.drain(..)) {
            if claimed {
                continue;
            }
            if entry.is_stale(self.frame_time, self.config.max_age_ms) {
                debug!(id = entry.id(), last_seen = entry.last_seen(), "entry expired");
                self.removed_entries.push(entry);
            } else {
                self.working.push(entry);
            }
        }

        self.current = std::mem::take(&mut self.working);
        self.phase = FramePhase::Idle;

        trace!(
            frame_time = self.frame_time,
            current = self.current.len(),
            new = self.new_entries.len(),
            removed = self.removed_entries.len(),
            "frame complete"
        );
    }

    /// Drop every tracked entry. Issued IDs are not reused afterwards.
    pub fn clear(&mut self) {
        self.current.clear();
        self.working.clear();
        self.claimed.clear();
        self.new_entries.clear();
        self.removed_entries.clear();
        self.phase = FramePhase::Idle;
    }

    /// Entries visible after the last completed frame.
    pub fn current(&self) -> &[Entry<P, M>] {
        &self.current
    }

    /// Entries that first appeared in the last frame.
    pub fn new_this_frame(&self) -> &[Entry<P, M>] {
        &self.new_entries
    }

    /// Entries that expired in the last frame.
    pub fn removed_this_frame(&self) -> &[Entry<P, M>] {
        &self.removed_entries
    }

    pub fn frame_time(&self) -> u64 {
        self.frame_time
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// ID the next new entry will receive.
    pub fn next_id(&self) -> EntryId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Owned copy of the last frame's results, safe to hand to another thread.
    pub fn snapshot(&self) -> FrameSnapshot<P, M> {
        FrameSnapshot::new(
            self.frame_time,
            self.current.clone(),
            self.new_entries.clone(),
            self.removed_entries.clone(),
        )
    }

    /// What an overlay needs to draw each current entry.
    pub fn overlay_items(&self) -> Vec<OverlayItem<P>> {
        self.current.iter().map(OverlayItem::from_entry).collect()
    }

    fn issue_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
