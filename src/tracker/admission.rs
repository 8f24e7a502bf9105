use crate::tracker::entry::EntryId;

/// Outcome of offering one detection to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// No earlier entry matched; a fresh ID was issued
    New(EntryId),
    /// Matched an entry from the previous frame and inherited its ID
    Matched(EntryId),
    /// The read carried no region and was ignored
    Skipped,
}

impl Admission {
    pub fn id(&self) -> Option<EntryId> {
        match self {
            Admission::New(id) | Admission::Matched(id) => Some(*id),
            Admission::Skipped => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Admission::New(_))
    }
}

/// Where the cache is in its per-frame call sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    /// Between frames; results are readable
    #[default]
    Idle,
    /// `start_frame()` was called and detections are being collected
    Collecting,
}
