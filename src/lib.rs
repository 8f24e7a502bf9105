//! Temporal cache for barcode and watermark reads.
//!
//! Readers decode each video frame on its own, so a code that is plainly in
//! view may read on one frame and miss the next, and its reported corners
//! jitter. [`TrackingCache`] folds those per-frame reads into a stable set of
//! tracked entries with IDs that survive across frames, and reports which
//! entries appeared or expired on each frame.

pub mod integration;
pub mod tracker;

pub use integration::{CachePipeline, IntoReads, Read, ReadBuilder, ReadSource};
pub use tracker::{
    Admission, CacheConfig, DetectionError, Entry, EntryId, FrameOrientation, FrameSnapshot,
    Metadata, MetadataValue, Point, Region, RegionError, Rotation, TrackingCache,
};
