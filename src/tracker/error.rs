//! Error types for read regions and detection input.

use thiserror::Error;

/// Malformed region geometry supplied by a reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("region needs exactly 4 corner points, got {0}")]
    CornerCount(usize),
    #[error("region corner {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("region corner {index} does not fit in pixel coordinates")]
    OutOfRange { index: usize },
}

/// Reasons a detection was rejected by the cache.
///
/// A rejected detection is dropped; the cache state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    #[error("invalid read region: {0}")]
    InvalidRegion(#[from] RegionError),
    #[error("detection added outside of a frame; call start_frame() first")]
    FrameNotStarted,
    #[error("unsupported rotation of {0} degrees; must be a multiple of 90")]
    UnsupportedRotation(i32),
}
