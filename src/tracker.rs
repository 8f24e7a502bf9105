mod admission;
mod cache;
mod entry;
mod error;
mod matching;
mod metadata;
mod region;
mod rotation;
mod snapshot;

pub use admission::{Admission, FramePhase};
pub use cache::{CacheConfig, TrackingCache};
pub use entry::{Entry, EntryId};
pub use error::{DetectionError, RegionError};
pub use matching::{find_duplicate, has_overlap};
pub use metadata::{Metadata, MetadataValue, READ_REGION, RegionMetadata};
pub use region::{ExpansionProfile, Point, Region, centers_overlap};
pub use rotation::{FrameOrientation, Rotation};
pub use snapshot::{FrameSnapshot, OverlayItem};
