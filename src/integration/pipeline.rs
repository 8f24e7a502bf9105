//! CachePipeline for combining a code reader with the tracking cache.

use tracing::warn;

use crate::tracker::{
    CacheConfig, FrameOrientation, FrameSnapshot, Metadata, RegionMetadata, Rotation,
    TrackingCache,
};

use super::ReadSource;

/// Bundles a [`ReadSource`] with a [`TrackingCache`].
///
/// Each call to [`process_frame`](Self::process_frame) runs the reader on one
/// image and feeds every read through a full cache frame.
pub struct CachePipeline<S, P, M = Metadata>
where
    S: ReadSource<P, M>,
{
    source: S,
    cache: TrackingCache<P, M>,
}

impl<S, P, M> CachePipeline<S, P, M>
where
    S: ReadSource<P, M>,
    P: PartialEq + Clone,
    M: Clone + RegionMetadata,
{
    /// Create a new pipeline with the given reader and cache config.
    pub fn new(source: S, config: CacheConfig) -> Self {
        Self {
            source,
            cache: TrackingCache::new(config),
        }
    }

    /// Create a new pipeline with default cache configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, CacheConfig::default())
    }

    /// Process a single frame and return the resulting snapshot.
    ///
    /// Reads with malformed regions are logged and dropped; reader errors
    /// abort the frame before the cache is touched.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `rotation` - Rotation from the captured image to display orientation
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        rotation: Rotation,
    ) -> Result<FrameSnapshot<P, M>, S::Error> {
        let reads = self.source.read(input, width, height)?;
        let orientation = FrameOrientation::new(rotation, width, height);

        self.cache.start_frame();
        for read in reads {
            if let Err(e) = self.cache.add_read(read.payload, read.metadata, &orientation) {
                warn!(error = %e, "read dropped");
            }
        }
        self.cache.end_frame();

        Ok(self.cache.snapshot())
    }

    /// Get a reference to the underlying reader.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying reader.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying cache.
    pub fn cache(&self) -> &TrackingCache<P, M> {
        &self.cache
    }

    /// Get a mutable reference to the underlying cache.
    pub fn cache_mut(&mut self) -> &mut TrackingCache<P, M> {
        &mut self.cache
    }
}
