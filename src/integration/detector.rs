//! Trait for code readers that feed the cache.

use crate::tracker::Metadata;

/// One decoded code as reported by a reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Read<P, M = Metadata> {
    pub payload: P,
    /// Reader metadata; the read region is looked up through
    /// [`RegionMetadata`](crate::tracker::RegionMetadata)
    pub metadata: M,
}

impl<P, M> Read<P, M> {
    pub fn new(payload: P, metadata: M) -> Self {
        Self { payload, metadata }
    }
}

/// Trait for barcode/watermark readers.
///
/// Implement this trait to connect any reader to the cache.
///
/// # Example
///
/// ```ignore
/// use readcache_rs::{Metadata, Read, ReadSource};
///
/// struct MyReader {
///     // Your decoder here
/// }
///
/// impl ReadSource<String, Metadata> for MyReader {
///     type Error = std::io::Error;
///
///     fn read(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<Read<String>>, Self::Error> {
///         // Decode the frame and return every code found
///         Ok(vec![])
///     }
/// }
/// ```
pub trait ReadSource<P, M = Metadata> {
    /// Error type for reader failures.
    type Error;

    /// Decode one frame of raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn read(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Read<P, M>>, Self::Error>;
}

/// Helper trait for converting reader-specific output into [`Read`]s.
pub trait IntoReads<P, M = Metadata> {
    fn into_reads(self) -> Vec<Read<P, M>>;
}

impl<P, M> IntoReads<P, M> for Vec<Read<P, M>> {
    fn into_reads(self) -> Vec<Read<P, M>> {
        self
    }
}

impl<P, M> IntoReads<P, M> for Vec<(P, M)> {
    fn into_reads(self) -> Vec<Read<P, M>> {
        self.into_iter()
            .map(|(payload, metadata)| Read::new(payload, metadata))
            .collect()
    }
}
