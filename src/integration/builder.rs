//! Builder for creating `Read` objects from various region formats.

use crate::integration::Read;
use crate::tracker::{Metadata, MetadataValue, Point, READ_REGION, Region, RegionError};

/// Builder for creating [`Read`]s carrying a region in their metadata.
#[derive(Debug, Clone)]
pub struct ReadBuilder<P> {
    payload: P,
    corners: Result<Vec<Point>, RegionError>,
    metadata: Metadata,
}

impl<P> ReadBuilder<P> {
    /// Start a read for the given payload, with no region yet.
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            corners: Ok(Vec::new()),
            metadata: Metadata::new(),
        }
    }

    /// Set the region from integer corners, clockwise.
    pub fn corners(mut self, corners: &[Point]) -> Self {
        self.corners = Ok(corners.to_vec());
        self
    }

    /// Set the region from float corners `[x, y]`, rounded to whole pixels.
    pub fn corners_f32(mut self, corners: &[[f32; 2]]) -> Self {
        self.corners = corners
            .iter()
            .enumerate()
            .map(|(index, &[x, y])| {
                if !x.is_finite() || !y.is_finite() {
                    return Err(RegionError::NonFinite { index });
                }
                let (x, y) = (x.round(), y.round());
                // i32::MAX is not representable; as f32 it rounds up to 2^31.
                let range = i32::MIN as f32..i32::MAX as f32;
                if !range.contains(&x) || !range.contains(&y) {
                    return Err(RegionError::OutOfRange { index });
                }
                Ok(Point::new(x as i32, y as i32))
            })
            .collect();
        self
    }

    /// Set the region from an axis-aligned box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let region = Region::from_tlbr(x1, y1, x2, y2);
        self.corners(region.points())
    }

    /// Set the region from center, width and height.
    pub fn xywh(self, cx: i32, cy: i32, w: i32, h: i32) -> Self {
        self.tlbr(cx - w / 2, cy - h / 2, cx + (w - w / 2), cy + (h - h / 2))
    }

    /// Attach an extra metadata value.
    pub fn meta(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Build the final [`Read`]. Fails if the region is not exactly four
    /// valid corners.
    pub fn build(self) -> Result<Read<P>, RegionError> {
        let corners = self.corners?;
        Region::from_points(&corners)?;

        let mut metadata = self.metadata;
        metadata.insert(READ_REGION, MetadataValue::Points(corners));
        Ok(Read::new(self.payload, metadata))
    }

    /// Build a read that carries no region. The cache skips these.
    pub fn build_without_region(self) -> Read<P> {
        Read::new(self.payload, self.metadata)
    }
}
