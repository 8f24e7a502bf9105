//! Opaque reader metadata carried alongside each read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tracker::region::Point;

/// Metadata key holding the raw read region corners.
pub const READ_REGION: &str = "read_region";

/// A single metadata value as reported by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Points(Vec<Point>),
}

/// Reader metadata bag. Passed through the cache unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    values: BTreeMap<String, MetadataValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata holding only a read region.
    pub fn with_region(points: Vec<Point>) -> Self {
        let mut metadata = Self::new();
        metadata.insert(READ_REGION, MetadataValue::Points(points));
        metadata
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: MetadataValue,
    ) -> Option<MetadataValue> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Access to the read region stored in a metadata type.
///
/// This is the only thing the cache ever asks of metadata.
pub trait RegionMetadata {
    /// Raw region corners as reported by the reader, before rotation.
    fn read_region(&self) -> Option<&[Point]>;
}

impl RegionMetadata for Metadata {
    fn read_region(&self) -> Option<&[Point]> {
        match self.values.get(READ_REGION) {
            Some(MetadataValue::Points(points)) => Some(points.as_slice()),
            _ => None,
        }
    }
}
