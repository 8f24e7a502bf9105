//! Integration module for connecting barcode/watermark readers with the cache.
//!
//! This module provides traits and utilities for feeding reader output into
//! a [`TrackingCache`](crate::tracker::TrackingCache) one frame at a time.

mod builder;
mod detector;
mod pipeline;

pub use builder::ReadBuilder;
pub use detector::{IntoReads, Read, ReadSource};
pub use pipeline::CachePipeline;
