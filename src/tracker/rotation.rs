//! Quarter-turn rotation of read regions into display orientation.
//!
//! Readers report corners in the captured image's frame. Before handing a
//! read to the cache the caller rotates those corners into the orientation
//! the overlay is drawn in.

use serde::{Deserialize, Serialize};

use crate::tracker::error::DetectionError;
use crate::tracker::region::Point;

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Convert a degree value to a rotation. Values are normalised into `0..360`.
    pub fn from_degrees(degrees: i32) -> Result<Self, DetectionError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(DetectionError::UnsupportedRotation(degrees)),
        }
    }

    /// Rotation needed to show a captured image on a device.
    ///
    /// `camera_degrees` rotates a captured image to the device's natural
    /// orientation; `device_degrees` is the device's current orientation.
    pub fn for_display(camera_degrees: i32, device_degrees: i32) -> Result<Self, DetectionError> {
        let degrees = (i64::from(camera_degrees) - i64::from(device_degrees)).rem_euclid(360);
        // rem_euclid(360) always fits in i32
        Self::from_degrees(degrees as i32)
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the rotated frame swaps width and height.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Rotation plus the dimensions of the source image it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameOrientation {
    pub rotation: Rotation,
    pub width: u32,
    pub height: u32,
}

impl FrameOrientation {
    pub fn new(rotation: Rotation, width: u32, height: u32) -> Self {
        Self {
            rotation,
            width,
            height,
        }
    }

    /// No rotation; the frame size is irrelevant.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Size of the frame after rotation, as `(width, height)`.
    pub fn display_size(&self) -> (u32, u32) {
        if self.rotation.is_transposed() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Rotate one point. Coordinates saturate at the `i32` pixel range.
    pub fn apply(&self, point: &Point) -> Point {
        let w = i32::try_from(self.width).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height).unwrap_or(i32::MAX);
        match self.rotation {
            Rotation::Deg0 => *point,
            Rotation::Deg90 => Point::new(h.saturating_sub(point.y), point.x),
            Rotation::Deg180 => Point::new(w.saturating_sub(point.x), h.saturating_sub(point.y)),
            Rotation::Deg270 => Point::new(point.y, w.saturating_sub(point.x)),
        }
    }

    /// Rotate every point. Winding order is preserved.
    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply(p)).collect()
    }
}
