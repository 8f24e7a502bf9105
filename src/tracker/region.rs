//! Quadrilateral read regions with containment and tolerant expansion.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::tracker::error::RegionError;

/// Integer pixel coordinate in image space (y grows downwards).
pub type Point = Point2<i32>;

/// Aspect-ratio bands used by [`Region::expanded_with`].
///
/// The aspect ratio is `height / width`, where width is the edge between
/// corners 0 and 1 and height is the edge between corners 1 and 2. Flat codes
/// (e.g. shelf-edge barcodes) get the largest expansion since their boxes say
/// the least about where the code really is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionProfile {
    /// Aspect ratios below this use `small_factor`.
    pub small_threshold: f64,
    /// Aspect ratios below this (and above `small_threshold`) use `medium_factor`.
    pub large_threshold: f64,
    pub small_factor: f64,
    pub medium_factor: f64,
    pub large_factor: f64,
}

impl Default for ExpansionProfile {
    fn default() -> Self {
        Self {
            small_threshold: 0.2,
            large_threshold: 0.4,
            small_factor: 2.5,
            medium_factor: 0.8,
            large_factor: 0.35,
        }
    }
}

impl ExpansionProfile {
    /// Pick the expansion factor for a given `height / width` ratio.
    ///
    /// NaN and infinite ratios (zero-width regions) fall through to the
    /// normal band.
    pub fn factor_for(&self, aspect: f64) -> f64 {
        if aspect < self.small_threshold {
            self.small_factor
        } else if aspect < self.large_threshold {
            self.medium_factor
        } else {
            self.large_factor
        }
    }
}

/// Four-corner read region, corners in clockwise winding order.
///
/// The center is the integer mean of the corners, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    corners: [Point; 4],
    center: Point,
}

impl Region {
    /// Create a region from four clockwise corners.
    pub fn new(corners: [Point; 4]) -> Self {
        let (sx, sy) = corners.iter().fold((0i64, 0i64), |(sx, sy), p| {
            (sx + p.x as i64, sy + p.y as i64)
        });
        let center = Point::new((sx / 4) as i32, (sy / 4) as i32);
        Self { corners, center }
    }

    /// Create a region from a slice holding exactly four corners.
    pub fn from_points(points: &[Point]) -> Result<Self, RegionError> {
        let corners: [Point; 4] = points
            .try_into()
            .map_err(|_| RegionError::CornerCount(points.len()))?;
        Ok(Self::new(corners))
    }

    /// Create a region from an axis-aligned TLBR box, corners clockwise from top-left.
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new([
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Point; 4] {
        &self.corners
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Length of the edge between corners 0 and 1, truncated to whole pixels.
    #[inline]
    pub fn width(&self) -> i64 {
        edge_length(&self.corners[0], &self.corners[1])
    }

    /// Length of the edge between corners 1 and 2, truncated to whole pixels.
    #[inline]
    pub fn height(&self) -> i64 {
        edge_length(&self.corners[1], &self.corners[2])
    }

    /// Shoelace area of the quadrilateral.
    pub fn area(&self) -> f64 {
        let twice: i64 = (0..4)
            .map(|i| {
                let a = &self.corners[i];
                let b = &self.corners[(i + 1) % 4];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice.abs() as f64 / 2.0
    }

    /// Axis-aligned bounding box as `[x1, y1, x2, y2]`.
    pub fn bounding_box(&self) -> [i32; 4] {
        let mut bbox = [i32::MAX, i32::MAX, i32::MIN, i32::MIN];
        for p in &self.corners {
            bbox[0] = bbox[0].min(p.x);
            bbox[1] = bbox[1].min(p.y);
            bbox[2] = bbox[2].max(p.x);
            bbox[3] = bbox[3].max(p.y);
        }
        bbox
    }

    /// Whether `point` lies inside this region (edges count as inside).
    ///
    /// Walks the edges clockwise; a point to the left of any edge is outside.
    /// Only meaningful for convex, clockwise-wound regions.
    pub fn contains(&self, point: &Point) -> bool {
        (0..4).all(|i| {
            let p1 = &self.corners[i];
            let p2 = &self.corners[(i + 1) % 4];
            side_of_edge(p1, p2, point) >= 0
        })
    }

    /// Expanded region using the default [`ExpansionProfile`].
    pub fn expanded(&self) -> Result<Region, RegionError> {
        self.expanded_with(&ExpansionProfile::default())
    }

    /// Stretch the region along its height axis for tolerant overlap tests.
    ///
    /// Corners 0 and 1 move back along the height edge direction and corners
    /// 2 and 3 move forward, each by `factor * height` pixels. Fails if a
    /// moved corner leaves the `i32` pixel range.
    pub fn expanded_with(&self, profile: &ExpansionProfile) -> Result<Region, RegionError> {
        let [p0, p1, p2, p3] = self.corners;
        let width = self.width() as f64;
        let height = self.height() as f64;

        let angle = (p2.y as f64 - p1.y as f64).atan2(p2.x as f64 - p1.x as f64);
        let offset = profile.factor_for(height / width) * height;
        let shift = Vector2::new(
            (offset * angle.cos()).round() as i64,
            (offset * angle.sin()).round() as i64,
        );

        let mut corners = [Point::origin(); 4];
        for (index, (corner, sign)) in [(p0, -1), (p1, -1), (p2, 1), (p3, 1)]
            .into_iter()
            .enumerate()
        {
            let x = i32::try_from(corner.x as i64 + sign * shift.x);
            let y = i32::try_from(corner.y as i64 + sign * shift.y);
            corners[index] = match (x, y) {
                (Ok(x), Ok(y)) => Point::new(x, y),
                _ => return Err(RegionError::OutOfRange { index }),
            };
        }
        Ok(Region::new(corners))
    }
}

/// Signed cross product telling which side of `p1 -> p2` the point lies on.
#[inline]
fn side_of_edge(p1: &Point, p2: &Point, test: &Point) -> i64 {
    (p2.x as i64 - p1.x as i64) * (test.y as i64 - p1.y as i64)
        - (test.x as i64 - p1.x as i64) * (p2.y as i64 - p1.y as i64)
}

#[inline]
fn edge_length(a: &Point, b: &Point) -> i64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx.hypot(dy) as i64
}

/// Check whether either region's center falls inside the other.
pub fn centers_overlap(a: &Region, b: &Region) -> bool {
    a.contains(&b.center()) || b.contains(&a.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32, size: i32) -> Region {
        Region::from_tlbr(x, y, x + size, y + size)
    }

    #[test]
    fn test_center_is_truncated_mean() {
        let region = Region::new([
            Point::new(0, 0),
            Point::new(3, 0),
            Point::new(3, 3),
            Point::new(0, 3),
        ]);
        // (0 + 3 + 3 + 0) / 4 = 1.5 -> 1
        assert_eq!(region.center(), Point::new(1, 1));

        let negative = Region::from_tlbr(-3, -3, 0, 0);
        assert_eq!(negative.center(), Point::new(-1, -1));
    }

    #[test]
    fn test_from_points_requires_four_corners() {
        let pts = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert_eq!(
            Region::from_points(&pts),
            Err(RegionError::CornerCount(3))
        );

        let pts = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(Region::from_points(&pts).unwrap(), Region::from_tlbr(0, 0, 10, 10));
    }

    #[test]
    fn test_contains() {
        let region = square(0, 0, 10);
        assert!(region.contains(&Point::new(5, 5)));
        assert!(region.contains(&Point::new(0, 0)));
        assert!(region.contains(&Point::new(10, 5)));
        assert!(!region.contains(&Point::new(11, 5)));
        assert!(!region.contains(&Point::new(5, -1)));
    }

    #[test]
    fn test_contains_rotated_diamond() {
        // Clockwise in image space: top, right, bottom, left.
        let diamond = Region::new([
            Point::new(10, 0),
            Point::new(20, 10),
            Point::new(10, 20),
            Point::new(0, 10),
        ]);
        assert!(diamond.contains(&diamond.center()));
        assert!(!diamond.contains(&Point::new(1, 1)));
        assert!(!diamond.contains(&Point::new(19, 19)));
    }

    #[test]
    fn test_counter_clockwise_region_contains_nothing_inside() {
        let ccw = Region::new([
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        ]);
        assert!(!ccw.contains(&Point::new(5, 5)));
    }

    #[test]
    fn test_profile_bands() {
        let profile = ExpansionProfile::default();
        assert_eq!(profile.factor_for(0.1), 2.5);
        assert_eq!(profile.factor_for(0.3), 0.8);
        assert_eq!(profile.factor_for(1.0), 0.35);
        assert_eq!(profile.factor_for(f64::INFINITY), 0.35);
        assert_eq!(profile.factor_for(f64::NAN), 0.35);
    }

    #[test]
    fn test_expanded_square() {
        // width = height = 100, aspect 1.0 -> factor 0.35 -> 35px each way.
        let expanded = square(0, 0, 100).expanded().unwrap();
        assert_eq!(
            expanded.points(),
            &[
                Point::new(0, -35),
                Point::new(100, -35),
                Point::new(100, 135),
                Point::new(0, 135),
            ]
        );
        assert_eq!(expanded.center(), Point::new(50, 50));
    }

    #[test]
    fn test_expanded_flat_code() {
        // width 100, height 10, aspect 0.1 -> factor 2.5 -> 25px each way.
        let flat = Region::from_tlbr(0, 0, 100, 10);
        let expanded = flat.expanded().unwrap();
        assert_eq!(expanded.bounding_box(), [0, -25, 100, 35]);
    }

    #[test]
    fn test_expanded_medium_code() {
        // width 100, height 30, aspect 0.3 -> factor 0.8 -> 24px each way.
        let medium = Region::from_tlbr(0, 0, 100, 30);
        assert_eq!(medium.expanded().unwrap().bounding_box(), [0, -24, 100, 54]);
    }

    #[test]
    fn test_expanded_follows_height_axis() {
        // Rotated a quarter turn: the height edge runs right-to-left.
        let rotated = Region::new([
            Point::new(10, 0),
            Point::new(10, 100),
            Point::new(0, 100),
            Point::new(0, 0),
        ]);
        // width 100, height 10 -> factor 2.5 -> 25px along -x / +x.
        assert_eq!(rotated.expanded().unwrap().bounding_box(), [-25, 0, 35, 100]);
    }

    #[test]
    fn test_area_and_bbox() {
        let region = Region::from_tlbr(10, 20, 40, 60);
        assert!((region.area() - 1200.0).abs() < 1e-9);
        assert_eq!(region.bounding_box(), [10, 20, 40, 60]);
        assert_eq!(region.width(), 30);
        assert_eq!(region.height(), 40);
    }

    #[test]
    fn test_expanded_out_of_pixel_range() {
        // Height 2e9 with factor 0.35 pushes the bottom corners past i32::MAX.
        let tall = Region::from_tlbr(0, 0, 100, 2_000_000_000);
        assert_eq!(tall.expanded(), Err(RegionError::OutOfRange { index: 2 }));

        // 50px high, shifted 18px: the top corners drop below i32::MIN.
        let near_edge = Region::from_tlbr(0, i32::MIN + 5, 100, i32::MIN + 55);
        assert_eq!(near_edge.expanded(), Err(RegionError::OutOfRange { index: 0 }));
    }

    #[test]
    fn test_centers_overlap() {
        let a = square(0, 0, 10);
        let b = square(4, 4, 10);
        let far = square(50, 50, 10);
        assert!(centers_overlap(&a, &b));
        assert!(!centers_overlap(&a, &far));
    }
}
