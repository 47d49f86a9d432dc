//! # Coordinates
//!
//! Map files put their origin at the top-right corner: X grows to the left and Z grows
//! downward. The engine's voxel space mirrors both axes:
//!
//! ```text
//! +++++++ <- arena origin (0, 0), voxel corner (width, depth)
//! +++++++
//! +++++++
//! ^
//! arena corner (width, depth), voxel origin (0, 0)
//! ```
//!
//! There is one transform, `arena_to_voxel`, a reflection of continuous positions about
//! the map extent. Cells go through it by their centre, so arena cell `x` lands in voxel
//! cell `width - 1 - x`, the same cell the decoder's tile traversal writes it to.

use cgmath::Point2;

use crate::assets::container::ARENA_UNITS;
use crate::assets::level::MapDimensions;

/// Reflects a position in voxel units from arena axes into engine axes.
pub fn arena_to_voxel(point: Point2<f64>, width: f64, depth: f64) -> Point2<f64> {
    Point2::new(width - point.x, depth - point.y)
}

/// Applies `arena_to_voxel` for one map's dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    width: f64,
    depth: f64,
}

impl CoordinateMapper {
    /// Creates a mapper for a map of the given dimensions.
    pub fn new(dimensions: MapDimensions) -> Self {
        CoordinateMapper {
            width: dimensions.width as f64,
            depth: dimensions.depth as f64,
        }
    }

    /// Maps an arena cell, as stored in trigger records, to a voxel cell.
    pub fn voxel(&self, x: u8, z: u8) -> Point2<i32> {
        let centre = Point2::new(f64::from(x) + 0.5, f64::from(z) + 0.5);
        let mapped = arena_to_voxel(centre, self.width, self.depth);
        Point2::new(mapped.x.floor() as i32, mapped.y.floor() as i32)
    }

    /// Maps a position in arena units, as stored in the header's start points.
    pub fn point(&self, raw: Point2<u16>) -> Point2<f64> {
        let point = Point2::new(f64::from(raw.x) / ARENA_UNITS, f64::from(raw.y) / ARENA_UNITS);
        arena_to_voxel(point, self.width, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(width: usize, depth: usize) -> CoordinateMapper {
        CoordinateMapper::new(MapDimensions::new(width, depth))
    }

    #[test]
    fn arena_origin_cell_is_far_voxel_cell() {
        assert_eq!(mapper(8, 6).voxel(0, 0), Point2::new(7, 5));
        assert_eq!(mapper(8, 6).voxel(7, 5), Point2::new(0, 0));
    }

    #[test]
    fn trigger_cell_regression() {
        assert_eq!(mapper(8, 8).voxel(5, 3), Point2::new(2, 4));
        assert_eq!(mapper(64, 64).voxel(5, 3), Point2::new(58, 60));
    }

    #[test]
    fn start_point_regression() {
        // 192 arena units is the middle of cell 1; 640 is the west edge of cell 5.
        let start = mapper(8, 8).point(Point2::new(192, 640));
        assert_eq!(start, Point2::new(6.5, 3.0));
    }

    #[test]
    fn point_stays_in_the_cell_its_voxel_maps_to() {
        let m = mapper(8, 8);
        let start = m.point(Point2::new(192, 448));
        let cell = m.voxel(1, 3);
        assert_eq!(
            Point2::new(start.x.floor() as i32, start.y.floor() as i32),
            cell
        );
    }

    #[test]
    fn transform_is_repeatable_and_self_inverse() {
        let m = mapper(10, 4);
        assert_eq!(m.voxel(3, 1), m.voxel(3, 1));
        let p = Point2::new(2.25, 1.75);
        assert_eq!(arena_to_voxel(arena_to_voxel(p, 10.0, 4.0), 10.0, 4.0), p);
    }
}
