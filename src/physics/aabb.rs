//! Axis-Aligned Bounding Box System
//!
//! Pure functions for box tests. All intersection tests use closed
//! intervals: boxes whose faces touch with zero gap DO intersect.

use crate::constants::core::VOXEL_HALF_EXTENT;
use crate::world::core::VoxelPos;
use cgmath::{Point3, Vector3};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Point3<f32>, max: Point3<f32>) -> AABB {
    AABB { min, max }
}

/// Create AABB from center point and half extents
pub fn aabb_from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> AABB {
    AABB {
        min: center - half_extents,
        max: center + half_extents,
    }
}

/// Bounds of the unit cube centered on a voxel coordinate
pub fn voxel_aabb(pos: VoxelPos) -> AABB {
    let half = Vector3::new(VOXEL_HALF_EXTENT, VOXEL_HALF_EXTENT, VOXEL_HALF_EXTENT);
    aabb_from_center_half_extents(pos.center(), half)
}

/// Get center point of AABB
pub fn aabb_center(aabb: &AABB) -> Point3<f32> {
    Point3::new(
        (aabb.min.x + aabb.max.x) * 0.5,
        (aabb.min.y + aabb.max.y) * 0.5,
        (aabb.min.z + aabb.max.z) * 0.5,
    )
}

/// Get half extents of AABB
pub fn aabb_half_extents(aabb: &AABB) -> Vector3<f32> {
    (aabb.max - aabb.min) * 0.5
}

/// Test if two AABBs intersect (closed intervals)
pub fn aabb_intersects(aabb1: &AABB, aabb2: &AABB) -> bool {
    aabb1.min.x <= aabb2.max.x && aabb1.max.x >= aabb2.min.x &&
    aabb1.min.y <= aabb2.max.y && aabb1.max.y >= aabb2.min.y &&
    aabb1.min.z <= aabb2.max.z && aabb1.max.z >= aabb2.min.z
}

/// Test if AABB contains a point
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x && point.x <= aabb.max.x &&
    point.y >= aabb.min.y && point.y <= aabb.max.y &&
    point.z >= aabb.min.z && point.z <= aabb.max.z
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f32>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// All corner coordinates are finite and min <= max on every axis
pub fn aabb_is_valid(aabb: &AABB) -> bool {
    let finite = [aabb.min.x, aabb.min.y, aabb.min.z, aabb.max.x, aabb.max.y, aabb.max.z]
        .iter()
        .all(|v| v.is_finite());
    finite && aabb.min.x <= aabb.max.x && aabb.min.y <= aabb.max.y && aabb.min.z <= aabb.max.z
}

/// Inclusive range of voxel coordinates whose unit cubes can touch `aabb`
///
/// Voxel `v` spans `[v - 0.5, v + 0.5]`, so under closed intervals it meets
/// the box exactly when `ceil(min - 0.5) <= v <= floor(max + 0.5)`.
pub fn aabb_voxel_range(aabb: &AABB) -> (VoxelPos, VoxelPos) {
    let lo = |v: f32| (v - VOXEL_HALF_EXTENT).ceil() as i32;
    let hi = |v: f32| (v + VOXEL_HALF_EXTENT).floor() as i32;
    (
        VoxelPos::new(lo(aabb.min.x), lo(aabb.min.y), lo(aabb.min.z)),
        VoxelPos::new(hi(aabb.max.x), hi(aabb.max.y), hi(aabb.max.z)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes_intersect() {
        let a = create_aabb(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = aabb_translated(&a, Vector3::new(1.0, 0.0, 0.0));
        assert!(aabb_intersects(&a, &b));

        let c = aabb_translated(&a, Vector3::new(1.001, 0.0, 0.0));
        assert!(!aabb_intersects(&a, &c));
    }

    #[test]
    fn test_voxel_aabb_is_centered() {
        let aabb = voxel_aabb(VoxelPos::new(2, -1, 0));
        assert_eq!(aabb.min, Point3::new(1.5, -1.5, -0.5));
        assert_eq!(aabb.max, Point3::new(2.5, -0.5, 0.5));
        assert_eq!(aabb_center(&aabb), Point3::new(2.0, -1.0, 0.0));
        assert_eq!(aabb_half_extents(&aabb), Vector3::new(0.5, 0.5, 0.5));
        assert!(aabb_contains_point(&aabb, Point3::new(2.5, -1.0, 0.0)));
    }

    #[test]
    fn test_voxel_range_includes_touching_cells() {
        // Box face at x = 0.5 touches voxel 1 (which starts at 0.5)
        let aabb = create_aabb(Point3::new(-0.2, 0.0, 0.0), Point3::new(0.5, 0.0, 0.0));
        let (min, max) = aabb_voxel_range(&aabb);
        assert_eq!(min.x, 0);
        assert_eq!(max.x, 1);
    }

    #[test]
    fn test_invalid_boxes() {
        let inverted = create_aabb(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        assert!(!aabb_is_valid(&inverted));
        let nan = create_aabb(Point3::new(f32::NAN, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(!aabb_is_valid(&nan));
    }
}
