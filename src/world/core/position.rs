//! Voxel and chunk coordinates
//!
//! Both are exact integer triples so they can be used as hash keys.
//! Chunk keys are derived with floor division, which keeps every chunk
//! exactly `chunk_size` voxels wide on the negative side of each axis too.

use cgmath::{Point3, Vector3};
use std::fmt;

/// World-space integer coordinate of a voxel. The voxel occupies the unit
/// cube centered on this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Chunk coordinate: `floor(voxel / chunk_size)` per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk that owns this voxel. `chunk_size` must be in
    /// `1..=MAX_CHUNK_SIZE` (see `check_chunk_size`).
    pub fn to_chunk_pos(self, chunk_size: u32) -> ChunkPos {
        let size = chunk_size as i32;
        ChunkPos {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
            z: self.z.div_euclid(size),
        }
    }

    /// Nearest voxel to a world-space point (ties round away from zero)
    pub fn from_point_rounded(point: Point3<f32>) -> Self {
        Self {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
            z: point.z.round() as i32,
        }
    }

    pub fn center(self) -> Point3<f32> {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    pub fn offset(self, delta: Vector3<i32>) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            z: self.z + delta.z,
        }
    }
}

impl ChunkPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Lowest-coordinate voxel inside this chunk
    pub fn min_voxel(self, chunk_size: u32) -> VoxelPos {
        let size = chunk_size as i32;
        VoxelPos {
            x: self.x * size,
            y: self.y * size,
            z: self.z * size,
        }
    }

    /// Highest-coordinate voxel inside this chunk
    ///
    /// Clamped to `i32::MAX` for the partial chunk at the top of the range.
    pub fn max_voxel(self, chunk_size: u32) -> VoxelPos {
        let last = chunk_size as i32 - 1;
        let min = self.min_voxel(chunk_size);
        VoxelPos {
            x: min.x.saturating_add(last),
            y: min.y.saturating_add(last),
            z: min.z.saturating_add(last),
        }
    }

    pub fn contains(self, voxel: VoxelPos, chunk_size: u32) -> bool {
        voxel.to_chunk_pos(chunk_size) == self
    }
}

impl From<(i32, i32, i32)> for VoxelPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for VoxelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_pos_uses_floor_division() {
        assert_eq!(VoxelPos::new(0, 15, 16).to_chunk_pos(16), ChunkPos::new(0, 0, 1));
        assert_eq!(VoxelPos::new(-1, -16, -17).to_chunk_pos(16), ChunkPos::new(-1, -1, -2));
    }

    #[test]
    fn test_chunk_bounds_contain_their_voxels() {
        let chunk = ChunkPos::new(-1, 0, 2);
        assert_eq!(chunk.min_voxel(16), VoxelPos::new(-16, 0, 32));
        assert_eq!(chunk.max_voxel(16), VoxelPos::new(-1, 15, 47));
        assert!(chunk.contains(VoxelPos::new(-1, 15, 47), 16));
        assert!(!chunk.contains(VoxelPos::new(0, 15, 47), 16));
    }

    #[test]
    fn test_top_chunk_bounds_do_not_overflow() {
        let top = VoxelPos::new(i32::MAX, i32::MAX, 0).to_chunk_pos(16);
        assert_eq!(top.max_voxel(16), VoxelPos::new(i32::MAX, i32::MAX, 15));

        // 10 does not divide 2^31, so the last chunk is cut short
        let partial = VoxelPos::new(i32::MAX, 0, 0).to_chunk_pos(10);
        assert_eq!(partial.max_voxel(10).x, i32::MAX);
        assert!(partial.contains(VoxelPos::new(i32::MAX, 0, 0), 10));
    }

    #[test]
    fn test_rounding_to_nearest_voxel() {
        let pos = VoxelPos::from_point_rounded(Point3::new(4.5, -0.4, -2.6));
        assert_eq!(pos, VoxelPos::new(5, 0, -3));
    }
}
