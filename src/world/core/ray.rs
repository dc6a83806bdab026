use super::VoxelPos;
use crate::world::error::WorldError;
use cgmath::{InnerSpace, Point3, Vector3};

/// Targeting ray. The direction is always unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero or non-finite direction
    /// is rejected here so that the march never has to check it.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Result<Self, WorldError> {
        let length = direction.magnitude();
        if !length.is_finite() || length <= f32::EPSILON {
            return Err(WorldError::InvalidDirection { length });
        }

        Ok(Self {
            origin,
            direction: direction / length,
        })
    }

    /// Point at `distance` along the ray
    pub fn at(&self, distance: f32) -> Point3<f32> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFace {
    Right,  // +X
    Left,   // -X
    Top,    // +Y
    Bottom, // -Y
    Front,  // +Z
    Back,   // -Z
}

impl BlockFace {
    /// Step from a voxel to its neighbour across this face
    pub fn offset(&self) -> Vector3<i32> {
        match self {
            BlockFace::Right => Vector3::new(1, 0, 0),
            BlockFace::Left => Vector3::new(-1, 0, 0),
            BlockFace::Top => Vector3::new(0, 1, 0),
            BlockFace::Bottom => Vector3::new(0, -1, 0),
            BlockFace::Front => Vector3::new(0, 0, 1),
            BlockFace::Back => Vector3::new(0, 0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// First solid voxel along the ray
    pub position: VoxelPos,
    pub face: BlockFace,
    /// Distance along the ray of the sample that hit
    pub distance: f32,
    /// Last empty voxel sampled before the hit, if the ray started outside
    /// solid geometry
    pub previous: Option<VoxelPos>,
}

impl RaycastHit {
    /// Empty cell a new voxel should go into: the last cell the ray passed
    /// through, or the neighbour across the hit face when the ray started
    /// inside the hit voxel
    pub fn placement_cell(&self) -> VoxelPos {
        self.previous
            .unwrap_or_else(|| self.position.offset(self.face.offset()))
    }
}

/// Face of `voxel_pos` nearest to `hit_point`. Voxels are centered on their
/// integer coordinate, so the dominant axis of the offset from the center
/// picks the face.
pub(crate) fn determine_hit_face(hit_point: Point3<f32>, voxel_pos: VoxelPos) -> BlockFace {
    let local = hit_point - voxel_pos.center();
    let (ax, ay, az) = (local.x.abs(), local.y.abs(), local.z.abs());

    if ax >= ay && ax >= az {
        if local.x >= 0.0 {
            BlockFace::Right
        } else {
            BlockFace::Left
        }
    } else if ay >= az {
        if local.y >= 0.0 {
            BlockFace::Top
        } else {
            BlockFace::Bottom
        }
    } else if local.z >= 0.0 {
        BlockFace::Front
    } else {
        BlockFace::Back
    }
}
