//! Per-frame input intent
//!
//! Window and device handling live outside the crate; the embedding
//! application fills these structs from whatever it captured this frame.

use cgmath::Vector3;

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Ascend (free-fly only)
    pub up: bool,
    /// Descend (free-fly only)
    pub down: bool,
    pub jump: bool,
    /// Pressed this frame to switch free-fly on or off
    pub toggle_fly: bool,
}

/// Everything the simulation reads from the outside world in one frame
#[derive(Debug, Clone, Copy)]
pub struct InputState {
    pub movement: MovementInput,
    /// Unit view direction from the camera
    pub view_direction: Vector3<f32>,
    /// Break the targeted voxel this frame
    pub break_block: bool,
    /// Place a voxel against the targeted face this frame
    pub place_block: bool,
}

impl InputState {
    /// No keys held, looking along -Z
    pub fn idle() -> Self {
        Self {
            movement: MovementInput::default(),
            view_direction: Vector3::new(0.0, 0.0, -1.0),
            break_block: false,
            place_block: false,
        }
    }

    pub fn looking(view_direction: Vector3<f32>) -> Self {
        Self {
            view_direction,
            ..Self::idle()
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::idle()
    }
}
