//! Per-frame directional input resource.
//!
//! Captures the four directions the player controller cares about. Each
//! direction is active when either its primary (WASD) or secondary (arrow)
//! binding is held; the polling system lives in
//! [`systems::input`](crate::systems) and only exists with the `render`
//! feature. The core reads the snapshot through [`InputState::intent`].
use bevy_ecs::prelude::*;

use crate::math::Vector2;

/// Boolean key state for one direction.
///
/// Only the level is kept; the jump edge is detected by the player's own
/// latch so replays that feed raw intents behave the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the direction is held this frame.
    pub active: bool,
}

impl BoolState {
    pub fn set(&mut self, active: bool) {
        self.active = active;
    }
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub down: BoolState,
}

impl InputState {
    /// Movement intent with components in `{-1, 0, 1}` (y grows downwards).
    ///
    /// Right wins over left and down over up when both are held.
    pub fn intent(&self) -> Vector2 {
        let mut intent = Vector2::zero();
        if self.left.active {
            intent.x = -1.0;
        }
        if self.right.active {
            intent.x = 1.0;
        }
        if self.up.active {
            intent.y = -1.0;
        }
        if self.down.active {
            intent.y = 1.0;
        }
        intent
    }
}
