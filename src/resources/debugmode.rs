//! Debug toggle resource.
//!
//! When present, the render pass outlines level colliders and the player's
//! collision box and prints a status line.

use bevy_ecs::prelude::Resource;

/// Marker resource toggled with F11 or the `--debug` flag.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
