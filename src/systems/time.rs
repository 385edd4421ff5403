//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the physics delta only.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance both clocks on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds; `wall_clock` is the
/// unscaled time since startup. Slowing the simulation down with
/// `time_scale` does not slow the animation clock.
pub fn update_world_time(world: &mut World, dt: f32, wall_clock: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.wall_clock = wall_clock;
    wt.frame_count += 1;
}
