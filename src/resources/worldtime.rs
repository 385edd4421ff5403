//! Simulation and wall-clock time.
//!
//! Two clocks are tracked side by side and never merged:
//!
//! - the physics clock (`delta`, `elapsed`), scaled by `time_scale` and
//!   advanced by whatever frame time the outer loop measured;
//! - the wall clock (`wall_clock`), unscaled seconds since startup, which
//!   gates animator ticks.
//!
//! [`WorldTime::clocks`] hands both to the per-entity update.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub wall_clock: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            wall_clock: 0.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn clocks(&self) -> FrameClocks {
        FrameClocks {
            physics_dt: self.delta,
            anim_now: self.wall_clock,
        }
    }
}

/// Both clocks as seen by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClocks {
    /// Seconds of simulated time to integrate this tick.
    pub physics_dt: f32,
    /// Wall-clock seconds used by animator cooldowns.
    pub anim_now: f32,
}
