//! Shared 2D camera resource.
//!
//! Tracks the world point at the center of the view. The camera eases toward
//! its goal with [`lerp`](crate::math::lerp) and is kept inside the level so
//! the view never shows space past the outer walls.

use bevy_ecs::prelude::Resource;

use crate::math::{Rect, Vector2, lerp, snap};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera2DRes {
    /// World point at the center of the view.
    pub target: Vector2,
    /// Fraction of the remaining distance closed per second.
    pub smoothing: f32,
}

impl Camera2DRes {
    pub fn new(target: Vector2, smoothing: f32) -> Self {
        Self { target, smoothing }
    }

    /// Ease toward `goal` over `dt` seconds, then clamp so a `view_w` x
    /// `view_h` view stays within `bounds`.
    pub fn follow(
        &mut self,
        goal: Vector2,
        dt: f32,
        view_w: f32,
        view_h: f32,
        bounds: Option<Rect>,
    ) {
        let t = (self.smoothing * dt).clamp(0.0, 1.0);
        self.target = lerp(self.target, goal, t);
        if let Some(b) = bounds {
            self.target.x = clamp_axis(self.target.x, b.left(), b.right(), view_w);
            self.target.y = clamp_axis(self.target.y, b.top(), b.bottom(), view_h);
        }
    }

    /// Whole-pixel top-left corner of a `view_w` x `view_h` view.
    pub fn view_origin(&self, view_w: f32, view_h: f32) -> Vector2 {
        Vector2::new(
            snap(self.target.x - view_w * 0.5),
            snap(self.target.y - view_h * 0.5),
        )
    }
}

fn clamp_axis(center: f32, min: f32, max: f32, extent: f32) -> f32 {
    let half = extent * 0.5;
    if max - min <= extent {
        // Level narrower than the view
        (min + max) * 0.5
    } else {
        center.clamp(min + half, max - half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 480.0, 180.0);

    #[test]
    fn test_follow_eases_toward_goal() {
        let mut cam = Camera2DRes::new(Vector2::new(200.0, 90.0), 5.0);
        cam.follow(Vector2::new(240.0, 90.0), 0.1, 320.0, 180.0, None);
        assert!((cam.target.x - 220.0).abs() < 1e-4);
        assert_eq!(cam.target.y, 90.0);
    }

    #[test]
    fn test_follow_never_overshoots_on_long_frames() {
        let mut cam = Camera2DRes::new(Vector2::new(200.0, 90.0), 5.0);
        cam.follow(Vector2::new(240.0, 90.0), 1.0, 320.0, 180.0, None);
        assert_eq!(cam.target, Vector2::new(240.0, 90.0));
    }

    #[test]
    fn test_follow_clamps_to_level() {
        let mut cam = Camera2DRes::new(Vector2::new(160.0, 90.0), 100.0);
        cam.follow(Vector2::new(10.0, 10.0), 1.0, 320.0, 180.0, Some(BOUNDS));
        // Left edge pinned to the level, level exactly as tall as the view
        assert_eq!(cam.target, Vector2::new(160.0, 90.0));

        cam.follow(Vector2::new(470.0, 90.0), 1.0, 320.0, 180.0, Some(BOUNDS));
        assert_eq!(cam.target.x, 320.0);
    }

    #[test]
    fn test_view_origin_snaps_to_pixels() {
        let cam = Camera2DRes::new(Vector2::new(200.4, 90.0), 1.0);
        assert_eq!(cam.view_origin(320.0, 180.0), Vector2::new(40.0, 0.0));
    }
}
