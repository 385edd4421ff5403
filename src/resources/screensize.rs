//! Screen size resource.
//!
//! Stores the current window dimensions in pixels, which differ from the
//! fixed internal render resolution. Used to fit the render target into the
//! window with letterbox or pillarbox bars.

use bevy_ecs::prelude::Resource;

use crate::math::Rect;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}

impl ScreenSize {
    /// Destination rectangle for a `game_width` x `game_height` image scaled
    /// to fit this screen, centered, aspect ratio preserved.
    pub fn letterbox(&self, game_width: u32, game_height: u32) -> Rect {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        if window_w / window_h > game_w / game_h {
            // Wider than the game: bars on the sides
            let scaled_w = game_w * (window_h / game_h);
            Rect::new((window_w - scaled_w) / 2.0, 0.0, scaled_w, window_h)
        } else {
            // Taller than the game: bars top and bottom
            let scaled_h = game_h * (window_w / game_w);
            Rect::new(0.0, (window_h - scaled_h) / 2.0, window_w, scaled_h)
        }
    }
}
