//! Camera follow system.
use bevy_ecs::prelude::*;

use crate::components::player::Player;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::level::LevelGeometry;
use crate::resources::worldtime::WorldTime;

/// Ease the camera toward the first player's collision box.
pub fn camera_follow_system(
    query: Query<&Player>,
    mut camera: ResMut<Camera2DRes>,
    level: Res<LevelGeometry>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
) {
    let Some(player) = query.iter().next() else {
        return;
    };
    camera.follow(
        player.collider.rect.center(),
        time.delta,
        config.render_width as f32,
        config.render_height as f32,
        level.bounds(),
    );
}
