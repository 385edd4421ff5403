//! Player simulation system.
//!
//! Runs one [`Player::update`] per entity per frame with the shared input
//! snapshot, the level's static rectangles and both clocks from
//! [`WorldTime`].
use bevy_ecs::prelude::*;
use log::error;

use crate::components::player::Player;
use crate::resources::input::InputState;
use crate::resources::level::LevelGeometry;
use crate::resources::worldtime::WorldTime;

pub fn player_system(
    mut query: Query<(Entity, &mut Player)>,
    input: Res<InputState>,
    level: Res<LevelGeometry>,
    time: Res<WorldTime>,
) {
    let intent = input.intent();
    let clocks = time.clocks();
    for (entity, mut player) in query.iter_mut() {
        if let Err(e) = player.update(intent, clocks, &level.colliders) {
            error!("{:?}: player update failed: {}", entity, e);
        }
    }
}
