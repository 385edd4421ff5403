//! Input system.
//!
//! [`update_input_state`] polls raylib each frame and stores the result in
//! [`InputState`]. Each direction has a WASD and an arrow binding; up also
//! answers to Space. F11 toggles [`DebugMode`].
use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi::KeyboardKey;

use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;

const LEFT: [KeyboardKey; 2] = [KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT];
const RIGHT: [KeyboardKey; 2] = [KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT];
const UP: [KeyboardKey; 3] = [
    KeyboardKey::KEY_W,
    KeyboardKey::KEY_UP,
    KeyboardKey::KEY_SPACE,
];
const DOWN: [KeyboardKey; 2] = [KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN];

pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    debug_mode: Option<Res<DebugMode>>,
    mut commands: Commands,
) {
    let any_down = |keys: &[KeyboardKey]| keys.iter().any(|&key| rl.is_key_down(key));

    input.left.set(any_down(&LEFT));
    input.right.set(any_down(&RIGHT));
    input.up.set(any_down(&UP));
    input.down.set(any_down(&DOWN));

    if rl.is_key_pressed(KeyboardKey::KEY_F11) {
        if debug_mode.is_some() {
            commands.remove_resource::<DebugMode>();
            info!("Debug mode off");
        } else {
            commands.insert_resource(DebugMode);
            info!("Debug mode on");
        }
    }
}
