//! Game systems.
//!
//! Submodules overview
//! - [`camera`] – ease the camera toward the player inside the level bounds
//! - [`input`] – read keyboard state into [`crate::resources::input::InputState`] (render feature)
//! - [`player`] – run one simulation step for every player
//! - [`render`] – draw the level and players through the fixed-size render target (render feature)
//! - [`time`] – advance the physics and animation clocks

pub mod camera;
#[cfg(feature = "render")]
pub mod input;
pub mod player;
#[cfg(feature = "render")]
pub mod render;
pub mod time;
