//! Triangle Run library.
//!
//! Exposes the platformer core (math helpers, collider, animator, player) and
//! the ECS resources and systems that drive it, for the binary and for
//! integration tests. Everything except window input and drawing builds
//! without the `render` feature.

pub mod components;
pub mod error;
pub mod math;
pub mod resources;
pub mod systems;
