//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animator`] – frame registry and the hold/interrupt animation state machine
//! - [`collider`] – kinematic body with axis-separated collision resolution
//! - [`player`] – player controller composing a collider and an animator
//! - [`sprite`] – sprite sheet frames and row slicing

pub mod animator;
pub mod collider;
pub mod player;
pub mod sprite;
