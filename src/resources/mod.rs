//! ECS resources made available to systems.
//!
//! Overview
//! - `camera2d` – eased, level-clamped view center
//! - `debugmode` – presence toggles collider outlines and extra logs
//! - `gameconfig` – INI-backed window, physics, animation and asset settings
//! - `input` – per-frame directional key state
//! - `level` – static collision rectangles of the current level
//! - `rendertarget` – fixed-resolution framebuffer (render feature)
//! - `screensize` – window dimensions and letterbox fitting
//! - `spritesheet` – JSON description of animation cells on a sheet
//! - `texturestore` – loaded textures keyed by sheet name (render feature)
//! - `worldtime` – physics delta and animation wall clock
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod level;
#[cfg(feature = "render")]
pub mod rendertarget;
pub mod screensize;
pub mod spritesheet;
#[cfg(feature = "render")]
pub mod texturestore;
pub mod worldtime;
