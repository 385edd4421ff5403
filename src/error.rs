//! Configuration errors.
//!
//! Everything that can go wrong in the simulation core is a setup problem:
//! an animation state that was never registered, a sprite sheet slice that
//! falls outside the image, a body with no area, or a config file that cannot
//! be read. Per-frame physics never fails.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("animation state '{0}' is not registered")]
    UnknownState(String),

    #[error("animation state '{0}' has no frames")]
    EmptySequence(String),

    #[error("collider size must be positive, got {w}x{h}")]
    DegenerateRect { w: f32, h: f32 },

    #[error("sprite cell (row {row}, col {col}) for '{state}' is outside the sheet")]
    SheetOutOfBounds { state: String, row: u32, col: u32 },

    #[error("{0}")]
    File(String),

    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}
