//! Sprite sheet manifest.
//!
//! Describes how animation states are laid out on a sprite sheet so frame
//! sequences can be registered without hard-coding cell coordinates.
//!
//! ```json
//! {
//!   "sheet": "player",
//!   "cell_width": 16,
//!   "cell_height": 17,
//!   "color_key": [0, 0, 0],
//!   "states": [
//!     { "name": "Run", "row": 0, "col": 0, "stop": 8 }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::components::animator::FrameRegistry;
use crate::components::sprite::{SheetSlice, slice_row};
use crate::error::ConfigError;

/// One animation state's run of cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManifestState {
    pub name: String,
    pub row: u32,
    pub col: u32,
    /// Last column (exclusive).
    pub stop: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetManifest {
    /// Texture key frames refer to.
    pub sheet: String,
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub color_key: [u8; 3],
    pub states: Vec<ManifestState>,
}

impl SheetManifest {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text)
            .map_err(|e| ConfigError::File(format!("Failed to parse sheet manifest: {}", e)))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::File(format!("Failed to read sheet manifest {:?}: {}", path, e))
        })?;
        let manifest = Self::from_json(&text)?;
        info!(
            "Loaded sheet manifest {:?}: {} states",
            path,
            manifest.states.len()
        );
        Ok(manifest)
    }

    /// Smallest sheet, in pixels, that holds every listed cell.
    pub fn required_size(&self) -> (u32, u32) {
        let cols = self.states.iter().map(|s| s.stop).max().unwrap_or(0);
        let rows = self.states.iter().map(|s| s.row + 1).max().unwrap_or(0);
        (cols * self.cell_width, rows * self.cell_height)
    }

    /// Slice every state out of a `sheet_w` x `sheet_h` sheet and register it.
    ///
    /// Stops at the first state that does not fit the sheet.
    pub fn register_into(
        &self,
        registry: &mut FrameRegistry,
        sheet_w: u32,
        sheet_h: u32,
    ) -> Result<(), ConfigError> {
        let sheet: Arc<str> = Arc::from(self.sheet.as_str());
        for state in &self.states {
            let slice = SheetSlice {
                row: state.row,
                col: state.col,
                stop: state.stop,
                cell_width: self.cell_width,
                cell_height: self.cell_height,
                color_key: self.color_key,
            };
            let frames = slice_row(&state.name, &sheet, sheet_w, sheet_h, &slice)?;
            debug!("Registering '{}' with {} frames", state.name, frames.len());
            registry.init_state(state.name.clone(), frames)?;
        }
        Ok(())
    }
}
