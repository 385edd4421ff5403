use std::sync::Arc;

use crate::error::ConfigError;
use crate::math::Rect;

/// One animation frame: a cell of a sprite sheet.
///
/// The frame does not own pixels. `sheet` is the texture key the renderer
/// looks up, `source` the cell inside it, and `color_key` the RGB color the
/// renderer treats as transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub sheet: Arc<str>,
    pub source: Rect,
    pub color_key: [u8; 3],
}

impl SpriteFrame {
    pub fn width(&self) -> f32 {
        self.source.w
    }

    pub fn height(&self) -> f32 {
        self.source.h
    }
}

/// Describes a horizontal run of equally sized cells on a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSlice {
    pub row: u32,
    /// First column (inclusive).
    pub col: u32,
    /// Last column (exclusive).
    pub stop: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub color_key: [u8; 3],
}

/// Cut `slice.stop - slice.col` cells out of a `sheet_w` x `sheet_h` sheet,
/// left to right.
///
/// Fails when a cell would read outside the sheet or the run is empty, so a
/// bad asset description is caught at registration instead of at draw time.
pub fn slice_row(
    state: &str,
    sheet: &Arc<str>,
    sheet_w: u32,
    sheet_h: u32,
    slice: &SheetSlice,
) -> Result<Vec<SpriteFrame>, ConfigError> {
    if slice.stop <= slice.col {
        return Err(ConfigError::EmptySequence(state.to_string()));
    }
    (slice.col..slice.stop)
        .map(|col| {
            let x = col * slice.cell_width;
            let y = slice.row * slice.cell_height;
            if x + slice.cell_width > sheet_w || y + slice.cell_height > sheet_h {
                return Err(ConfigError::SheetOutOfBounds {
                    state: state.to_string(),
                    row: slice.row,
                    col,
                });
            }
            Ok(SpriteFrame {
                sheet: Arc::clone(sheet),
                source: Rect::new(
                    x as f32,
                    y as f32,
                    slice.cell_width as f32,
                    slice.cell_height as f32,
                ),
                color_key: slice.color_key,
            })
        })
        .collect()
}
