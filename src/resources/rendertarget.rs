//! Fixed-resolution framebuffer.
//!
//! The world is drawn into a texture at the internal resolution (320x180 by
//! default) and then scaled into the window, so one world unit is always one
//! source pixel.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// NonSend: the texture is a GPU handle owned by the main thread.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
}

impl RenderTarget {
    /// Create the framebuffer with nearest-neighbour sampling.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        unsafe {
            ffi::SetTextureFilter(
                texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }
        Ok(Self {
            texture,
            game_width: width,
            game_height: height,
        })
    }

    /// Source rectangle covering the whole texture, flipped vertically for
    /// OpenGL's bottom-up texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: -(self.game_height as f32),
        }
    }
}
