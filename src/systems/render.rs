//! Render system.
//!
//! Draws the level and every player into the fixed-resolution
//! [`RenderTarget`], then scales that texture into the window with
//! letterboxing. With [`DebugMode`] present, collision boxes are outlined and
//! a status line is printed in window space.
use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::*;

use crate::components::player::Player;
use crate::math::Rect;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::level::LevelGeometry;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

const BACKGROUND: Color = Color::new(255, 241, 232, 255);
const GROUND: Color = Color::new(171, 82, 54, 255);

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut target: NonSendMut<RenderTarget>,
    textures: Res<TextureStore>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    level: Res<LevelGeometry>,
    players: Query<&Player>,
    debug_mode: Option<Res<DebugMode>>,
) {
    let (game_w, game_h) = (target.game_width, target.game_height);
    let origin = camera.view_origin(game_w as f32, game_h as f32);
    let cam = Camera2D {
        offset: Vector2::zero(),
        target: origin.into(),
        rotation: 0.0,
        zoom: 1.0,
    };
    let source = target.source_rect();
    let dest: Rectangle = screen.letterbox(game_w, game_h).into();

    let mut d = rl.begin_drawing(&th);
    {
        let mut dt = d.begin_texture_mode(&th, &mut target.texture);
        dt.clear_background(BACKGROUND);
        let mut d2 = dt.begin_mode2D(cam);

        for rect in &level.colliders {
            d2.draw_rectangle_rec(Rectangle::from(*rect), GROUND);
        }

        for player in players.iter() {
            let (frame, (pos, flipped)) = match (player.frame(), player.draw_position()) {
                (Ok(frame), Ok(placement)) => (frame, placement),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Cannot draw player: {}", e);
                    continue;
                }
            };
            let Some(tex) = textures.get(&frame.sheet) else {
                warn!("Texture '{}' not loaded", frame.sheet);
                continue;
            };
            let mut src: Rectangle = frame.source.into();
            if flipped {
                // Negative source width mirrors horizontally
                src.width = -src.width;
            }
            let dest = Rect::new(pos.x, pos.y, frame.width(), frame.height());
            d2.draw_texture_pro(
                tex,
                src,
                Rectangle::from(dest),
                Vector2::zero(),
                0.0,
                Color::WHITE,
            );
        }

        if debug_mode.is_some() {
            for rect in &level.colliders {
                d2.draw_rectangle_lines_ex(Rectangle::from(*rect), 1.0, Color::BLUE);
            }
            for player in players.iter() {
                d2.draw_rectangle_lines_ex(
                    Rectangle::from(player.collider.rect),
                    1.0,
                    Color::RED,
                );
            }
        }
    }

    d.clear_background(Color::BLACK);
    d.draw_texture_pro(&target.texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);

    if debug_mode.is_some() {
        let fps = d.get_fps();
        d.draw_text(
            &format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
            10,
            10,
            10,
            Color::WHITE,
        );
        for (i, player) in players.iter().enumerate() {
            let c = &player.collider;
            let text = format!(
                "pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) {:?} anim {}",
                c.position.x,
                c.position.y,
                c.velocity.x,
                c.velocity.y,
                player.phase,
                player.animator.current_state().name
            );
            d.draw_text(&text, 10, 30 + 20 * i as i32, 10, Color::WHITE);
        }
    }
}
