#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

use trianglerun::components::animator::{AnimationState, Animator, FrameRegistry};
use trianglerun::components::collider::Collider;
use trianglerun::components::player::{IDLE, Player};
use trianglerun::math;
use trianglerun::resources::camera2d::Camera2DRes;
use trianglerun::resources::debugmode::DebugMode;
use trianglerun::resources::gameconfig::GameConfig;
use trianglerun::resources::input::InputState;
use trianglerun::resources::level::LevelGeometry;
use trianglerun::resources::rendertarget::RenderTarget;
use trianglerun::resources::screensize::ScreenSize;
use trianglerun::resources::spritesheet::SheetManifest;
use trianglerun::resources::texturestore::TextureStore;
use trianglerun::resources::worldtime::WorldTime;
use trianglerun::systems::camera::camera_follow_system;
use trianglerun::systems::input::update_input_state;
use trianglerun::systems::player::player_system;
use trianglerun::systems::render::render_system;
use trianglerun::systems::time::update_world_time;

const PLAYER_WIDTH: f32 = 12.0;
const PLAYER_HEIGHT: f32 = 14.0;
const PLAYER_SPAWN: math::Vector2 = math::Vector2::new(24.0, 120.0);
const CAMERA_SMOOTHING: f32 = 6.0;
/// Longest frame the simulation integrates in one step, in seconds.
const MAX_FRAME_TIME: f32 = 0.05;

#[derive(Parser)]
#[command(version, about = "Triangle Run: a small 2D platformer.")]
struct Cli {
    /// INI file to read settings from.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Start with collider outlines and the status line on.
    #[arg(long)]
    debug: bool,

    /// Write the effective settings to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    if let Err(e) = run(config, cli.debug) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Load the sprite sheet with its color key made transparent. A flat
/// placeholder of the manifest's size stands in when the file is missing.
fn load_sheet(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    config: &GameConfig,
    manifest: &SheetManifest,
) -> Result<Texture2D, String> {
    let path = config.sprite_sheet.to_string_lossy();
    let mut image = match Image::load_image(&path) {
        Ok(image) => image,
        Err(e) => {
            warn!("Failed to load sprite sheet {}: {}; using placeholder", path, e);
            let (w, h) = manifest.required_size();
            Image::gen_image_color(w as i32, h as i32, Color::new(41, 173, 255, 255))
        }
    };
    image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8);
    let [r, g, b] = manifest.color_key;
    image.color_replace(Color::new(r, g, b, 255), Color::BLANK);
    rl.load_texture_from_image(th, &image)
        .map_err(|e| format!("Failed to create sprite sheet texture: {}", e))
}

fn run(config: GameConfig, debug: bool) -> Result<(), String> {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Triangle Run")
        .build();
    rl.set_target_fps(config.target_fps);

    let render_target =
        RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height)?;

    let manifest = SheetManifest::load_from_file(&config.manifest).map_err(|e| e.to_string())?;
    let sheet = load_sheet(&mut rl, &thread, &config, &manifest)?;

    let mut registry = FrameRegistry::new();
    manifest
        .register_into(&mut registry, sheet.width as u32, sheet.height as u32)
        .map_err(|e| e.to_string())?;
    let mut textures = TextureStore::new();
    textures.insert(manifest.sheet.clone(), sheet);

    let animator = Animator::new(
        registry,
        config.animation_cooldown(),
        AnimationState::new(IDLE, 0),
    )
    .map_err(|e| e.to_string())?
    .with_policy(config.hold_policy);
    let collider =
        Collider::new(PLAYER_SPAWN, PLAYER_WIDTH, PLAYER_HEIGHT).map_err(|e| e.to_string())?;
    let player = Player::new(collider, animator, config.physics).map_err(|e| e.to_string())?;

    let mut world = World::new();
    world.insert_resource(Camera2DRes::new(
        player.collider.rect.center(),
        CAMERA_SMOOTHING,
    ));
    world.spawn(player);

    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(LevelGeometry::demo_room());
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(textures);
    world.insert_resource(config);
    if debug {
        world.insert_resource(DebugMode);
    }
    world.insert_non_send_resource(render_target);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(player_system.after(update_input_state));
    update.add_systems(camera_follow_system.after(player_system));
    update.add_systems(render_system.after(camera_follow_system));

    update
        .initialize(&mut world)
        .map_err(|e| format!("Failed to initialize schedule: {}", e))?;

    info!("Entering main loop");
    while !world
        .non_send_resource::<RaylibHandle>()
        .window_should_close()
    {
        let (dt, now) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            (rl.get_frame_time().min(MAX_FRAME_TIME), rl.get_time() as f32)
        };
        update_world_time(&mut world, dt, now);

        update.run(&mut world);

        let (w, h) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        let mut screen = world.resource_mut::<ScreenSize>();
        screen.w = w;
        screen.h = h;
    }
    Ok(())
}
