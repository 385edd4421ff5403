//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Every value has a
//! safe default so the game starts without a config file; missing keys keep
//! their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [render]
//! width = 320
//! height = 180
//!
//! [physics]
//! gravity = 400
//! max_speed = 62.5
//! max_fall = 250
//! jump_force = -100
//! tolerance = 0.25
//! ramp_rate = 10
//! coyote_ticks = 6
//!
//! [animation]
//! cooldown_ms = 100
//! hold_policy = countdown
//!
//! [assets]
//! sprite_sheet = ./assets/Triangle_Man_Sprites.png
//! manifest = ./assets/animations.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::animator::HoldPolicy;
use crate::components::player::PlayerParams;
use crate::error::ConfigError;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 320;
const DEFAULT_RENDER_HEIGHT: u32 = 180;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_COOLDOWN_MS: u32 = 100;
const DEFAULT_SPRITE_SHEET: &str = "./assets/Triangle_Man_Sprites.png";
const DEFAULT_MANIFEST: &str = "./assets/animations.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Player movement constants.
    pub physics: PlayerParams,
    /// Minimum time between animator ticks, in milliseconds.
    pub cooldown_ms: u32,
    pub hold_policy: HoldPolicy,
    pub sprite_sheet: PathBuf,
    pub manifest: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            physics: PlayerParams::default(),
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            hold_policy: HoldPolicy::default(),
            sprite_sheet: PathBuf::from(DEFAULT_SPRITE_SHEET),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| ConfigError::File(format!("Failed to load config file: {}", e)))?;
        self.apply(&config)?;
        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, cooldown={}ms, hold={:?}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.cooldown_ms,
            self.hold_policy
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| ConfigError::File(format!("Failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }

        // [render] section
        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        // [physics] section
        let physics = &mut self.physics;
        if let Some(v) = float("physics", "gravity") {
            physics.gravity = v;
        }
        if let Some(v) = float("physics", "max_speed") {
            physics.max_speed = v;
        }
        if let Some(v) = float("physics", "max_fall") {
            physics.max_fall = v;
        }
        if let Some(v) = float("physics", "jump_force") {
            physics.jump_force = v;
        }
        if let Some(v) = float("physics", "tolerance") {
            physics.tolerance = v;
        }
        if let Some(v) = float("physics", "ramp_rate") {
            physics.ramp_rate = v;
        }
        if let Some(v) = uint("physics", "coyote_ticks") {
            physics.coyote_ticks = v as u32;
        }

        // [animation] section
        if let Some(ms) = uint("animation", "cooldown_ms") {
            self.cooldown_ms = ms as u32;
        }
        if let Some(policy) = config.get("animation", "hold_policy") {
            self.hold_policy = policy.parse()?;
        }

        // [assets] section
        if let Some(path) = config.get("assets", "sprite_sheet") {
            self.sprite_sheet = PathBuf::from(path);
        }
        if let Some(path) = config.get("assets", "manifest") {
            self.manifest = PathBuf::from(path);
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [render] section
        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        // [physics] section
        let p = &self.physics;
        config.set("physics", "gravity", Some(p.gravity.to_string()));
        config.set("physics", "max_speed", Some(p.max_speed.to_string()));
        config.set("physics", "max_fall", Some(p.max_fall.to_string()));
        config.set("physics", "jump_force", Some(p.jump_force.to_string()));
        config.set("physics", "tolerance", Some(p.tolerance.to_string()));
        config.set("physics", "ramp_rate", Some(p.ramp_rate.to_string()));
        config.set("physics", "coyote_ticks", Some(p.coyote_ticks.to_string()));

        // [animation] section
        config.set("animation", "cooldown_ms", Some(self.cooldown_ms.to_string()));
        let policy = match self.hold_policy {
            HoldPolicy::Countdown => "countdown",
            HoldPolicy::Legacy => "legacy",
        };
        config.set("animation", "hold_policy", Some(policy.to_string()));

        // [assets] section
        config.set(
            "assets",
            "sprite_sheet",
            Some(self.sprite_sheet.display().to_string()),
        );
        config.set("assets", "manifest", Some(self.manifest.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::File(format!("Failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Animator cooldown in seconds.
    pub fn animation_cooldown(&self) -> f32 {
        self.cooldown_ms as f32 / 1000.0
    }
}
