//! Game configuration resource.
//!
//! Manages controller and simulation settings loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [player]
//! health = 1
//! max_jumps = 1
//! walk_speed = 200
//! boosted_walk_speed = 330
//! jump_velocity = 400
//! boosted_jump_velocity = 600
//! base_gravity = 100
//! jump_gravity = 400
//! fall_gravity = 700
//!
//! [timing]
//! invincibility_ms = 1000
//! restart_delay_ms = 1500
//!
//! [simulation]
//! tick_rate = 60
//! seed = 42
//! spawn_x = 100
//! spawn_y = 270
//! floor_y = 300
//! animations = ./walt.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::tuning::PlayerTuning;

/// Default safe values for startup
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_SPAWN_X: f32 = 100.0;
const DEFAULT_SPAWN_Y: f32 = 270.0;
const DEFAULT_FLOOR_Y: f32 = 300.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Controller numbers from `[player]` and `[timing]`.
    pub tuning: PlayerTuning,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Seed for the cosmetic random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Floor line of the headless driver. Bodies rest with their bottom edge on it.
    pub floor_y: f32,
    /// Optional JSON file replacing the built-in animation table.
    pub animations_path: Option<PathBuf>,
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
            tuning: PlayerTuning::default(),
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            spawn_x: DEFAULT_SPAWN_X,
            spawn_y: DEFAULT_SPAWN_Y,
            floor_y: DEFAULT_FLOOR_Y,
            animations_path: None,
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

    /// Seconds per simulation tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [player] section
        let tuning = &mut self.tuning;
        if let Some(health) = config.getuint("player", "health").ok().flatten() {
            if health == 0 {
                return Err("player.health must be greater than zero".to_string());
            }
            tuning.initial_health = health as u32;
        }
        if let Some(jumps) = config.getuint("player", "max_jumps").ok().flatten() {
            tuning.max_jumps = jumps as u32;
        }
        let floats: [(&str, &mut f32); 7] = [
            ("walk_speed", &mut tuning.walk_speed),
            ("boosted_walk_speed", &mut tuning.boosted_walk_speed),
            ("jump_velocity", &mut tuning.jump_velocity),
            ("boosted_jump_velocity", &mut tuning.boosted_jump_velocity),
            ("base_gravity", &mut tuning.base_gravity),
            ("jump_gravity", &mut tuning.jump_gravity),
            ("fall_gravity", &mut tuning.fall_gravity),
        ];
        for (key, slot) in floats {
            if let Some(value) = config.getfloat("player", key).ok().flatten() {
                *slot = value as f32;
            }
        }

        // [timing] section
        if let Some(ms) = config.getuint("timing", "invincibility_ms").ok().flatten() {
            tuning.invincibility_secs = ms as f32 / 1000.0;
        }
        if let Some(ms) = config.getuint("timing", "restart_delay_ms").ok().flatten() {
            tuning.restart_delay_secs = ms as f32 / 1000.0;
        }

        // [simulation] section
        if let Some(rate) = config.getuint("simulation", "tick_rate").ok().flatten() {
            if rate == 0 {
                return Err("simulation.tick_rate must be greater than zero".to_string());
            }
            self.tick_rate = rate as u32;
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        if let Some(x) = config.getfloat("simulation", "spawn_x").ok().flatten() {
            self.spawn_x = x as f32;
        }
        if let Some(y) = config.getfloat("simulation", "spawn_y").ok().flatten() {
            self.spawn_y = y as f32;
        }
        if let Some(y) = config.getfloat("simulation", "floor_y").ok().flatten() {
            self.floor_y = y as f32;
        }
        if let Some(path) = config.get("simulation", "animations") {
            self.animations_path = Some(PathBuf::from(path));
        }

        info!(
            "Loaded config: health={}, max_jumps={}, tick_rate={}, seed={:?}",
            self.tuning.initial_health, self.tuning.max_jumps, self.tick_rate, self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let tuning = &self.tuning;

        // [player] section
        config.set("player", "health", Some(tuning.initial_health.to_string()));
        config.set("player", "max_jumps", Some(tuning.max_jumps.to_string()));
        config.set("player", "walk_speed", Some(tuning.walk_speed.to_string()));
        config.set(
            "player",
            "boosted_walk_speed",
            Some(tuning.boosted_walk_speed.to_string()),
        );
        config.set("player", "jump_velocity", Some(tuning.jump_velocity.to_string()));
        config.set(
            "player",
            "boosted_jump_velocity",
            Some(tuning.boosted_jump_velocity.to_string()),
        );
        config.set("player", "base_gravity", Some(tuning.base_gravity.to_string()));
        config.set("player", "jump_gravity", Some(tuning.jump_gravity.to_string()));
        config.set("player", "fall_gravity", Some(tuning.fall_gravity.to_string()));

        // [timing] section
        config.set(
            "timing",
            "invincibility_ms",
            Some(((tuning.invincibility_secs * 1000.0).round() as u64).to_string()),
        );
        config.set(
            "timing",
            "restart_delay_ms",
            Some(((tuning.restart_delay_secs * 1000.0).round() as u64).to_string()),
        );

        // [simulation] section
        config.set("simulation", "tick_rate", Some(self.tick_rate.to_string()));
        if let Some(seed) = self.seed {
            config.set("simulation", "seed", Some(seed.to_string()));
        }
        config.set("simulation", "spawn_x", Some(self.spawn_x.to_string()));
        config.set("simulation", "spawn_y", Some(self.spawn_y.to_string()));
        config.set("simulation", "floor_y", Some(self.floor_y.to_string()));
        if let Some(path) = &self.animations_path {
            config.set(
                "simulation",
                "animations",
                Some(path.to_string_lossy().into_owned()),
            );
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
