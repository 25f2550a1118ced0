//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Systems look up an animation by a string key
//! and drive playback based on the immutable parameters stored here.
//!
//! The player sprite sheet ("walt") ships as [`AnimationStore::walt_defaults`];
//! alternative sheets can be loaded from JSON with
//! [`AnimationStore::from_json_str`].

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const ANIM_START_IDLE: &str = "startidle";
pub const ANIM_IDLE: &str = "playeridle";
pub const ANIM_WALK: &str = "playerwalk";
pub const ANIM_JUMP: &str = "playerjump";
pub const ANIM_HAMMER: &str = "playerhammer";
pub const ANIM_BUILD: &str = "playerbuild";
pub const ANIM_DEAD: &str = "playerdead";
/// Landing animation. Not defined on the walt sheet; completing it returns to idle.
pub const ANIM_GROUND: &str = "playerground";
/// Hit stagger reuses the death frames.
pub const ANIM_HIT: &str = ANIM_DEAD;

/// Highest playback speed accepted from animation files.
pub const MAX_ANIMATION_FPS: f32 = 240.0;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable data describing a sprite-sheet animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationResource {
    /// Texture key of the sprite sheet.
    #[serde(default = "default_sheet")]
    pub sheet: String,
    /// First frame on the sheet, inclusive.
    pub first_frame: usize,
    /// Last frame on the sheet, inclusive.
    pub last_frame: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Extra passes after the first one. -1 loops forever.
    #[serde(default)]
    pub repeat: i32,
}

fn default_sheet() -> String {
    "walt".to_string()
}

impl AnimationResource {
    pub fn new(first_frame: usize, last_frame: usize, fps: f32, repeat: i32) -> Self {
        Self {
            sheet: default_sheet(),
            first_frame,
            last_frame,
            fps,
            repeat,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.last_frame.saturating_sub(self.first_frame) + 1
    }

    pub fn looped(&self) -> bool {
        self.repeat < 0
    }

    /// Seconds each frame stays on screen.
    pub fn frame_duration(&self) -> f32 {
        if self.fps > 0.0 { 1.0 / self.fps } else { f32::INFINITY }
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Animations of the "walt" player sheet.
    pub fn walt_defaults() -> Self {
        let mut store = Self::new();
        store.insert(ANIM_START_IDLE, AnimationResource::new(0, 1, 3.0, -1));
        store.insert(ANIM_IDLE, AnimationResource::new(2, 3, 3.0, -1));
        store.insert(ANIM_WALK, AnimationResource::new(4, 6, 10.0, -1));
        store.insert(ANIM_JUMP, AnimationResource::new(4, 4, 1.0, 0));
        store.insert(ANIM_HAMMER, AnimationResource::new(7, 8, 10.0, 0));
        store.insert(ANIM_BUILD, AnimationResource::new(9, 10, 10.0, 2));
        store.insert(ANIM_DEAD, AnimationResource::new(11, 16, 5.0, 0));
        store
    }

    /// Load definitions from a JSON object of `key -> definition`.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let animations: FxHashMap<String, AnimationResource> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse animation definitions: {}", e))?;
        for (key, animation) in &animations {
            if animation.last_frame < animation.first_frame {
                return Err(format!(
                    "Animation '{}' ends at frame {} before it starts at {}",
                    key, animation.last_frame, animation.first_frame
                ));
            }
            if !(animation.fps > 0.0 && animation.fps <= MAX_ANIMATION_FPS) {
                return Err(format!(
                    "Animation '{}' has fps {}, expected more than 0 and at most {}",
                    key, animation.fps, MAX_ANIMATION_FPS
                ));
            }
        }
        Ok(Self { animations })
    }

    /// Load definitions from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read animation file '{}': {}", path, e))?;
        Self::from_json_str(&json)
    }
}
