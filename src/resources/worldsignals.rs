//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource is the scene-level state the player
//! controller talks to through [`SceneCmd`](crate::events::scene::SceneCmd):
//!
//! - integer [`SIGNAL_COINS`] – coins collected in this scene
//! - flag [`FLAG_RESTART_SCENE`] – raised when the scene must be rebuilt
//! - entity [`ENTITY_PLAYER`] – the live player entity

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

pub const SIGNAL_COINS: &str = "coins";
pub const FLAG_RESTART_SCENE: &str = "restart_scene";
pub const ENTITY_PLAYER: &str = "player";

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Integer numeric signals addressed by string keys.
    pub integers: FxHashMap<String, i32>,
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
    /// Map of entities of interest for the current scene.
    pub entities: FxHashMap<String, Entity>,
}

impl WorldSignals {
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }

    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }

    /// Add `delta` to an integer signal, treating a missing key as 0.
    pub fn add_integer(&mut self, key: &str, delta: i32) -> i32 {
        let slot = self.integers.entry(key.to_string()).or_insert(0);
        *slot += delta;
        *slot
    }

    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }

    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    /// Remove a flag and report whether it was set.
    pub fn take_flag(&mut self, key: &str) -> bool {
        self.flags.remove(key)
    }

    pub fn get_entity(&self, key: &str) -> Option<Entity> {
        self.entities.get(key).copied()
    }

    pub fn set_entity(&mut self, key: impl Into<String>, entity: Entity) {
        self.entities.insert(key.into(), entity);
    }

    pub fn remove_entity(&mut self, key: &str) -> Option<Entity> {
        self.entities.remove(key)
    }
}
