//! World-space position component.
//!
//! [`MapPosition`] is the pivot of an entity in world coordinates (Y grows
//! downward). The player controller reads it to place spawned blocks, hit
//! volumes and smoke; the physics body that owns the entity writes it.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Position shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Vec2 {
        self.pos + Vec2::new(dx, dy)
    }
}
