//! Requests for sprite tweens.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum EffectCmd {
    /// Scale the sprite from `from_scale` back to `to_scale`, `repeat` extra times.
    Flash {
        entity: Entity,
        from_scale: f32,
        to_scale: f32,
        duration: f32,
        repeat: u32,
    },
    /// Yoyo the sprite alpha forever.
    Pulse {
        entity: Entity,
        from_alpha: f32,
        to_alpha: f32,
        duration: f32,
    },
}
