//! Animation completion notification.
//!
//! Triggered by the [`animation`](crate::systems::animation::animation) system
//! when a non-looping animation plays its last frame (after all repeats).

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationCompleteEvent {
    pub entity: Entity,
    /// Key of the animation that finished.
    pub key: String,
}
