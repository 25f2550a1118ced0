//! Inbound notifications for the player entity.
//!
//! Collision and pickup handlers trigger these on the world; the observers in
//! [`crate::systems::damage`] and [`crate::systems::prize`] apply them.
//!
//! # Example
//!
//! ```ignore
//! world.trigger(PlayerHitEvent { entity: player });
//! world.trigger(PrizeCollectedEvent { entity: player, prize: Prize::Boots });
//! ```

use bevy_ecs::prelude::*;

use crate::components::player::Prize;

/// An enemy touched the player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHitEvent {
    pub entity: Entity,
}

/// Instant death, e.g. falling out of the level.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerKillEvent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeCollectedEvent {
    pub entity: Entity,
    pub prize: Prize,
}
