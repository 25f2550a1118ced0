//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive
//! [`clean_scene`](crate::game::clean_scene). Everything else, including the
//! player, its observers and pending delayed tasks, is despawned on restart.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Persistent;
