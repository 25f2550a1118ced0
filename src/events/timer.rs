//! Delayed task expiration events.
//!
//! When a [`DelayedTask`](crate::components::delayedtask::DelayedTask) runs
//! out, a [`DelayedTaskEvent`] is triggered with the task's payload and the
//! task entity is despawned.
//!
//! # Related
//!
//! - [`crate::systems::delayedtask::update_delayed_tasks`] – emits these events
//! - [`crate::systems::delayedtask::player_task_observer`] – handles them

use bevy_ecs::prelude::*;

use crate::components::delayedtask::PlayerTask;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedTaskEvent {
    /// The entity the task acts on.
    pub target: Entity,
    pub task: PlayerTask,
    /// Invincibility epoch the task was scheduled for.
    pub epoch: u32,
}
