//! One-shot delayed task component.
//!
//! A [`DelayedTask`] lives on its own entity and counts scaled world time.
//! When `elapsed >= delay` the
//! [`update_delayed_tasks`](crate::systems::delayedtask::update_delayed_tasks)
//! system triggers a [`DelayedTaskEvent`](crate::events::timer::DelayedTaskEvent)
//! and despawns the task entity, so each task fires at most once.
//!
//! Task entities are not [`Persistent`](crate::components::persistent::Persistent):
//! tearing down the scene cancels every pending task.
//!
//! # Related
//!
//! - [`crate::systems::delayedtask::player_task_observer`] – runs the task

use bevy_ecs::prelude::{Component, Entity};

/// Deferred work scheduled by the player controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTask {
    /// End the hit-stagger window: re-enable the body and drop invincibility.
    ClearInvincibility,
    /// Ask the scene to restart after death.
    RestartScene,
}

#[derive(Component, Debug, Clone)]
pub struct DelayedTask {
    /// Entity the task acts on.
    pub target: Entity,
    /// Seconds to wait.
    pub delay: f32,
    pub elapsed: f32,
    pub task: PlayerTask,
    /// Invincibility epoch at scheduling time.
    pub epoch: u32,
}

impl DelayedTask {
    pub fn new(target: Entity, delay: f32, task: PlayerTask, epoch: u32) -> Self {
        Self {
            target,
            delay,
            elapsed: 0.0,
            task,
            epoch,
        }
    }

    /// Accumulate `dt` seconds. Returns true once the delay has passed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_fires_at_delay() {
        let mut task = DelayedTask::new(Entity::PLACEHOLDER, 1.0, PlayerTask::RestartScene, 0);
        assert!(!task.tick(0.4));
        assert!(!task.tick(0.4));
        assert!(task.tick(0.2));
        assert!((task.elapsed - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delay_fires_on_first_tick() {
        let mut task = DelayedTask::new(Entity::PLACEHOLDER, 0.0, PlayerTask::ClearInvincibility, 3);
        assert!(task.tick(0.0));
        assert_eq!(task.epoch, 3);
    }
}
