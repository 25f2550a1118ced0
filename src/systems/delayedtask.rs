//! Delayed task systems.
//!
//! - [`update_delayed_tasks`] – advances every task and fires the expired ones
//! - [`player_task_observer`] – applies the fired task to the player
//!
//! Each task fires once; its entity is despawned in the same tick.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::delayedtask::{DelayedTask, PlayerTask};
use crate::components::player::PlayerState;
use crate::components::rigidbody::RigidBody;
use crate::events::scene::SceneCmd;
use crate::events::timer::DelayedTaskEvent;
use crate::resources::worldtime::WorldTime;

pub fn update_delayed_tasks(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut DelayedTask)>,
    mut commands: Commands,
) {
    for (entity, mut task) in query.iter_mut() {
        if task.tick(world_time.delta) {
            commands.trigger(DelayedTaskEvent {
                target: task.target,
                task: task.task,
                epoch: task.epoch,
            });
            commands.entity(entity).try_despawn();
        }
    }
}

pub fn player_task_observer(
    trigger: On<DelayedTaskEvent>,
    mut query: Query<(&mut PlayerState, &mut RigidBody)>,
    mut scene_cmds: MessageWriter<SceneCmd>,
) {
    let event = *trigger.event();
    match event.task {
        PlayerTask::ClearInvincibility => {
            let Ok((mut state, mut body)) = query.get_mut(event.target) else {
                return;
            };
            if state.is_dead() {
                debug!("Invincibility timer expired after death, ignored");
                return;
            }
            body.enabled = true;
            if !state.clear_invincibility(event.epoch) {
                debug!("Stale invincibility timer, player stays invincible");
            }
        }
        PlayerTask::RestartScene => {
            scene_cmds.write(SceneCmd::RestartScene);
        }
    }
}
