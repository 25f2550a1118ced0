//! Hit and death handling.
//!
//! - [`player_hit_observer`] applies one point of damage. A surviving player
//!   staggers: the body is disabled and invincibility starts, both lifted by a
//!   [`PlayerTask::ClearInvincibility`] task after `invincibility_secs`.
//! - [`player_kill_observer`] runs the death sequence directly.
//!
//! Death freezes the body, plays the death animation and schedules exactly
//! one [`PlayerTask::RestartScene`] task, however many times it is requested.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animation::Animation;
use crate::components::delayedtask::{DelayedTask, PlayerTask};
use crate::components::player::{HitOutcome, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::events::player::{PlayerHitEvent, PlayerKillEvent};
use crate::resources::animationstore::{ANIM_DEAD, ANIM_HIT};
use crate::systems::actions::PlayerOutputs;

pub fn player_hit_observer(
    trigger: On<PlayerHitEvent>,
    mut query: Query<(&mut PlayerState, &mut RigidBody, &mut Animation)>,
    mut out: PlayerOutputs,
) {
    let entity = trigger.event().entity;
    let Ok((mut state, mut body, mut anim)) = query.get_mut(entity) else {
        return;
    };
    match state.take_hit() {
        HitOutcome::Ignored => {
            debug!("Hit ignored (dead={}, invincible={})", state.is_dead(), state.invincible);
        }
        HitOutcome::Staggered { epoch } => {
            info!("Player hit, health now {}", state.health);
            anim.play(ANIM_HIT, true);
            body.enabled = false;
            out.commands.spawn(DelayedTask::new(
                entity,
                out.tuning.invincibility_secs,
                PlayerTask::ClearInvincibility,
                epoch,
            ));
        }
        HitOutcome::Killed => {
            info!("Player hit with no health left");
            die(entity, &mut state, &mut body, &mut anim, &mut out);
        }
    }
}

pub fn player_kill_observer(
    trigger: On<PlayerKillEvent>,
    mut query: Query<(&mut PlayerState, &mut RigidBody, &mut Animation)>,
    mut out: PlayerOutputs,
) {
    let entity = trigger.event().entity;
    let Ok((mut state, mut body, mut anim)) = query.get_mut(entity) else {
        return;
    };
    die(entity, &mut state, &mut body, &mut anim, &mut out);
}

/// Alive -> Dead. No-op on a dead player.
pub fn die(
    entity: Entity,
    state: &mut PlayerState,
    body: &mut RigidBody,
    anim: &mut Animation,
    out: &mut PlayerOutputs,
) {
    if !state.kill() {
        debug!("die() on a dead player ignored");
        return;
    }
    info!("Player died");
    anim.play(ANIM_DEAD, true);
    body.immovable = true;
    body.freeze();
    out.commands.spawn(DelayedTask::new(
        entity,
        out.tuning.restart_delay_secs,
        PlayerTask::RestartScene,
        state.invincibility_epoch,
    ));
}
