//! Per-tick player controller.
//!
//! [`player_controller`] runs once per simulation tick, before physics, and
//! applies these steps in order. Later steps override earlier ones.
//!
//! 1. Dead: play the death animation once and stop.
//! 2. Jumping with a non-negative vertical velocity: switch to Falling and
//!    raise gravity.
//! 3. Jump edge with budget left: launch.
//! 4. Horizontal input: walk right, walk left, or stop (and land if grounded).
//! 5. Attack edge: hammer blow.
//! 6. Build edge: build a block.
//! 7. Grounded: reset the jump budget.
//!
//! "Grounded" is the physics feedback of the previous step and does not
//! change while the tick runs.
//!
//! [`player_animation_complete_observer`] returns the sprite to idle (or jump)
//! after the hammer and build animations.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Facing, PlayerState};
use crate::components::rigidbody::RigidBody;
use crate::events::animation::AnimationCompleteEvent;
use crate::events::audio::{AudioCmd, SFX_JUMP, SFX_LAND};
use crate::resources::animationstore::{
    ANIM_BUILD, ANIM_DEAD, ANIM_GROUND, ANIM_HAMMER, ANIM_IDLE, ANIM_JUMP, ANIM_WALK,
};
use crate::resources::input::InputState;
use crate::systems::actions::{self, PlayerOutputs};

pub fn player_controller(
    mut query: Query<(
        &mut PlayerState,
        &mut RigidBody,
        &mut Animation,
        &MapPosition,
    )>,
    input: Res<InputState>,
    mut out: PlayerOutputs,
) {
    for (mut state, mut body, mut anim, position) in query.iter_mut() {
        step_player(&mut state, &mut body, &mut anim, position, &input, &mut out);
    }
}

fn step_player(
    state: &mut PlayerState,
    body: &mut RigidBody,
    anim: &mut Animation,
    position: &MapPosition,
    input: &InputState,
    out: &mut PlayerOutputs,
) {
    // 1. dead
    if state.is_dead() {
        if !state.death_animation_started {
            state.death_animation_started = true;
            debug!("Playing death animation");
            anim.play(ANIM_DEAD, true);
        }
        return;
    }

    // 2. apex
    if body.vertical_velocity() >= 0.0 && state.start_falling() {
        body.set_gravity(out.tuning.fall_gravity);
        trace!("Falling, gravity {}", out.tuning.fall_gravity);
    }

    let grounded = body.is_grounded();

    // 3. jump
    if input.jump_pressed() && state.start_jump(grounded) {
        body.set_velocity_y(-out.tuning.jump_velocity_for(state));
        body.set_gravity(out.tuning.jump_gravity);
        anim.play(ANIM_JUMP, true);
        out.audio_cmds.write(AudioCmd::play_fx(SFX_JUMP));
        actions::jump_smoke(position, out);
        debug!("Jump {}/{}", state.jump_count, state.max_jumps);
    }

    // 4. horizontal
    if input.right_held() {
        walk(state, body, anim, grounded, Facing::Right, out);
    } else if input.left_held() {
        walk(state, body, anim, grounded, Facing::Left, out);
    } else {
        if grounded {
            if state.land() {
                out.audio_cmds.write(AudioCmd::play_fx(SFX_LAND));
                actions::land_smoke(position, out);
                debug!("Landed");
            }
            if !state.building {
                anim.play(ANIM_IDLE, true);
            }
        }
        body.set_velocity_x(0.0);
    }

    // 5. attack
    if input.attack_pressed() {
        actions::hammer_blow(state, anim, position, out);
    }

    // 6. build
    if input.build_pressed() {
        actions::build_block(state, anim, position, out);
    }

    // 7. ground reset
    if grounded {
        state.reset_jumps();
    }
}

fn walk(
    state: &mut PlayerState,
    body: &mut RigidBody,
    anim: &mut Animation,
    grounded: bool,
    facing: Facing,
    out: &PlayerOutputs,
) {
    state.building = false;
    if grounded {
        state.reset_jumps();
        anim.play(ANIM_WALK, true);
    }
    state.facing = facing;
    anim.flip_h = facing == Facing::Left;
    body.set_velocity_x(facing.sign() * out.tuning.walk_speed_for(state));
}

/// Pick the next animation when a one-shot player animation ends.
pub fn player_animation_complete_observer(
    trigger: On<AnimationCompleteEvent>,
    mut query: Query<(&mut PlayerState, &mut Animation)>,
) {
    let event = trigger.event();
    let Ok((mut state, mut anim)) = query.get_mut(event.entity) else {
        return;
    };
    if state.is_dead() {
        return;
    }
    match event.key.as_str() {
        ANIM_GROUND => {
            anim.play(ANIM_IDLE, true);
        }
        ANIM_HAMMER | ANIM_BUILD => {
            state.building = false;
            let next = if state.motion.is_airborne() {
                ANIM_JUMP
            } else {
                ANIM_IDLE
            };
            anim.play(next, true);
        }
        _ => {}
    }
}
