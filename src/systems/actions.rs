//! Player actions: jump and land smoke, hammer blow, block building.
//!
//! The helpers here turn a decision already taken by the controller into
//! collaborator requests. They share the [`PlayerOutputs`] bundle with the
//! observers in [`crate::systems::damage`], [`crate::systems::prize`] and
//! [`crate::systems::delayedtask`].

use std::ops::RangeInclusive;

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::player::PlayerState;
use crate::events::audio::{AudioCmd, SFX_BUILD};
use crate::events::effects::EffectCmd;
use crate::events::scene::SceneCmd;
use crate::events::spawn::{SmokeParticles, SpawnCmd};
use crate::resources::animationstore::{ANIM_BUILD, ANIM_HAMMER};
use crate::resources::rng::ControllerRng;
use crate::resources::tuning::PlayerTuning;

/// Particles in one jump or land burst.
pub const GROUND_SMOKE_COUNT: RangeInclusive<u32> = 3..=6;
/// Particles in one build burst.
pub const BUILD_SMOKE_COUNT: RangeInclusive<u32> = 8..=14;

/// Bundled system parameters for everything the player may request.
#[derive(SystemParam)]
pub struct PlayerOutputs<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub tuning: Res<'w, PlayerTuning>,
    pub rng: ResMut<'w, ControllerRng>,
    pub audio_cmds: MessageWriter<'w, AudioCmd>,
    pub spawn_cmds: MessageWriter<'w, SpawnCmd>,
    pub effect_cmds: MessageWriter<'w, EffectCmd>,
    pub scene_cmds: MessageWriter<'w, SceneCmd>,
}

/// Jump or land smoke below `origin`.
///
/// All particles of a burst share one horizontal distance; each picks its own
/// side, leaning left two times out of three.
pub fn scatter_ground_smoke(
    rng: &mut fastrand::Rng,
    origin: Vec2,
    offset_y: f32,
    spread: u32,
) -> SmokeParticles {
    let count = rng.u32(GROUND_SMOKE_COUNT);
    let distance = rng.u32(0..=spread) as f32;
    (0..count)
        .map(|_| {
            let side = if rng.i32(-1..=1) > 0 { 1.0 } else { -1.0 };
            Vec2::new(origin.x + side * distance, origin.y + offset_y)
        })
        .collect()
}

/// Build smoke around the spot `offset_x` away from `origin`.
pub fn scatter_build_smoke(
    rng: &mut fastrand::Rng,
    origin: Vec2,
    offset_x: f32,
    offset_y: f32,
    scatter: i32,
) -> SmokeParticles {
    let count = rng.u32(BUILD_SMOKE_COUNT);
    (0..count)
        .map(|_| {
            let jitter = rng.i32(-scatter..=scatter) as f32;
            Vec2::new(origin.x + offset_x + jitter, origin.y + offset_y)
        })
        .collect()
}

pub fn jump_smoke(position: &MapPosition, out: &mut PlayerOutputs) {
    let particles = scatter_ground_smoke(
        &mut out.rng.0,
        position.pos,
        out.tuning.jump_smoke_offset_y,
        out.tuning.smoke_spread,
    );
    out.spawn_cmds.write(SpawnCmd::Smoke { particles });
}

pub fn land_smoke(position: &MapPosition, out: &mut PlayerOutputs) {
    let particles = scatter_ground_smoke(
        &mut out.rng.0,
        position.pos,
        out.tuning.land_smoke_offset_y,
        out.tuning.smoke_spread,
    );
    out.spawn_cmds.write(SpawnCmd::Smoke { particles });
}

/// Swing the hammer in the facing direction.
pub fn hammer_blow(
    state: &mut PlayerState,
    anim: &mut Animation,
    position: &MapPosition,
    out: &mut PlayerOutputs,
) {
    state.building = true;
    anim.play(ANIM_HAMMER, true);
    let offset_x = state.facing.sign() * out.tuning.hammer_offset;
    let size = out.tuning.hammer_size_for(state);
    out.spawn_cmds.write(SpawnCmd::HitVolume {
        pos: position.offset(offset_x, 0.0),
        size: Vec2::splat(size),
    });
}

/// Place a block in the facing direction, raised when boots are on.
pub fn build_block(
    state: &mut PlayerState,
    anim: &mut Animation,
    position: &MapPosition,
    out: &mut PlayerOutputs,
) {
    state.building = true;
    anim.play(ANIM_BUILD, true);
    out.audio_cmds.write(AudioCmd::play_fx(SFX_BUILD));

    let offset_x = state.facing.sign() * out.tuning.block_offset;
    let offset_y = out.tuning.block_offset_y_for(state);
    let particles = scatter_build_smoke(
        &mut out.rng.0,
        position.pos,
        offset_x,
        out.tuning.build_smoke_offset_y,
        out.tuning.build_smoke_scatter,
    );
    out.spawn_cmds.write(SpawnCmd::Smoke { particles });
    out.spawn_cmds.write(SpawnCmd::Block {
        pos: position.offset(offset_x, offset_y),
    });
}
