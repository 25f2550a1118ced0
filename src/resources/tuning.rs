//! Player tuning constants.
//!
//! [`PlayerTuning`] collects every number the controller uses: speeds,
//! gravities, action geometry and delays. Defaults reproduce the shipped game;
//! [`GameConfig`](crate::resources::gameconfig::GameConfig) overrides the
//! `[player]` and `[timing]` values from the INI file.

use bevy_ecs::prelude::Resource;

use crate::components::player::PlayerState;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    pub initial_health: u32,
    pub max_jumps: u32,

    /// Horizontal speed in px/s.
    pub walk_speed: f32,
    pub boosted_walk_speed: f32,
    /// Upward launch speed in px/s. Applied as a negative vertical velocity.
    pub jump_velocity: f32,
    pub boosted_jump_velocity: f32,

    /// Gravity set on the body at spawn.
    pub base_gravity: f32,
    pub jump_gravity: f32,
    pub fall_gravity: f32,

    pub body_width: f32,
    pub body_height: f32,

    /// Horizontal distance of the hammer hit volume from the player.
    pub hammer_offset: f32,
    pub hammer_size: f32,
    pub boosted_hammer_size: f32,

    /// Horizontal distance of a built block from the player.
    pub block_offset: f32,
    /// How far above the player a block is placed when boots are on.
    pub block_raise: f32,

    pub jump_smoke_offset_y: f32,
    pub land_smoke_offset_y: f32,
    /// Maximum horizontal distance of jump and land smoke.
    pub smoke_spread: u32,
    pub build_smoke_offset_y: f32,
    /// Maximum horizontal jitter of build smoke.
    pub build_smoke_scatter: i32,

    /// Seconds of invincibility after a non-lethal hit.
    pub invincibility_secs: f32,
    /// Seconds between death and the scene restart request.
    pub restart_delay_secs: f32,

    /// Sprite flash on power-ups.
    pub flash_from_scale: f32,
    pub flash_duration_secs: f32,
    pub flash_repeat: u32,
    /// Looping alpha pulse while star power is active.
    pub pulse_from_alpha: f32,
    pub pulse_duration_secs: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            initial_health: 1,
            max_jumps: 1,
            walk_speed: 200.0,
            boosted_walk_speed: 330.0,
            jump_velocity: 400.0,
            boosted_jump_velocity: 600.0,
            base_gravity: 100.0,
            jump_gravity: 400.0,
            fall_gravity: 700.0,
            body_width: 48.0,
            body_height: 60.0,
            hammer_offset: 32.0,
            hammer_size: 32.0,
            boosted_hammer_size: 128.0,
            block_offset: 64.0,
            block_raise: 128.0,
            jump_smoke_offset_y: 10.0,
            land_smoke_offset_y: 20.0,
            smoke_spread: 20,
            build_smoke_offset_y: 32.0,
            build_smoke_scatter: 20,
            invincibility_secs: 1.0,
            restart_delay_secs: 1.5,
            flash_from_scale: 1.2,
            flash_duration_secs: 0.05,
            flash_repeat: 10,
            pulse_from_alpha: 0.7,
            pulse_duration_secs: 0.3,
        }
    }
}

impl PlayerTuning {
    pub fn walk_speed_for(&self, state: &PlayerState) -> f32 {
        if state.empowered_walk {
            self.boosted_walk_speed
        } else {
            self.walk_speed
        }
    }

    pub fn jump_velocity_for(&self, state: &PlayerState) -> f32 {
        if state.empowered_jump {
            self.boosted_jump_velocity
        } else {
            self.jump_velocity
        }
    }

    pub fn hammer_size_for(&self, state: &PlayerState) -> f32 {
        if state.empowered_hammer {
            self.boosted_hammer_size
        } else {
            self.hammer_size
        }
    }

    /// Vertical offset of a built block relative to the player.
    pub fn block_offset_y_for(&self, state: &PlayerState) -> f32 {
        if state.empowered_jump {
            -self.block_raise
        } else {
            0.0
        }
    }
}
