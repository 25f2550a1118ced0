//! World assembly and scene lifecycle.
//!
//! - [`init_world`] inserts every resource and message queue the controller
//!   needs, from a [`GameConfig`].
//! - [`setup_scene`] spawns the player and registers its observers.
//! - [`clean_scene`] despawns everything that is not [`Persistent`], which
//!   also deregisters the observers and cancels pending delayed tasks.
//! - [`build_update_schedule`] returns the per-tick controller schedule.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::player::PlayerState;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::effects::EffectCmd;
use crate::events::scene::SceneCmd;
use crate::events::spawn::SpawnCmd;
use crate::resources::animationstore::{ANIM_START_IDLE, AnimationStore};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::rng::ControllerRng;
use crate::resources::tuning::PlayerTuning;
use crate::resources::worldsignals::{ENTITY_PLAYER, FLAG_RESTART_SCENE, WorldSignals};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::damage::{player_hit_observer, player_kill_observer};
use crate::systems::delayedtask::{player_task_observer, update_delayed_tasks};
use crate::systems::player::{player_animation_complete_observer, player_controller};
use crate::systems::prize::player_prize_observer;
use crate::systems::scene::{apply_scene_cmds, update_messages};

/// Insert resources and message queues built from `config`.
///
/// Fails only when `config` names an animation file that cannot be loaded.
pub fn init_world(world: &mut World, config: &GameConfig) -> Result<(), String> {
    let store = match &config.animations_path {
        Some(path) => AnimationStore::load_from_file(&path.to_string_lossy())?,
        None => AnimationStore::walt_defaults(),
    };
    let rng = match config.seed {
        Some(seed) => ControllerRng::with_seed(seed),
        None => ControllerRng::default(),
    };

    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(InputState::default());
    world.insert_resource(config.tuning.clone());
    world.insert_resource(store);
    world.insert_resource(rng);
    world.insert_resource(config.clone());

    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<SpawnCmd>>();
    world.init_resource::<Messages<EffectCmd>>();
    world.init_resource::<Messages<SceneCmd>>();
    Ok(())
}

/// Spawn a player at `(x, y)` with body, animation and state from `tuning`.
pub fn spawn_player(world: &mut World, x: f32, y: f32, tuning: &PlayerTuning) -> Entity {
    let mut body = RigidBody::with_size(tuning.body_width, tuning.body_height);
    body.set_gravity(tuning.base_gravity);
    world
        .spawn((
            PlayerState::new(tuning.initial_health, tuning.max_jumps),
            body,
            Animation::new(ANIM_START_IDLE),
            MapPosition::new(x, y),
        ))
        .id()
}

/// Build the scene: one player at the configured spawn point plus the
/// observers that drive it. Returns the player entity.
pub fn setup_scene(world: &mut World) -> Entity {
    let (x, y) = {
        let config = world.resource::<GameConfig>();
        (config.spawn_x, config.spawn_y)
    };
    let tuning = world.resource::<PlayerTuning>().clone();
    let player = spawn_player(world, x, y, &tuning);

    world.spawn(Observer::new(player_hit_observer));
    world.spawn(Observer::new(player_kill_observer));
    world.spawn(Observer::new(player_prize_observer));
    world.spawn(Observer::new(player_animation_complete_observer));
    world.spawn(Observer::new(player_task_observer));
    // Ensure the observers are registered before anything triggers events.
    world.flush();

    world
        .resource_mut::<WorldSignals>()
        .set_entity(ENTITY_PLAYER, player);
    info!("Scene ready, player {:?} at ({}, {})", player, x, y);
    player
}

/// Despawn every entity that is not [`Persistent`].
pub fn clean_scene(world: &mut World) {
    let entities_to_despawn: Vec<Entity> = world
        .query_filtered::<Entity, Without<Persistent>>()
        .iter(world)
        .collect();
    let count = entities_to_despawn.len();
    for entity in entities_to_despawn {
        if !world.despawn(entity) {
            warn!("Entity {:?} already gone during scene cleanup", entity);
        }
    }
    {
        let mut signals = world.resource_mut::<WorldSignals>();
        signals.remove_entity(ENTITY_PLAYER);
        signals.clear_flag(FLAG_RESTART_SCENE);
    }
    world.resource_mut::<InputState>().release_all();
    info!("Scene cleaned, {} entities despawned", count);
}

/// Tear the scene down and build it again. Returns the new player entity.
pub fn restart_scene(world: &mut World) -> Entity {
    clean_scene(world);
    setup_scene(world)
}

/// Per-tick schedule: advance message queues, run the controller, advance
/// animations and delayed tasks, then apply scene requests.
///
/// Physics is not part of it; the owner of the body integrates after
/// [`player_controller`] and writes contact feedback for the next tick.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_messages::<AudioCmd>,
            update_messages::<SpawnCmd>,
            update_messages::<EffectCmd>,
            update_messages::<SceneCmd>,
        )
            .before(player_controller),
    );
    update.add_systems(
        (
            player_controller,
            animation,
            update_delayed_tasks,
            apply_scene_cmds,
        )
            .chain(),
    );
    update
}
