//! Player controller integration tests: per-tick update, actions, damage,
//! prizes, delayed tasks and scene restart.

use bevy_ecs::message::{Message, Messages};
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use waltplayer::components::animation::Animation;
use waltplayer::components::delayedtask::{DelayedTask, PlayerTask};
use waltplayer::components::mapposition::MapPosition;
use waltplayer::components::persistent::Persistent;
use waltplayer::components::player::{Facing, Lifecycle, MotionPhase, PlayerState, Prize};
use waltplayer::components::rigidbody::RigidBody;
use waltplayer::events::animation::AnimationCompleteEvent;
use waltplayer::events::audio::AudioCmd;
use waltplayer::events::effects::EffectCmd;
use waltplayer::events::player::{PlayerHitEvent, PlayerKillEvent, PrizeCollectedEvent};
use waltplayer::events::scene::SceneCmd;
use waltplayer::events::spawn::SpawnCmd;
use waltplayer::game::{build_update_schedule, init_world, restart_scene, setup_scene};
use waltplayer::resources::animationstore::{
    ANIM_BUILD, ANIM_DEAD, ANIM_GROUND, ANIM_HAMMER, ANIM_IDLE, ANIM_JUMP, ANIM_START_IDLE,
    ANIM_WALK,
};
use waltplayer::resources::gameconfig::GameConfig;
use waltplayer::resources::input::InputState;
use waltplayer::resources::worldsignals::{
    ENTITY_PLAYER, FLAG_RESTART_SCENE, SIGNAL_COINS, WorldSignals,
};
use waltplayer::systems::prize::collect_prize_id;
use waltplayer::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;
const SPAWN_X: f32 = 100.0;
const SPAWN_Y: f32 = 270.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Clone, Copy)]
struct Keys {
    left: bool,
    right: bool,
    jump: bool,
    build: bool,
    attack: bool,
}

const NO_KEYS: Keys = Keys {
    left: false,
    right: false,
    jump: false,
    build: false,
    attack: false,
};

fn make_world_with(health: u32, max_jumps: u32) -> (World, Schedule, Entity) {
    let mut config = GameConfig::new();
    config.seed = Some(7);
    config.tuning.initial_health = health;
    config.tuning.max_jumps = max_jumps;
    let mut world = World::new();
    init_world(&mut world, &config).unwrap();
    let player = setup_scene(&mut world);
    (world, build_update_schedule(), player)
}

fn make_world() -> (World, Schedule, Entity) {
    make_world_with(1, 1)
}

fn feed(world: &mut World, keys: Keys) {
    let mut input = world.resource_mut::<InputState>();
    input.maindirection_left.update(keys.left);
    input.maindirection_right.update(keys.right);
    input.maindirection_up.update(keys.jump);
    input.maindirection_down.update(keys.build);
    input.action_1.update(keys.attack);
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32, keys: Keys) {
    update_world_time(world, dt);
    feed(world, keys);
    schedule.run(world);
}

fn set_feedback(world: &mut World, player: Entity, grounded: bool, vy: f32) {
    world
        .get_mut::<RigidBody>(player)
        .unwrap()
        .set_feedback(grounded, vy);
}

fn drain<T: Message + Clone>(world: &mut World) -> Vec<T> {
    let mut state = SystemState::<MessageReader<T>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

fn flush_messages(world: &mut World) {
    for _ in 0..2 {
        world.resource_mut::<Messages<AudioCmd>>().update();
        world.resource_mut::<Messages<SpawnCmd>>().update();
        world.resource_mut::<Messages<EffectCmd>>().update();
        world.resource_mut::<Messages<SceneCmd>>().update();
    }
}

fn sounds(world: &mut World) -> Vec<String> {
    drain::<AudioCmd>(world)
        .into_iter()
        .map(|cmd| match cmd {
            AudioCmd::PlayFx { id } => id,
        })
        .collect()
}

fn state(world: &World, player: Entity) -> &PlayerState {
    world.get::<PlayerState>(player).unwrap()
}

fn body(world: &World, player: Entity) -> &RigidBody {
    world.get::<RigidBody>(player).unwrap()
}

fn anim_key(world: &World, player: Entity) -> String {
    world.get::<Animation>(player).unwrap().animation_key.clone()
}

fn restart_tasks(world: &mut World) -> usize {
    world
        .query::<&DelayedTask>()
        .iter(world)
        .filter(|task| task.task == PlayerTask::RestartScene)
        .count()
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn spawned_player_has_initial_state() {
    let (world, _schedule, player) = make_world_with(3, 2);
    let s = state(&world, player);
    assert_eq!(s.health, 3);
    assert_eq!(s.max_jumps, 2);
    assert_eq!(s.facing, Facing::Right);
    assert_eq!(s.lifecycle, Lifecycle::Alive);
    assert_eq!(s.motion, MotionPhase::Grounded);
    assert!(!s.building && !s.invincible);

    let b = body(&world, player);
    assert!(approx_eq(b.size.x, 48.0));
    assert!(approx_eq(b.size.y, 60.0));
    assert!(approx_eq(b.gravity(), 100.0));
    assert!(b.enabled);

    assert_eq!(anim_key(&world, player), ANIM_START_IDLE);
    let pos = world.get::<MapPosition>(player).unwrap();
    assert!(approx_eq(pos.pos.x, SPAWN_X) && approx_eq(pos.pos.y, SPAWN_Y));
    assert_eq!(
        world.resource::<WorldSignals>().get_entity(ENTITY_PLAYER),
        Some(player)
    );
}

// =============================================================================
// Jumping and falling
// =============================================================================

#[test]
fn grounded_jump_launches_and_lands_on_stale_feedback() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });

    let b = body(&world, player);
    assert!(approx_eq(b.vertical_velocity(), -400.0));
    assert!(approx_eq(b.gravity(), 400.0));
    // The grounded flag still describes the previous physics step, so the
    // stop branch lands the player in the same tick and the budget resets.
    let s = state(&world, player);
    assert_eq!(s.motion, MotionPhase::Grounded);
    assert_eq!(s.jump_count, 0);
    assert_eq!(sounds(&mut world), vec!["jump", "land"]);
    assert_eq!(anim_key(&world, player), ANIM_IDLE);

    let bursts: Vec<_> = drain::<SpawnCmd>(&mut world)
        .into_iter()
        .filter_map(|cmd| match cmd {
            SpawnCmd::Smoke { particles } => Some(particles),
            _ => None,
        })
        .collect();
    assert_eq!(bursts.len(), 2);
    for (burst, offset_y) in bursts.iter().zip([10.0, 20.0]) {
        assert!((3..=6).contains(&burst.len()));
        for p in burst {
            assert!(approx_eq(p.y, SPAWN_Y + offset_y));
            assert!((p.x - SPAWN_X).abs() <= 20.0);
        }
    }
}

#[test]
fn running_jump_keeps_jumping_phase() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);

    tick(
        &mut world,
        &mut schedule,
        0.016,
        Keys { jump: true, right: true, ..NO_KEYS },
    );

    let s = state(&world, player);
    assert_eq!(s.motion, MotionPhase::Jumping);
    assert_eq!(s.jump_count, 0);
    assert_eq!(sounds(&mut world), vec!["jump"]);
    assert_eq!(anim_key(&world, player), ANIM_WALK);
    assert!(approx_eq(body(&world, player).velocity.x, 200.0));
}

#[test]
fn air_jumps_respect_budget() {
    let (mut world, mut schedule, player) = make_world_with(1, 2);
    set_feedback(&mut world, player, false, -100.0);

    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });
    assert_eq!(state(&world, player).jump_count, 1);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });
    assert_eq!(state(&world, player).jump_count, 2);

    set_feedback(&mut world, player, false, -50.0);
    flush_messages(&mut world);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });

    assert_eq!(state(&world, player).jump_count, 2);
    assert!(approx_eq(body(&world, player).vertical_velocity(), -50.0));
    assert!(sounds(&mut world).is_empty());
}

#[test]
fn boots_raise_jump_velocity() {
    let (mut world, mut schedule, player) = make_world();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Boots,
    });
    set_feedback(&mut world, player, false, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });

    assert!(approx_eq(body(&world, player).vertical_velocity(), -600.0));
}

#[test]
fn apex_switches_to_falling_gravity() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, false, 0.0);
    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });
    assert_eq!(state(&world, player).motion, MotionPhase::Jumping);

    set_feedback(&mut world, player, false, -10.0);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    assert_eq!(state(&world, player).motion, MotionPhase::Jumping);
    assert!(approx_eq(body(&world, player).gravity(), 400.0));

    set_feedback(&mut world, player, false, 0.0);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    assert_eq!(state(&world, player).motion, MotionPhase::Falling);
    assert!(approx_eq(body(&world, player).gravity(), 700.0));
}

#[test]
fn landing_plays_sound_smoke_and_idle() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, false, 0.0);
    tick(&mut world, &mut schedule, 0.016, Keys { jump: true, ..NO_KEYS });
    set_feedback(&mut world, player, false, 50.0);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    assert_eq!(state(&world, player).motion, MotionPhase::Falling);

    flush_messages(&mut world);
    set_feedback(&mut world, player, true, 0.0);
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);

    let s = state(&world, player);
    assert_eq!(s.motion, MotionPhase::Grounded);
    assert_eq!(s.jump_count, 0);
    assert_eq!(sounds(&mut world), vec!["land"]);
    assert_eq!(anim_key(&world, player), ANIM_IDLE);
    let smoke = drain::<SpawnCmd>(&mut world);
    assert_eq!(smoke.len(), 1);
    let SpawnCmd::Smoke { particles } = &smoke[0] else {
        panic!("expected smoke");
    };
    assert!(particles.iter().all(|p| approx_eq(p.y, SPAWN_Y + 20.0)));
}

// =============================================================================
// Walking
// =============================================================================

#[test]
fn walking_right_on_ground_resets_jumps() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);
    world.get_mut::<PlayerState>(player).unwrap().jump_count = 1;

    tick(&mut world, &mut schedule, 0.016, Keys { right: true, ..NO_KEYS });

    let s = state(&world, player);
    assert_eq!(s.jump_count, 0);
    assert_eq!(s.facing, Facing::Right);
    assert_eq!(anim_key(&world, player), ANIM_WALK);
    assert!(approx_eq(body(&world, player).velocity.x, 200.0));
    assert!(!world.get::<Animation>(player).unwrap().flip_h);
}

#[test]
fn walking_left_with_speed_prize_flips_sprite() {
    let (mut world, mut schedule, player) = make_world();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Speed,
    });
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { left: true, ..NO_KEYS });

    assert_eq!(state(&world, player).facing, Facing::Left);
    assert!(approx_eq(body(&world, player).velocity.x, -330.0));
    assert!(world.get::<Animation>(player).unwrap().flip_h);
}

#[test]
fn right_wins_when_both_directions_held() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);
    tick(
        &mut world,
        &mut schedule,
        0.016,
        Keys { left: true, right: true, ..NO_KEYS },
    );
    assert_eq!(state(&world, player).facing, Facing::Right);
    assert!(approx_eq(body(&world, player).velocity.x, 200.0));
}

#[test]
fn releasing_direction_stops_even_in_air() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, false, 30.0);
    tick(&mut world, &mut schedule, 0.016, Keys { right: true, ..NO_KEYS });
    assert!(approx_eq(body(&world, player).velocity.x, 200.0));
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    assert!(approx_eq(body(&world, player).velocity.x, 0.0));
}

// =============================================================================
// Hammer and build
// =============================================================================

#[test]
fn hammer_blow_spawns_hit_volume_in_facing_direction() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);
    world.get_mut::<PlayerState>(player).unwrap().turn();

    tick(&mut world, &mut schedule, 0.016, Keys { attack: true, ..NO_KEYS });

    assert!(state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_HAMMER);
    let spawns = drain::<SpawnCmd>(&mut world);
    assert_eq!(spawns.len(), 1);
    let SpawnCmd::HitVolume { pos, size } = spawns[0] else {
        panic!("expected hit volume");
    };
    assert!(approx_eq(pos.x, SPAWN_X - 32.0));
    assert!(approx_eq(pos.y, SPAWN_Y));
    assert!(approx_eq(size.x, 32.0) && approx_eq(size.y, 32.0));
}

#[test]
fn mjolnir_enlarges_hit_volume() {
    let (mut world, mut schedule, player) = make_world();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Hammer,
    });
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { attack: true, ..NO_KEYS });

    let hit = drain::<SpawnCmd>(&mut world)
        .into_iter()
        .find_map(|cmd| match cmd {
            SpawnCmd::HitVolume { pos, size } => Some((pos, size)),
            _ => None,
        })
        .unwrap();
    assert!(approx_eq(hit.0.x, SPAWN_X + 32.0));
    assert!(approx_eq(hit.1.x, 128.0));
}

#[test]
fn build_block_places_block_and_smoke() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { build: true, ..NO_KEYS });

    assert!(state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_BUILD);
    assert_eq!(sounds(&mut world), vec!["build"]);

    let spawns = drain::<SpawnCmd>(&mut world);
    assert_eq!(spawns.len(), 2);
    let SpawnCmd::Smoke { particles } = &spawns[0] else {
        panic!("expected smoke first");
    };
    assert!((8..=14).contains(&particles.len()));
    for p in particles {
        assert!(p.x >= SPAWN_X + 44.0 && p.x <= SPAWN_X + 84.0);
        assert!(approx_eq(p.y, SPAWN_Y + 32.0));
    }
    let SpawnCmd::Block { pos } = spawns[1] else {
        panic!("expected block");
    };
    assert!(approx_eq(pos.x, SPAWN_X + 64.0));
    assert!(approx_eq(pos.y, SPAWN_Y));
}

#[test]
fn boots_raise_built_block() {
    let (mut world, mut schedule, player) = make_world();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Boots,
    });
    world.get_mut::<PlayerState>(player).unwrap().turn();
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.016, Keys { build: true, ..NO_KEYS });

    let block = drain::<SpawnCmd>(&mut world)
        .into_iter()
        .find_map(|cmd| match cmd {
            SpawnCmd::Block { pos } => Some(pos),
            _ => None,
        })
        .unwrap();
    assert!(approx_eq(block.x, SPAWN_X - 64.0));
    assert!(approx_eq(block.y, SPAWN_Y - 128.0));
}

#[test]
fn hammer_completion_clears_building_and_returns_to_idle() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.1, Keys { attack: true, ..NO_KEYS });
    assert!(state(&world, player).building);
    tick(&mut world, &mut schedule, 0.1, NO_KEYS);

    assert!(!state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_IDLE);
}

#[test]
fn hammer_completion_in_air_returns_to_jump() {
    let (mut world, mut schedule, player) = make_world();
    world.get_mut::<PlayerState>(player).unwrap().motion = MotionPhase::Falling;
    set_feedback(&mut world, player, false, 100.0);

    tick(&mut world, &mut schedule, 0.1, Keys { attack: true, ..NO_KEYS });
    tick(&mut world, &mut schedule, 0.1, NO_KEYS);

    assert!(!state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_JUMP);
}

#[test]
fn build_animation_repeats_before_completing() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);

    tick(&mut world, &mut schedule, 0.1, Keys { build: true, ..NO_KEYS });
    for _ in 0..4 {
        tick(&mut world, &mut schedule, 0.1, NO_KEYS);
    }
    assert!(state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_BUILD);

    tick(&mut world, &mut schedule, 0.1, NO_KEYS);
    assert!(!state(&world, player).building);
    assert_eq!(anim_key(&world, player), ANIM_IDLE);
}

#[test]
fn walking_cancels_building() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);
    tick(&mut world, &mut schedule, 0.016, Keys { build: true, ..NO_KEYS });
    assert!(state(&world, player).building);
    tick(&mut world, &mut schedule, 0.016, Keys { right: true, ..NO_KEYS });
    assert!(!state(&world, player).building);
}

#[test]
fn ground_completion_plays_idle() {
    let (mut world, _schedule, player) = make_world();
    world.trigger(AnimationCompleteEvent {
        entity: player,
        key: ANIM_GROUND.to_string(),
    });
    assert_eq!(anim_key(&world, player), ANIM_IDLE);
}

// =============================================================================
// Damage and death
// =============================================================================

#[test]
fn hit_with_one_health_kills() {
    let (mut world, _schedule, player) = make_world_with(1, 1);
    world.trigger(PlayerHitEvent { entity: player });

    let s = state(&world, player);
    assert_eq!(s.health, 0);
    assert_eq!(s.lifecycle, Lifecycle::Dead);
    assert_eq!(anim_key(&world, player), ANIM_DEAD);
    let b = body(&world, player);
    assert!(b.immovable && b.frozen);
    assert_eq!(restart_tasks(&mut world), 1);
}

#[test]
fn hit_staggers_then_invincibility_expires() {
    let (mut world, mut schedule, player) = make_world_with(2, 1);
    world.trigger(PlayerHitEvent { entity: player });

    let s = state(&world, player);
    assert_eq!(s.health, 1);
    assert!(s.invincible);
    assert_eq!(s.lifecycle, Lifecycle::Alive);
    assert!(!body(&world, player).enabled);
    assert_eq!(anim_key(&world, player), ANIM_DEAD);

    world.trigger(PlayerHitEvent { entity: player });
    assert_eq!(state(&world, player).health, 1);

    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.25, NO_KEYS);
    }
    assert!(state(&world, player).invincible);
    tick(&mut world, &mut schedule, 0.25, NO_KEYS);
    assert!(!state(&world, player).invincible);
    assert!(body(&world, player).enabled);
    assert_eq!(world.query::<&DelayedTask>().iter(&world).count(), 0);
}

#[test]
fn death_requests_restart_after_delay() {
    let (mut world, mut schedule, player) = make_world_with(1, 1);
    world.trigger(PlayerKillEvent { entity: player });

    tick(&mut world, &mut schedule, 0.5, NO_KEYS);
    tick(&mut world, &mut schedule, 0.5, NO_KEYS);
    assert!(!world.resource::<WorldSignals>().has_flag(FLAG_RESTART_SCENE));
    tick(&mut world, &mut schedule, 0.5, NO_KEYS);
    assert!(world.resource::<WorldSignals>().has_flag(FLAG_RESTART_SCENE));
}

#[test]
fn dying_twice_restarts_once() {
    let (mut world, mut schedule, player) = make_world_with(1, 1);
    world.trigger(PlayerKillEvent { entity: player });
    world.trigger(PlayerKillEvent { entity: player });
    world.trigger(PlayerHitEvent { entity: player });
    assert_eq!(restart_tasks(&mut world), 1);

    let mut restarts = 0;
    for _ in 0..10 {
        tick(&mut world, &mut schedule, 0.5, NO_KEYS);
        restarts += drain::<SceneCmd>(&mut world)
            .into_iter()
            .filter(|cmd| *cmd == SceneCmd::RestartScene)
            .count();
        flush_messages(&mut world);
    }
    assert_eq!(restarts, 1);
}

#[test]
fn dead_player_ignores_input() {
    let (mut world, mut schedule, player) = make_world();
    set_feedback(&mut world, player, true, 0.0);
    world.trigger(PlayerKillEvent { entity: player });
    flush_messages(&mut world);

    tick(
        &mut world,
        &mut schedule,
        0.016,
        Keys { jump: true, right: true, left: false, attack: true, build: true },
    );

    let s = state(&world, player);
    assert!(s.death_animation_started);
    assert_eq!(s.jump_count, 0);
    assert!(!s.building);
    assert_eq!(anim_key(&world, player), ANIM_DEAD);
    assert!(approx_eq(body(&world, player).velocity.x, 0.0));
    assert!(sounds(&mut world).is_empty());
    assert!(drain::<SpawnCmd>(&mut world).is_empty());
}

#[test]
fn invincibility_timer_after_death_changes_nothing() {
    let (mut world, mut schedule, player) = make_world_with(2, 1);
    world.trigger(PlayerHitEvent { entity: player });
    world.trigger(PlayerKillEvent { entity: player });

    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.25, NO_KEYS);
    }
    let s = state(&world, player);
    assert!(s.is_dead());
    assert!(s.invincible);
    assert!(!body(&world, player).enabled);
}

#[test]
fn star_outlives_hit_invincibility_timer() {
    let (mut world, mut schedule, player) = make_world_with(3, 1);
    world.trigger(PlayerHitEvent { entity: player });
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Star,
    });

    for _ in 0..8 {
        tick(&mut world, &mut schedule, 0.25, NO_KEYS);
    }
    assert!(state(&world, player).invincible);
    assert!(body(&world, player).enabled);

    world.trigger(PlayerHitEvent { entity: player });
    assert_eq!(state(&world, player).health, 2);
}

// =============================================================================
// Prizes
// =============================================================================

#[test]
fn coin_increments_scene_counter_only() {
    let (mut world, mut schedule, player) = make_world();
    let before = state(&world, player).clone();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Coin,
    });
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Coin,
    });
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);

    assert_eq!(
        world.resource::<WorldSignals>().get_integer(SIGNAL_COINS),
        Some(2)
    );
    let after = state(&world, player);
    assert_eq!(after.empowered_jump, before.empowered_jump);
    assert_eq!(after.invincible, before.invincible);
    assert_eq!(after.health, before.health);
}

#[test]
fn power_ups_request_flash_and_star_requests_pulse() {
    let (mut world, _schedule, player) = make_world();
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Speed,
    });
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Star,
    });

    let effects = drain::<EffectCmd>(&mut world);
    assert_eq!(effects.len(), 2);
    match effects[0] {
        EffectCmd::Flash {
            entity,
            from_scale,
            to_scale,
            duration,
            repeat,
        } => {
            assert_eq!(entity, player);
            assert!(approx_eq(from_scale, 1.2));
            assert!(approx_eq(to_scale, 1.0));
            assert!(approx_eq(duration, 0.05));
            assert_eq!(repeat, 10);
        }
        ref other => panic!("expected flash, got {:?}", other),
    }
    match effects[1] {
        EffectCmd::Pulse {
            entity,
            from_alpha,
            to_alpha,
            duration,
        } => {
            assert_eq!(entity, player);
            assert!(approx_eq(from_alpha, 0.7));
            assert!(approx_eq(to_alpha, 1.0));
            assert!(approx_eq(duration, 0.3));
        }
        ref other => panic!("expected pulse, got {:?}", other),
    }
    assert!(state(&world, player).invincible);
}

#[test]
fn unknown_prize_id_is_ignored() {
    let (mut world, _schedule, player) = make_world();
    let before = state(&world, player).clone();
    assert_eq!(collect_prize_id(&mut world, player, "mushroom"), None);
    assert_eq!(collect_prize_id(&mut world, player, "boots"), Some(Prize::Boots));
    let after = state(&world, player);
    assert!(after.empowered_jump);
    assert_eq!(after.health, before.health);
    assert_eq!(drain::<EffectCmd>(&mut world).len(), 1);
}

#[test]
fn dead_player_collects_nothing() {
    let (mut world, _schedule, player) = make_world();
    world.trigger(PlayerKillEvent { entity: player });
    world.trigger(PrizeCollectedEvent {
        entity: player,
        prize: Prize::Coin,
    });
    assert!(drain::<SceneCmd>(&mut world).is_empty());
}

// =============================================================================
// Scene lifecycle
// =============================================================================

#[test]
fn restart_rebuilds_player_and_observers_once() {
    let (mut world, mut schedule, player) = make_world();
    world.trigger(PlayerKillEvent { entity: player });
    for _ in 0..3 {
        tick(&mut world, &mut schedule, 0.5, NO_KEYS);
    }
    assert!(world.resource::<WorldSignals>().has_flag(FLAG_RESTART_SCENE));

    let new_player = restart_scene(&mut world);

    assert!(world.get_entity(player).is_err());
    assert!(!world.resource::<WorldSignals>().has_flag(FLAG_RESTART_SCENE));
    assert_eq!(world.query::<&PlayerState>().iter(&world).count(), 1);
    assert_eq!(state(&world, new_player).lifecycle, Lifecycle::Alive);

    world.trigger(PrizeCollectedEvent {
        entity: new_player,
        prize: Prize::Coin,
    });
    tick(&mut world, &mut schedule, 0.016, NO_KEYS);
    assert_eq!(
        world.resource::<WorldSignals>().get_integer(SIGNAL_COINS),
        Some(1)
    );
}

#[test]
fn restart_cancels_pending_tasks() {
    let (mut world, _schedule, player) = make_world_with(2, 1);
    world.trigger(PlayerHitEvent { entity: player });
    assert_eq!(world.query::<&DelayedTask>().iter(&world).count(), 1);
    restart_scene(&mut world);
    assert_eq!(world.query::<&DelayedTask>().iter(&world).count(), 0);
}

#[test]
fn restart_keeps_persistent_entities() {
    let (mut world, _schedule, _player) = make_world();
    let hud = world.spawn((Persistent, MapPosition::new(0.0, 0.0))).id();
    restart_scene(&mut world);
    assert!(world.get_entity(hud).is_ok());
}

// =============================================================================
// Invariants under random play
// =============================================================================

#[test]
fn random_play_keeps_invariants() {
    let (mut world, mut schedule, player) = make_world_with(4, 2);
    let mut rng = fastrand::Rng::with_seed(1234);
    let mut previous_health = state(&world, player).health;

    for _ in 0..2000 {
        let grounded = rng.bool();
        let vy = rng.f32() * 800.0 - 400.0;
        set_feedback(&mut world, player, grounded, vy);
        if rng.u32(0..50) == 0 {
            world.trigger(PlayerHitEvent { entity: player });
        }
        let keys = Keys {
            left: rng.bool(),
            right: rng.bool(),
            jump: rng.bool(),
            build: rng.u32(0..10) == 0,
            attack: rng.u32(0..10) == 0,
        };
        tick(&mut world, &mut schedule, 0.016, keys);

        let s = state(&world, player);
        assert!(s.jump_count <= s.max_jumps);
        if grounded && !s.is_dead() {
            assert_eq!(s.jump_count, 0);
        }
        assert!(s.health <= previous_health);
        if s.health == 0 {
            assert!(s.is_dead());
        }
        if s.is_dead() {
            assert!(!s.building);
        }
        previous_health = s.health;
        flush_messages(&mut world);
    }
}
