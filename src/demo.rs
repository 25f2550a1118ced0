//! Headless driver pieces used by the binary.
//!
//! - [`parse_script`] reads a scripted input timeline such as
//!   `"10:+right, 40:jump, 70:-right, 90:prize=boots"`.
//! - [`ScriptDriver`] feeds that timeline into [`InputState`] and triggers the
//!   hit, kill and prize events at the scheduled ticks.
//! - [`flat_floor_physics`] is a stand-in body: gravity, velocity and a single
//!   floor line that produces the grounded feedback.
//! - [`log_collaborator_requests`] logs what the controller asked the audio,
//!   spawner and effect collaborators to do.
//!
//! # Script format
//!
//! Comma or newline separated `tick:action` items. Actions:
//!
//! | action | effect |
//! |---|---|
//! | `+left` / `-left`, `+right` / `-right` | hold / release a direction |
//! | `jump`, `build`, `attack` | press for one tick |
//! | `hit`, `kill` | damage or kill the player |
//! | `prize=<id>` | collect a prize (unknown ids are logged and ignored) |

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::effects::EffectCmd;
use crate::events::player::{PlayerHitEvent, PlayerKillEvent};
use crate::events::spawn::SpawnCmd;
use crate::resources::input::InputState;
use crate::resources::worldsignals::{ENTITY_PLAYER, WorldSignals};
use crate::resources::worldtime::WorldTime;
use crate::systems::prize::collect_prize_id;

/// Timeline used when no script is given.
pub const DEFAULT_SCRIPT: &str = "10:+right, 40:jump, 60:jump, 90:-right, 100:attack, \
    130:build, 160:prize=boots, 170:prize=coin, 180:jump, 240:hit, 320:prize=star, \
    330:hit, 360:+left, 400:-left, 420:kill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Build,
    Attack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Press(Key),
    Release(Key),
    Tap(Key),
    Hit,
    Kill,
    Prize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub tick: u64,
    pub action: ScriptAction,
}

fn parse_action(text: &str) -> Result<ScriptAction, String> {
    let held_key = |name: &str| match name {
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        other => Err(format!("'{}' cannot be held, use left or right", other)),
    };
    if let Some(name) = text.strip_prefix('+') {
        return held_key(name).map(ScriptAction::Press);
    }
    if let Some(name) = text.strip_prefix('-') {
        return held_key(name).map(ScriptAction::Release);
    }
    if let Some(id) = text.strip_prefix("prize=") {
        if id.is_empty() {
            return Err("prize needs an id".to_string());
        }
        return Ok(ScriptAction::Prize(id.to_string()));
    }
    match text {
        "jump" => Ok(ScriptAction::Tap(Key::Jump)),
        "build" => Ok(ScriptAction::Tap(Key::Build)),
        "attack" => Ok(ScriptAction::Tap(Key::Attack)),
        "hit" => Ok(ScriptAction::Hit),
        "kill" => Ok(ScriptAction::Kill),
        other => Err(format!("unknown action '{}'", other)),
    }
}

/// Parse a script into steps ordered by tick. Steps on the same tick keep
/// their written order.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, String> {
    let mut steps = Vec::new();
    for item in text.split([',', '\n']).map(str::trim) {
        if item.is_empty() || item.starts_with('#') {
            continue;
        }
        let (tick, action) = item
            .split_once(':')
            .ok_or_else(|| format!("'{}' is not tick:action", item))?;
        let tick = tick
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad tick in '{}': {}", item, e))?;
        let action = parse_action(action.trim()).map_err(|e| format!("'{}': {}", item, e))?;
        steps.push(ScriptStep { tick, action });
    }
    steps.sort_by_key(|step| step.tick);
    Ok(steps)
}

/// Plays a parsed script against a world, one tick at a time.
#[derive(Debug, Default)]
pub struct ScriptDriver {
    steps: Vec<ScriptStep>,
    cursor: usize,
    held: FxHashSet<Key>,
}

impl ScriptDriver {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            cursor: 0,
            held: FxHashSet::default(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Run every step scheduled up to `tick` and refresh [`InputState`].
    ///
    /// Call once per tick, before the update schedule.
    pub fn apply_tick(&mut self, world: &mut World, tick: u64) {
        let mut tapped: FxHashSet<Key> = FxHashSet::default();
        while let Some(step) = self.steps.get(self.cursor) {
            if step.tick > tick {
                break;
            }
            let action = step.action.clone();
            self.cursor += 1;
            match action {
                ScriptAction::Press(key) => {
                    self.held.insert(key);
                }
                ScriptAction::Release(key) => {
                    self.held.remove(&key);
                }
                ScriptAction::Tap(key) => {
                    tapped.insert(key);
                }
                ScriptAction::Hit => {
                    if let Some(player) = current_player(world) {
                        world.trigger(PlayerHitEvent { entity: player });
                    }
                }
                ScriptAction::Kill => {
                    if let Some(player) = current_player(world) {
                        world.trigger(PlayerKillEvent { entity: player });
                    }
                }
                ScriptAction::Prize(id) => {
                    if let Some(player) = current_player(world) {
                        collect_prize_id(world, player, &id);
                    }
                }
            }
        }

        let down = |key: Key| self.held.contains(&key) || tapped.contains(&key);
        let mut input = world.resource_mut::<InputState>();
        input.maindirection_left.update(down(Key::Left));
        input.maindirection_right.update(down(Key::Right));
        input.maindirection_up.update(down(Key::Jump));
        input.maindirection_down.update(down(Key::Build));
        input.action_1.update(down(Key::Attack));
        input.secondarydirection_left.update(false);
        input.secondarydirection_right.update(false);
        input.secondarydirection_up.update(false);
        input.secondarydirection_down.update(false);
    }
}

fn current_player(world: &World) -> Option<Entity> {
    let player = world.resource::<WorldSignals>().get_entity(ENTITY_PLAYER);
    if player.is_none() {
        warn!("No player in the scene, scripted event dropped");
    }
    player
}

/// Height of the only floor in the headless world. Bodies rest with their
/// bottom edge on it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FlatFloor {
    pub y: f32,
}

/// Integrate bodies under their forces and collide them with [`FlatFloor`].
///
/// Frozen or disabled bodies do not move and keep their last feedback.
pub fn flat_floor_physics(
    time: Res<WorldTime>,
    floor: Res<FlatFloor>,
    mut query: Query<(&mut MapPosition, &mut RigidBody)>,
) {
    let dt = time.delta;
    for (mut position, mut body) in query.iter_mut() {
        if body.frozen || !body.enabled {
            continue;
        }
        let acceleration = body.total_acceleration();
        body.velocity += acceleration * dt;
        position.pos += body.velocity * dt;

        let half_height = body.size.y * 0.5;
        if position.pos.y + half_height >= floor.y && body.velocity.y >= 0.0 {
            position.pos.y = floor.y - half_height;
            body.set_feedback(true, 0.0);
        } else {
            body.grounded = false;
        }
    }
}

pub fn log_collaborator_requests(
    mut audio_cmds: MessageReader<AudioCmd>,
    mut spawn_cmds: MessageReader<SpawnCmd>,
    mut effect_cmds: MessageReader<EffectCmd>,
    time: Res<WorldTime>,
) {
    let tick = time.frame_count;
    for cmd in audio_cmds.read() {
        info!("[{}] audio {:?}", tick, cmd);
    }
    for cmd in spawn_cmds.read() {
        match cmd {
            SpawnCmd::Smoke { particles } => {
                debug!("[{}] smoke x{} {:?}", tick, particles.len(), particles)
            }
            other => info!("[{}] spawn {:?}", tick, other),
        }
    }
    for cmd in effect_cmds.read() {
        info!("[{}] effect {:?}", tick, cmd);
    }
}
