//! Requests for the scene controller.
//!
//! Applied by [`apply_scene_cmds`](crate::systems::scene::apply_scene_cmds).

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCmd {
    IncrementCoins,
    RestartScene,
}
