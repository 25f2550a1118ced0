//! Scene controller.
//!
//! Applies [`SceneCmd`] messages to [`WorldSignals`]. The restart itself is
//! carried out by the owner of the world loop (see
//! [`crate::game::restart_scene`]) once it sees the flag.

use bevy_ecs::message::{Message, Messages};
use bevy_ecs::prelude::*;
use log::info;

use crate::events::scene::SceneCmd;
use crate::resources::worldsignals::{FLAG_RESTART_SCENE, SIGNAL_COINS, WorldSignals};

pub fn apply_scene_cmds(mut reader: MessageReader<SceneCmd>, mut signals: ResMut<WorldSignals>) {
    for cmd in reader.read() {
        match cmd {
            SceneCmd::IncrementCoins => {
                let coins = signals.add_integer(SIGNAL_COINS, 1);
                info!("Coins: {}", coins);
            }
            SceneCmd::RestartScene => {
                info!("Scene restart requested");
                signals.set_flag(FLAG_RESTART_SCENE);
            }
        }
    }
}

/// Advance the message queue for `T` so same-tick readers observe writes.
pub fn update_messages<T: Message>(mut msgs: ResMut<Messages<T>>) {
    msgs.update();
}
