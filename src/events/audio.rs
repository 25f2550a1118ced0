//! Sound effect requests.
//!
//! The controller writes [`AudioCmd`] messages; whoever owns the audio device
//! reads them. Sound ids are the keys of the loaded effect bank.

use bevy_ecs::message::Message;

pub const SFX_JUMP: &str = "jump";
pub const SFX_LAND: &str = "land";
pub const SFX_BUILD: &str = "build";

/// Commands sent *to* the audio sink.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    PlayFx { id: String },
}

impl AudioCmd {
    pub fn play_fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}
