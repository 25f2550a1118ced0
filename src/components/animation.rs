//! Sprite animation playback state.
//!
//! [`Animation`] points at a definition in
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) by key
//! and tracks how far playback has advanced. The
//! [`animation`](crate::systems::animation::animation) system advances it and
//! triggers [`AnimationCompleteEvent`](crate::events::animation::AnimationCompleteEvent)
//! when a non-looping animation runs out of frames.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    pub animation_key: String,
    /// Frame offset from the definition's first frame.
    pub frame_index: usize,
    pub elapsed_time: f32,
    /// Completed extra passes of a repeating animation.
    pub repeats_done: u32,
    /// False once a non-looping animation has finished.
    pub playing: bool,
    /// Mirror the sprite horizontally.
    pub flip_h: bool,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
            repeats_done: 0,
            playing: true,
            flip_h: false,
        }
    }

    /// Start `key` from its first frame.
    ///
    /// With `ignore_if_playing` the call does nothing while `key` is already
    /// the running animation. Returns true if playback was (re)started.
    pub fn play(&mut self, key: &str, ignore_if_playing: bool) -> bool {
        if ignore_if_playing && self.is_playing(key) {
            return false;
        }
        self.animation_key.clear();
        self.animation_key.push_str(key);
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.repeats_done = 0;
        self.playing = true;
        true
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.playing && self.animation_key == key
    }
}
