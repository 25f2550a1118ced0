//! Per-tick controller input resource.
//!
//! Captures the key state the player controller cares about and exposes it to
//! systems via the [`InputState`] resource. WASD drives the main directions and
//! the arrow keys the secondary ones; both sets are accepted for every
//! gesture. Space is the attack key.
//!
//! The owner of the real input device calls [`BoolState::update`] once per
//! tick with the raw "key is down" level; edges are derived from that.
use bevy_ecs::prelude::*;

/// Level and edge state of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key went down this tick.
    pub just_pressed: bool,
    /// Whether the key went up this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the key level for a new tick and recompute the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-tick key state relevant to the controller.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    // WASD
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Space
    pub action_1: BoolState,
}

impl InputState {
    /// Up or W went down this tick.
    pub fn jump_pressed(&self) -> bool {
        self.secondarydirection_up.just_pressed || self.maindirection_up.just_pressed
    }

    /// Down or S went down this tick.
    pub fn build_pressed(&self) -> bool {
        self.secondarydirection_down.just_pressed || self.maindirection_down.just_pressed
    }

    /// Space went down this tick.
    pub fn attack_pressed(&self) -> bool {
        self.action_1.just_pressed
    }

    pub fn right_held(&self) -> bool {
        self.secondarydirection_right.active || self.maindirection_right.active
    }

    pub fn left_held(&self) -> bool {
        self.secondarydirection_left.active || self.maindirection_left.active
    }

    /// Clear every level and edge.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
