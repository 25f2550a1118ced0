//! Player character state.
//!
//! [`PlayerState`] is the logical state of the player character: health,
//! facing, lifecycle, jump budget, motion phase and the flags raised by
//! building, damage and prizes. It is owned by exactly one entity and only
//! the controller systems and observers in [`crate::systems`] mutate it.
//!
//! The methods here are the pure half of the state machine: they change the
//! state and report what happened, and the systems turn that report into body,
//! animation and collaborator requests.
//!
//! # State machines
//!
//! - lifecycle: `Alive -> Dead` (terminal)
//! - motion: `Grounded <-> Jumping -> Falling -> Grounded`
//! - building: `false -> true -> false`
//!
//! # Related
//!
//! - [`crate::systems::player::player_controller`] – per-tick update
//! - [`crate::systems::damage`] – hit and death handling
//! - [`crate::systems::prize`] – prize application

use std::fmt;

use bevy_ecs::prelude::Component;

/// Horizontal direction the player last moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Alive,
    Dead,
}

/// Vertical movement phase, independent of the physics body's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    #[default]
    Grounded,
    Jumping,
    Falling,
}

impl MotionPhase {
    /// True while the player is in the air because of a jump.
    pub fn is_airborne(self) -> bool {
        matches!(self, MotionPhase::Jumping | MotionPhase::Falling)
    }
}

/// One-shot pickups the player can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prize {
    /// Raises walk speed.
    Speed,
    /// Enlarges the hammer hit volume.
    Hammer,
    /// Raises jump velocity.
    Boots,
    /// Adds a coin to the scene counter.
    Coin,
    /// Grants invincibility with no expiry.
    Star,
}

impl Prize {
    pub const ALL: [Prize; 5] = [
        Prize::Speed,
        Prize::Hammer,
        Prize::Boots,
        Prize::Coin,
        Prize::Star,
    ];

    /// Parse a prize identifier. Unknown identifiers return `None`.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "speed" => Some(Prize::Speed),
            "hammer" => Some(Prize::Hammer),
            "boots" => Some(Prize::Boots),
            "coin" => Some(Prize::Coin),
            "star" => Some(Prize::Star),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Prize::Speed => "speed",
            Prize::Hammer => "hammer",
            Prize::Boots => "boots",
            Prize::Coin => "coin",
            Prize::Star => "star",
        }
    }
}

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`PlayerState::take_hit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Dead or invincible; nothing changed.
    Ignored,
    /// Health dropped but the player survives. Carries the epoch of the
    /// invincibility window that was opened.
    Staggered { epoch: u32 },
    /// Health reached zero. The caller is expected to run the death sequence.
    Killed,
}

/// Collaborator request produced by [`PlayerState::apply_prize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrizeEffect {
    /// Flash the player sprite.
    Flash,
    /// Ask the scene to add a coin.
    IncrementCoins,
    /// Start the looping star pulse.
    Pulse,
}

/// Logical state of the player character.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Remaining hit points. Only ever decreases.
    pub health: u32,
    pub facing: Facing,
    pub lifecycle: Lifecycle,
    /// Jumps used since the last time the body touched the ground.
    pub jump_count: u32,
    pub max_jumps: u32,
    pub motion: MotionPhase,
    /// A hammer or build animation is in flight.
    pub building: bool,
    pub invincible: bool,
    /// Bumped every time invincibility is granted. Deferred clears carry the
    /// epoch they were scheduled for and are ignored once it is stale.
    pub invincibility_epoch: u32,
    pub empowered_jump: bool,
    pub empowered_walk: bool,
    pub empowered_hammer: bool,
    pub death_animation_started: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl PlayerState {
    pub fn new(health: u32, max_jumps: u32) -> Self {
        Self {
            health,
            facing: Facing::Right,
            lifecycle: Lifecycle::Alive,
            jump_count: 0,
            max_jumps,
            motion: MotionPhase::Grounded,
            building: false,
            invincible: false,
            invincibility_epoch: 0,
            empowered_jump: false,
            empowered_walk: false,
            empowered_hammer: false,
            death_animation_started: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    /// Whether the jump budget allows another jump.
    pub fn can_jump(&self) -> bool {
        !self.is_dead() && self.jump_count < self.max_jumps
    }

    /// Enter the Jumping phase and spend one jump.
    ///
    /// The first jump from the ground always sets the count to 1 so a lagging
    /// grounded flag cannot leave stale jumps in the budget. Returns false
    /// (and changes nothing) when the budget is exhausted.
    pub fn start_jump(&mut self, grounded: bool) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.building = false;
        self.motion = MotionPhase::Jumping;
        self.jump_count = if grounded { 1 } else { self.jump_count + 1 };
        true
    }

    /// Jumping -> Falling. Returns true on the transition.
    pub fn start_falling(&mut self) -> bool {
        if self.motion == MotionPhase::Jumping {
            self.motion = MotionPhase::Falling;
            true
        } else {
            false
        }
    }

    /// Back to Grounded. Returns true if the player was airborne from a jump.
    pub fn land(&mut self) -> bool {
        let was_airborne = self.motion.is_airborne();
        self.motion = MotionPhase::Grounded;
        was_airborne
    }

    pub fn reset_jumps(&mut self) {
        self.jump_count = 0;
    }

    /// Turn around without moving.
    pub fn turn(&mut self) {
        self.facing = self.facing.flipped();
    }

    /// Open a new invincibility window and return its epoch.
    pub fn grant_invincibility(&mut self) -> u32 {
        self.invincible = true;
        self.invincibility_epoch = self.invincibility_epoch.wrapping_add(1);
        self.invincibility_epoch
    }

    /// Close the invincibility window opened at `epoch`.
    ///
    /// Returns false when the player is dead or a newer window has been
    /// opened since.
    pub fn clear_invincibility(&mut self, epoch: u32) -> bool {
        if self.is_dead() || epoch != self.invincibility_epoch {
            return false;
        }
        self.invincible = false;
        true
    }

    /// Apply one point of damage.
    pub fn take_hit(&mut self) -> HitOutcome {
        if self.is_dead() || self.invincible {
            return HitOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            HitOutcome::Killed
        } else {
            HitOutcome::Staggered {
                epoch: self.grant_invincibility(),
            }
        }
    }

    /// Alive -> Dead. Returns false if the player was already dead.
    pub fn kill(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.lifecycle = Lifecycle::Dead;
        self.building = false;
        true
    }

    /// Apply a collected prize. Dead players collect nothing.
    pub fn apply_prize(&mut self, prize: Prize) -> Option<PrizeEffect> {
        if self.is_dead() {
            return None;
        }
        let effect = match prize {
            Prize::Speed => {
                self.empowered_walk = true;
                PrizeEffect::Flash
            }
            Prize::Hammer => {
                self.empowered_hammer = true;
                PrizeEffect::Flash
            }
            Prize::Boots => {
                self.empowered_jump = true;
                PrizeEffect::Flash
            }
            Prize::Coin => PrizeEffect::IncrementCoins,
            Prize::Star => {
                // No expiry. The grant opens a new epoch, so a clear task left
                // over from an earlier hit is stale and the star outlives it.
                self.grant_invincibility();
                PrizeEffect::Pulse
            }
        };
        Some(effect)
    }
}
