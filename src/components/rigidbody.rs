//! Physics body handle with named acceleration forces and contact feedback.
//!
//! The [`RigidBody`] component is the narrow surface between the player
//! controller and whatever physics body actually moves the entity. The
//! controller writes velocity and gravity requests into it; the physics side
//! writes back the contact feedback (`grounded`) and the resolved velocity.
//!
//! Gravity is stored as the named force [`GRAVITY_FORCE`] so it can be
//! switched between the jump and fall values without touching other forces.
//!
//! The `enabled`, `immovable` and `frozen` flags mirror the three ways a body
//! can be taken out of the simulation:
//! - `enabled == false` – the body ignores physics response (hit stagger)
//! - `immovable` – other bodies cannot push it
//! - `frozen` – the body does not integrate its own velocity (death)

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// Name of the force used as the body's gravity.
pub const GRAVITY_FORCE: &str = "gravity";

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity, named forces and contact feedback.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_size(48.0, 60.0);
/// rb.set_gravity(400.0);
/// rb.set_velocity_y(-400.0);
///
/// // physics side, after resolving collisions
/// rb.set_feedback(true, 0.0);
/// assert!(rb.is_grounded());
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Collision box size.
    pub size: Vec2,
    /// Set by the physics side when the body rests on something below it.
    pub grounded: bool,
    /// When false the body takes no part in physics response.
    pub enabled: bool,
    /// When true other bodies cannot push this one.
    pub immovable: bool,
    /// When true the body does not integrate its velocity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity, no forces and no size.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            forces: FxHashMap::default(),
            size: Vec2::ZERO,
            grounded: false,
            enabled: true,
            immovable: false,
            frozen: false,
        }
    }

    /// Create a RigidBody with the given collision box size.
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Self::new()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Get the value of a force by name.
    pub fn get_force(&self, name: &str) -> Option<&AccelerationForce> {
        self.forces.get(name)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec2::ZERO, |acc, force| acc + force.value)
    }

    /// Set the vertical gravity, creating the gravity force if missing.
    pub fn set_gravity(&mut self, gravity_y: f32) {
        self.add_force(GRAVITY_FORCE, Vec2::new(0.0, gravity_y));
    }

    /// Current vertical gravity, 0 when no gravity force exists.
    pub fn gravity(&self) -> f32 {
        self.get_force(GRAVITY_FORCE)
            .map(|f| f.value.y)
            .unwrap_or(0.0)
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Vertical velocity; negative is upward.
    pub fn vertical_velocity(&self) -> f32 {
        self.velocity.y
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Write back contact feedback from the physics side.
    pub fn set_feedback(&mut self, grounded: bool, vertical_velocity: f32) {
        self.grounded = grounded;
        self.velocity.y = vertical_velocity;
    }

    /// Freeze the rigid body, preventing it from integrating velocity.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}
