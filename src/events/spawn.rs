//! Requests for the entity spawner.
//!
//! The controller never creates world objects itself. It describes what it
//! wants with a [`SpawnCmd`] and the spawner decides how to build it.

use bevy_ecs::message::Message;
use glam::Vec2;
use smallvec::SmallVec;

/// Particle positions of one smoke burst. Bursts hold at most 14 particles.
pub type SmokeParticles = SmallVec<[Vec2; 16]>;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum SpawnCmd {
    /// Short-lived square damage volume in front of the player.
    HitVolume { pos: Vec2, size: Vec2 },
    /// Buildable block.
    Block { pos: Vec2 },
    /// Cosmetic smoke, one entry per particle.
    Smoke { particles: SmokeParticles },
}
