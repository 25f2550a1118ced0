//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`animation`] – sprite animation playback state
//! - [`delayedtask`] – one-shot timer that fires a player task
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`persistent`] – marker for entities that persist across scene restarts
//! - [`player`] – logical state of the player character
//! - [`rigidbody`] – physics body handle with named forces and contact feedback

pub mod animation;
pub mod delayedtask;
pub mod mapposition;
pub mod persistent;
pub mod player;
pub mod rigidbody;
