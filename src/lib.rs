//! Walt player controller library.
//!
//! The player character of a 2D platformer as a bevy_ecs state machine:
//! movement, jumps, hammer blows, block building, damage and prizes. Physics,
//! audio, spawning, tweens and the scene are collaborators reached through
//! messages and events.
//!
//! This module exposes the components, resources, systems and events for use
//! in integration tests and by the headless driver.

pub mod components;
pub mod demo;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
