//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – definitions for sprite animations reused across entities
//! - `gameconfig` – INI-backed controller and simulation settings
//! - `input` – per-tick key state relevant to the controller
//! - `rng` – seeded random source for cosmetic effects
//! - `tuning` – speeds, gravities and action geometry of the player
//! - `worldsignals` – scene-level counters, flags and entities
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod gameconfig;
pub mod input;
pub mod rng;
pub mod tuning;
pub mod worldsignals;
pub mod worldtime;
