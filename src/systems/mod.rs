//! Controller systems.
//!
//! Submodules overview
//! - [`actions`] – hammer blow, block building and smoke requests
//! - [`animation`] – advance sprite animations and report completions
//! - [`damage`] – hit and death observers
//! - [`delayedtask`] – one-shot timers for invincibility and restart
//! - [`player`] – per-tick player controller and animation-complete observer
//! - [`prize`] – prize observer
//! - [`scene`] – apply scene requests, advance message queues
//! - [`time`] – update simulation time and delta

pub mod actions;
pub mod animation;
pub mod damage;
pub mod delayedtask;
pub mod player;
pub mod prize;
pub mod scene;
pub mod time;
