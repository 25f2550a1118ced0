//! Event and message types exchanged across systems.
//!
//! Triggered events (observers react immediately):
//! - [`animation`] – a non-looping animation finished
//! - [`player`] – hits, kills and prizes delivered to the player
//! - [`timer`] – a delayed task ran out
//!
//! Buffered messages (read by collaborators once per tick):
//! - [`audio`] – sound effect requests
//! - [`effects`] – sprite tween requests
//! - [`scene`] – coin and restart requests
//! - [`spawn`] – hit volumes, blocks and smoke
pub mod animation;
pub mod audio;
pub mod effects;
pub mod player;
pub mod scene;
pub mod spawn;
pub mod timer;
