//! Random source for cosmetic effects.
//!
//! Smoke counts and offsets are the only randomness in the controller. They
//! draw from this resource so tests and the demo can run with a fixed seed.

use bevy_ecs::prelude::Resource;

#[derive(Resource)]
pub struct ControllerRng(pub fastrand::Rng);

impl Default for ControllerRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

impl ControllerRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}
