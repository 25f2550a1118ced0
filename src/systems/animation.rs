//! Animation playback system.
//!
//! [`animation`] advances every playing [`Animation`] by the tick delta using
//! the definitions in [`AnimationStore`]. Looping animations wrap; repeating
//! ones replay `repeat` extra times; when a non-looping animation runs past
//! its last frame it stops on that frame and an [`AnimationCompleteEvent`] is
//! triggered.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions
//! - [`crate::systems::player::player_animation_complete_observer`] – reacts to completions

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::events::animation::AnimationCompleteEvent;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// A long tick may cover several frames; they are all applied at once.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up animation data from [`AnimationStore`]; unknown keys are skipped.
/// - Mutates [`Animation`] state and triggers [`AnimationCompleteEvent`].
pub fn animation(
    mut query: Query<(Entity, &mut Animation)>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim_comp) in query.iter_mut() {
        if !anim_comp.playing {
            continue;
        }
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };

        anim_comp.elapsed_time += time.delta;
        let frame_duration = animation.frame_duration();
        let steps = (anim_comp.elapsed_time / frame_duration).floor();
        if steps < 1.0 {
            continue;
        }
        anim_comp.elapsed_time %= frame_duration;

        if advance_frames(&mut anim_comp, animation, steps as usize) {
            // stay on last frame
            anim_comp.playing = false;
            anim_comp.elapsed_time = 0.0;
            commands.trigger(AnimationCompleteEvent {
                entity,
                key: anim_comp.animation_key.clone(),
            });
        }
    }
}

/// Move `anim` forward by `steps` frames. Returns true when a non-looping
/// animation ran past its last pass; `anim` is then left on the last frame.
///
/// Runs in constant time however large `steps` is.
fn advance_frames(anim: &mut Animation, def: &AnimationResource, steps: usize) -> bool {
    let frame_count = def.frame_count();
    let frame_index = anim.frame_index.min(frame_count - 1);
    if def.looped() {
        anim.frame_index = (frame_index + steps % frame_count) % frame_count;
        return false;
    }

    let total_repeats = def.repeat.max(0) as u32;
    let passes_left = total_repeats.saturating_sub(anim.repeats_done) as usize;
    let frames_left =
        (frame_count - 1 - frame_index).saturating_add(passes_left.saturating_mul(frame_count));
    if steps > frames_left {
        anim.frame_index = frame_count - 1;
        anim.repeats_done = total_repeats;
        return true;
    }
    let position = frame_index + steps;
    anim.repeats_done += (position / frame_count) as u32;
    anim.frame_index = position % frame_count;
    false
}

/// Sheet frame currently shown by `anim`, if its key is known.
pub fn current_frame(anim: &Animation, store: &AnimationStore) -> Option<usize> {
    store
        .get(&anim.animation_key)
        .map(|def| def.first_frame + anim.frame_index.min(def.frame_count() - 1))
}
