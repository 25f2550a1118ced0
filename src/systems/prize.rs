//! Prize application.
//!
//! Power-ups flash the sprite, coins go to the scene counter and the star
//! starts a pulse that never ends on its own. Dead players collect nothing.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::player::{PlayerState, Prize, PrizeEffect};
use crate::events::effects::EffectCmd;
use crate::events::player::PrizeCollectedEvent;
use crate::events::scene::SceneCmd;
use crate::systems::actions::PlayerOutputs;

pub fn player_prize_observer(
    trigger: On<PrizeCollectedEvent>,
    mut query: Query<&mut PlayerState>,
    mut out: PlayerOutputs,
) {
    let PrizeCollectedEvent { entity, prize } = *trigger.event();
    let Ok(mut state) = query.get_mut(entity) else {
        return;
    };
    let Some(effect) = state.apply_prize(prize) else {
        info!("Prize {} ignored, player is dead", prize);
        return;
    };
    info!("Prize {} collected", prize);
    let tuning = &out.tuning;
    match effect {
        PrizeEffect::Flash => {
            let cmd = EffectCmd::Flash {
                entity,
                from_scale: tuning.flash_from_scale,
                to_scale: 1.0,
                duration: tuning.flash_duration_secs,
                repeat: tuning.flash_repeat,
            };
            out.effect_cmds.write(cmd);
        }
        PrizeEffect::IncrementCoins => {
            out.scene_cmds.write(SceneCmd::IncrementCoins);
        }
        PrizeEffect::Pulse => {
            let cmd = EffectCmd::Pulse {
                entity,
                from_alpha: tuning.pulse_from_alpha,
                to_alpha: 1.0,
                duration: tuning.pulse_duration_secs,
            };
            out.effect_cmds.write(cmd);
        }
    }
}

/// Turn a raw prize id into a [`PrizeCollectedEvent`].
///
/// Unknown ids are logged and dropped.
pub fn collect_prize_id(world: &mut World, entity: Entity, id: &str) -> Option<Prize> {
    let Some(prize) = Prize::parse(id) else {
        warn!("Unknown prize '{}' ignored", id);
        return None;
    };
    world.trigger(PrizeCollectedEvent { entity, prize });
    Some(prize)
}
