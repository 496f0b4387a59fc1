//! Enemy intention execution.

use tracing::debug;

use super::player::Player;
use super::vitals::CombatantId;
use super::{BattleContext, CombatEvent};
use crate::enemies::Enemy;

/// Carry out the enemy's selected intention.
///
/// Order: damage to the player, block to the enemy, card injected into the
/// player's draw pile, effect on the enemy, effect on the player.
/// Returns false when the enemy has no intention to perform.
pub fn perform_intention(
    slot: usize,
    enemy: &mut Enemy,
    player: &mut Player,
    ctx: &mut BattleContext<'_>,
) -> bool {
    let catalog = ctx.catalog;
    let Some(definition) = catalog.enemy(enemy.definition) else {
        debug!(slot, enemy = %enemy.definition, "Enemy definition missing");
        return false;
    };
    let (Some(index), Some(intention)) = (enemy.current_intention(), enemy.intention(definition))
    else {
        return false;
    };
    let Some(preview) = enemy.preview(definition, &player.vitals, catalog) else {
        return false;
    };

    ctx.events.push(CombatEvent::IntentionPerformed {
        enemy: slot,
        intention: index,
    });

    if !intention.preparing && intention.damage != 0 {
        ctx.hit(CombatantId::Player, &mut player.vitals, preview.damage);
    }
    ctx.block(CombatantId::Enemy(slot), &mut enemy.vitals, preview.block);

    if let Some(card) = intention.card_to_add {
        player.add_temporary_card(card, ctx.rng);
        ctx.events.push(CombatEvent::CardAddedToDraw { card });
    }
    if let Some(grant) = intention.gain_effect {
        ctx.apply_effect(CombatantId::Enemy(slot), &mut enemy.vitals, grant);
    }
    if let Some(grant) = intention.inflict_effect {
        ctx.apply_effect(CombatantId::Player, &mut player.vitals, grant);
    }
    true
}
