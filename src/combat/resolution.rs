//! Card play resolution.
//!
//! `play_card` validates and pays for a play, moves the card out of the
//! hand, then hands off to `resolve_card` which applies the definition.

use super::player::Player;
use super::vitals::CombatantId;
use super::{BattleContext, CombatEvent};
use crate::cards::{CardDefinition, TargetMode};
use crate::core::{EntityId, PlayError};
use crate::effects::{resolve_damage, ModifierKind};
use crate::enemies::Enemy;

/// Play a card from hand against an optional enemy slot.
///
/// Rejections happen before anything is mutated: a card not in hand, a
/// card the player cannot afford, or a single-target card without a living
/// target. Exhausting cards leave play; the rest go to the discard pile.
pub fn play_card(
    player: &mut Player,
    enemies: &mut [Enemy],
    card: EntityId,
    target: Option<usize>,
    ctx: &mut BattleContext<'_>,
) -> Result<(), PlayError> {
    let catalog = ctx.catalog;
    let instance = *player
        .piles()
        .in_hand(card)
        .ok_or(PlayError::NotInHand(card))?;
    let definition = catalog
        .card(instance.card_id)
        .ok_or(PlayError::Unplayable(instance.card_id))?;

    if player.current_energy < definition.cost {
        return Err(PlayError::InsufficientEnergy {
            cost: definition.cost,
            available: player.current_energy,
        });
    }
    if definition.needs_target()
        && !target
            .and_then(|slot| enemies.get(slot))
            .is_some_and(Enemy::is_alive)
    {
        return Err(PlayError::InvalidTarget);
    }

    player.current_energy -= definition.cost;
    let piles = player.piles_mut();
    piles.remove_from_hand(card);
    if !definition.exhaust {
        piles.discard(instance);
    }

    ctx.events.push(CombatEvent::CardPlayed {
        entity: card,
        card: instance.card_id,
        attack_type: definition.attack_type,
    });
    resolve_card(definition, target, player, enemies, ctx);
    Ok(())
}

/// Apply a card definition: damage step by target mode, then block,
/// healing, draws, energy and the self-applied effect.
///
/// Area cards skip enemies that are already dead and only inflict their
/// effect on enemies that survive the hits.
pub fn resolve_card(
    definition: &CardDefinition,
    target: Option<usize>,
    player: &mut Player,
    enemies: &mut [Enemy],
    ctx: &mut BattleContext<'_>,
) {
    match definition.target_mode {
        TargetMode::One => {
            if let Some(slot) = target {
                if let Some(enemy) = enemies.get_mut(slot) {
                    strike(definition, player, slot, enemy, ctx);
                    if let Some(grant) = definition.inflict_effect {
                        ctx.apply_effect(CombatantId::Enemy(slot), &mut enemy.vitals, grant);
                    }
                }
            }
        }
        TargetMode::All => {
            for (slot, enemy) in enemies.iter_mut().enumerate() {
                if !enemy.is_alive() {
                    continue;
                }
                strike(definition, player, slot, enemy, ctx);
                if let (Some(grant), true) = (definition.inflict_effect, enemy.is_alive()) {
                    ctx.apply_effect(CombatantId::Enemy(slot), &mut enemy.vitals, grant);
                }
            }
        }
        TargetMode::SelfTarget | TargetMode::None => {}
    }

    if definition.block != 0 {
        let block = player
            .vitals
            .effects
            .modify(definition.block, ModifierKind::Block, ctx.catalog);
        ctx.block(CombatantId::Player, &mut player.vitals, block);
    }

    if definition.restore_hp > 0 {
        ctx.heal(CombatantId::Player, &mut player.vitals, definition.restore_hp);
    }

    for _ in 0..definition.cards_drawn {
        player.draw_card(ctx.rng);
    }

    if definition.energy_gain != 0 {
        player.gain_energy(definition.energy_gain);
        ctx.events.push(CombatEvent::EnergyGained {
            amount: definition.energy_gain,
        });
    }

    if let Some(grant) = definition.gain_effect {
        ctx.apply_effect(CombatantId::Player, &mut player.vitals, grant);
    }
}

/// Damage computed once through both modifier passes, then dealt
/// `num_hits` times.
fn strike(
    definition: &CardDefinition,
    player: &Player,
    slot: usize,
    enemy: &mut Enemy,
    ctx: &mut BattleContext<'_>,
) {
    let damage = resolve_damage(
        definition.damage,
        &player.vitals.effects,
        &enemy.vitals.effects,
        ctx.catalog,
    );
    let was_alive = enemy.is_alive();
    for _ in 0..definition.num_hits {
        ctx.hit(CombatantId::Enemy(slot), &mut enemy.vitals, damage);
    }
    if was_alive && !enemy.is_alive() {
        ctx.events.push(CombatEvent::EnemyDefeated { enemy: slot });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardType};
    use crate::catalog::Catalog;
    use crate::combat::EventLog;
    use crate::core::{GameRng, RunConfig};
    use crate::effects::{EffectDefinition, EffectGrant, EffectId, EffectType, StackType};
    use crate::enemies::{EnemyDefinition, Intention, IntentionMode};

    struct Fixture {
        catalog: Catalog,
        vulnerable: EffectId,
        strength: EffectId,
        strike: CardId,
        sweep: CardId,
        heavy: CardId,
        brace: CardId,
    }

    fn fixture() -> Fixture {
        let mut catalog = Catalog::new();
        let vulnerable = catalog
            .insert_effect(|id| {
                EffectDefinition::new(id, "Vulnerable", EffectType::Debuff)
                    .with_stack_type(StackType::Duration)
                    .modifying(ModifierKind::ReceivedDamage)
                    .with_percentage(1.5)
            })
            .unwrap();
        let strength = catalog
            .insert_effect(|id| {
                EffectDefinition::new(id, "Strength", EffectType::Buff)
                    .with_stack_type(StackType::Intensity)
                    .modifying(ModifierKind::DealtDamage)
            })
            .unwrap();
        let strike = catalog
            .insert_card(|id| {
                CardDefinition::new(id, "Twin Strike", CardType::Attack)
                    .with_cost(1)
                    .with_damage(4, 2)
                    .with_target(TargetMode::One)
                    .with_inflict(EffectGrant::new(vulnerable, 1))
            })
            .unwrap();
        let sweep = catalog
            .insert_card(|id| {
                CardDefinition::new(id, "Sweep", CardType::Attack)
                    .with_cost(1)
                    .with_damage(5, 1)
                    .with_target(TargetMode::All)
                    .with_inflict(EffectGrant::new(vulnerable, 2))
            })
            .unwrap();
        let heavy = catalog
            .insert_card(|id| {
                CardDefinition::new(id, "Heavy Blow", CardType::Attack)
                    .with_cost(2)
                    .with_damage(14, 1)
                    .with_target(TargetMode::One)
                    .exhausting()
            })
            .unwrap();
        let brace = catalog
            .insert_card(|id| {
                let mut card = CardDefinition::new(id, "Brace", CardType::Skill)
                    .with_cost(0)
                    .with_block(5)
                    .with_target(TargetMode::SelfTarget)
                    .with_gain(EffectGrant::new(strength, 2));
                card.cards_drawn = 1;
                card.energy_gain = 1;
                card
            })
            .unwrap();
        Fixture { catalog, vulnerable, strength, strike, sweep, heavy, brace }
    }

    fn enemies(count: usize) -> Vec<Enemy> {
        let definition = EnemyDefinition::new(crate::enemies::EnemyId::new(0), "Dummy", 20, IntentionMode::LoopAll)
            .with_intention(Intention::attack(1));
        (0..count).map(|_| Enemy::new(&definition, [0.0; 4])).collect()
    }

    fn player_with(cards: &[CardId], rng: &mut GameRng) -> Player {
        let mut player = Player::new(&RunConfig::default(), cards);
        player.shuffle_draw_pile_from_deck(rng);
        player.begin_turn(rng);
        player
    }

    fn hand_entity(player: &Player, card: CardId) -> EntityId {
        player
            .piles()
            .hand()
            .iter()
            .find(|c| c.card_id == card)
            .map(|c| c.entity_id)
            .unwrap()
    }

    #[test]
    fn test_single_target_hits_and_inflicts() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.strike], &mut rng);
        let mut foes = enemies(2);
        let card = hand_entity(&player, f.strike);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        play_card(&mut player, &mut foes, card, Some(1), &mut ctx).unwrap();

        assert_eq!(foes[1].vitals.current_health, 12);
        assert_eq!(foes[1].vitals.effects.stack_of(f.vulnerable), Some(1));
        assert_eq!(foes[0].vitals.current_health, 20);
        assert_eq!(player.current_energy, 2);
        assert_eq!(player.piles().discard_pile().len(), 1);
        assert_eq!(events.count(|e| matches!(e, CombatEvent::Damaged { .. })), 2);
    }

    #[test]
    fn test_insufficient_energy_changes_nothing() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.heavy], &mut rng);
        player.current_energy = 1;
        let mut foes = enemies(1);
        let card = hand_entity(&player, f.heavy);
        let before = player.clone();

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        let result = play_card(&mut player, &mut foes, card, Some(0), &mut ctx);

        assert_eq!(result, Err(PlayError::InsufficientEnergy { cost: 2, available: 1 }));
        assert_eq!(player, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_target_requires_living_target() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.strike], &mut rng);
        let mut foes = enemies(1);
        foes[0].vitals.current_health = 0;
        let card = hand_entity(&player, f.strike);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        assert_eq!(
            play_card(&mut player, &mut foes, card, Some(0), &mut ctx),
            Err(PlayError::InvalidTarget)
        );
        assert_eq!(
            play_card(&mut player, &mut foes, card, None, &mut ctx),
            Err(PlayError::InvalidTarget)
        );
        assert_eq!(player.current_energy, 3);
    }

    #[test]
    fn test_exhaust_skips_discard() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.heavy], &mut rng);
        let mut foes = enemies(1);
        let card = hand_entity(&player, f.heavy);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        play_card(&mut player, &mut foes, card, Some(0), &mut ctx).unwrap();

        assert!(player.piles().discard_pile().is_empty());
        assert_eq!(player.piles().location_of(card), None);
        assert_eq!(foes[0].vitals.current_health, 6);
    }

    #[test]
    fn test_area_skips_dead_and_inflicts_on_survivors() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.sweep], &mut rng);
        let mut foes = enemies(3);
        foes[0].vitals.current_health = 0;
        foes[2].vitals.current_health = 3;
        let card = hand_entity(&player, f.sweep);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        play_card(&mut player, &mut foes, card, None, &mut ctx).unwrap();

        assert_eq!(foes[0].vitals.effects.stack_of(f.vulnerable), None);
        assert_eq!(foes[1].vitals.current_health, 15);
        assert_eq!(foes[1].vitals.effects.stack_of(f.vulnerable), Some(2));
        assert!(!foes[2].is_alive());
        assert_eq!(foes[2].vitals.effects.stack_of(f.vulnerable), None);
        assert_eq!(events.count(|e| matches!(e, CombatEvent::EnemyDefeated { enemy: 2 })), 1);
    }

    #[test]
    fn test_self_card_effects() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let deck = [f.brace, f.strike, f.strike, f.strike, f.strike];
        let mut player = player_with(&deck, &mut rng);
        // Make room for the extra draw, which reshuffles the played card back
        let spare = player.piles().hand().iter().find(|c| c.card_id == f.strike).unwrap().entity_id;
        player.piles_mut().remove_from_hand(spare);
        let card = hand_entity(&player, f.brace);
        let mut foes = enemies(1);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        play_card(&mut player, &mut foes, card, None, &mut ctx).unwrap();

        assert_eq!(player.vitals.current_block, 5);
        assert_eq!(player.current_energy, 4);
        assert_eq!(player.vitals.effects.stack_of(f.strength), Some(2));
        assert_eq!(player.piles().hand().len(), 4);
    }

    #[test]
    fn test_strength_applies_per_hit() {
        let f = fixture();
        let mut rng = GameRng::new(1);
        let mut events = EventLog::new();
        let mut player = player_with(&[f.strike], &mut rng);
        player
            .vitals
            .effects
            .receive(EffectGrant::new(f.strength, 1), CombatantId::Player, &f.catalog);
        let mut foes = enemies(1);
        let card = hand_entity(&player, f.strike);

        let mut ctx = BattleContext::new(&f.catalog, &mut rng, &mut events);
        play_card(&mut player, &mut foes, card, Some(0), &mut ctx).unwrap();

        // (4 + 1) twice
        assert_eq!(foes[0].vitals.current_health, 10);
    }
}
