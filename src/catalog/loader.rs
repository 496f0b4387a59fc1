//! Definition document schema.
//!
//! Maps the elements and attributes of each definition document onto the
//! definition structs. Structural problems are errors; attribute problems
//! fall back to defaults.

use tracing::debug;

use super::registry::Registry;
use super::source::CatalogKind;
use super::xml::XmlElement;
use crate::cards::{AttackType, CardDefinition, CardId, CardRarity, CardType, TargetMode};
use crate::core::CatalogError;
use crate::effects::{EffectDefinition, EffectGrant, EffectId, EffectType, StackType};
use crate::encounters::{EncounterDefinition, EncounterId, SpawnSlot, DEFAULT_SPAWN_BOUNDS};
use crate::enemies::{EnemyDefinition, EnemyId, Intention, IntentionMode};

/// Children of the document root, all required to be `kind`'s element.
pub(super) fn definition_elements(
    root: &XmlElement,
    kind: CatalogKind,
) -> Result<&[XmlElement], CatalogError> {
    expect_children(&root.children, kind, kind.element_name())
}

fn expect_children<'a>(
    children: &'a [XmlElement],
    kind: CatalogKind,
    expected: &'static str,
) -> Result<&'a [XmlElement], CatalogError> {
    match children.iter().find(|child| child.name != expected) {
        Some(stray) => Err(CatalogError::UnexpectedElement {
            kind,
            expected,
            found: stray.name.clone(),
        }),
        None => Ok(children),
    }
}

/// Check a definition count against the id width.
pub(super) fn check_count(kind: CatalogKind, count: usize, limit: usize) -> Result<(), CatalogError> {
    if count > limit {
        return Err(CatalogError::TooMany { kind, count, limit });
    }
    Ok(())
}

pub(super) fn parse_effect(element: &XmlElement, id: EffectId) -> EffectDefinition {
    EffectDefinition {
        id,
        name: element.text_or("name", "null effect"),
        effect_type: element.parse_or("type", EffectType::Unknown),
        stack_type: element.parse_or("stackType", StackType::None),
        modifies_dealt_damage: element.parse_or("modDealtDamage", false),
        modifies_received_damage: element.parse_or("modReceivedDamage", false),
        modifies_block: element.parse_or("modBlock", false),
        use_percentage: element.parse_or("usePercentage", false),
        percent_modifier: element.parse_or("percentModifier", 1.0),
        blocks_debuff: element.parse_or("blockDebuff", false),
    }
}

pub(super) fn parse_card(
    element: &XmlElement,
    id: CardId,
    effects: &Registry<EffectDefinition>,
) -> CardDefinition {
    CardDefinition {
        id,
        name: element.text_or("name", "invalid card"),
        description: element
            .text_or("description", "invalid description")
            .replace("\\n", "\n"),
        card_type: element.parse_or("type", CardType::Unknown),
        rarity: element.parse_or("rarity", CardRarity::Unknown),
        target_mode: element.parse_or("targetMode", TargetMode::None),
        attack_type: element.parse_or("attackType", AttackType::None),
        cost: element.parse_or("cost", 0),
        damage: element.parse_or("damage", 0),
        num_hits: element.parse_or("numHits", 0),
        block: element.parse_or("block", 0),
        restore_hp: element.parse_or("restoreHP", 0),
        cards_drawn: element.parse_or("cardsDrawn", 0),
        energy_gain: element.parse_or("energyGain", 0),
        inflict_effect: effect_grant(element, "inflictEffect", effects),
        gain_effect: effect_grant(element, "gainEffect", effects),
        exhaust: element.parse_or("exhaust", false),
        is_playable: element.parse_or("isPlayable", true),
    }
}

pub(super) fn parse_enemy(
    element: &XmlElement,
    id: EnemyId,
    cards: &Registry<CardDefinition>,
    effects: &Registry<EffectDefinition>,
) -> Result<EnemyDefinition, CatalogError> {
    let name = element.text_or("name", "invalid enemy");
    let container = element
        .children
        .first()
        .ok_or_else(|| CatalogError::MissingContainer {
            kind: CatalogKind::Enemy,
            name: name.clone(),
            container: "Intentions",
        })?;

    let intentions = expect_children(&container.children, CatalogKind::Enemy, "Intention")?
        .iter()
        .map(|intention| Intention {
            damage: intention.parse_or("damage", 0),
            block: intention.parse_or("block", 0),
            card_to_add: intention.attr("cardToAdd").and_then(|card| {
                let found = cards.by_name(card).map(|def| def.id);
                if found.is_none() {
                    debug!(enemy = %name, card, "Intention references unknown card");
                }
                found
            }),
            inflict_effect: effect_grant(intention, "inflictEffect", effects),
            gain_effect: effect_grant(intention, "gainEffect", effects),
            preparing: intention.parse_or("preparing", false),
        })
        .collect();

    Ok(EnemyDefinition {
        id,
        max_health: element.parse_or("maxHealth", 0),
        intention_mode: element.parse_or("intentionMode", IntentionMode::Unknown),
        intentions,
        name,
    })
}

pub(super) fn parse_encounter(
    element: &XmlElement,
    id: EncounterId,
    enemies: &Registry<EnemyDefinition>,
) -> Result<EncounterDefinition, CatalogError> {
    let container = element
        .children
        .first()
        .ok_or_else(|| CatalogError::MissingContainer {
            kind: CatalogKind::Encounter,
            name: id.to_string(),
            container: "Enemies",
        })?;

    let mut slots = Vec::new();
    for spawn in expect_children(&container.children, CatalogKind::Encounter, "Enemy")? {
        let name = spawn.text_or("name", "invalid enemy name");
        match enemies.by_name(&name) {
            Some(enemy) => slots.push(SpawnSlot {
                enemy: enemy.id,
                bounds: spawn.rect_or("renderBounds", DEFAULT_SPAWN_BOUNDS),
            }),
            None => tracing::warn!(%id, enemy = %name, "Encounter references unknown enemy, skipping"),
        }
    }

    Ok(EncounterDefinition {
        id,
        difficulty: element.parse_or("difficulty", 0),
        enemies: slots,
    })
}

/// `<key>` names an effect and `<key>Stack` its stack count. An unknown or
/// absent name means no effect.
fn effect_grant(
    element: &XmlElement,
    key: &str,
    effects: &Registry<EffectDefinition>,
) -> Option<EffectGrant> {
    let name = element.attr(key)?;
    let Some(effect) = effects.by_name(name) else {
        debug!(element = %element.name, effect = name, "Unknown effect reference");
        return None;
    };
    let stack = element.parse_or(&format!("{key}Stack"), 0);
    Some(EffectGrant::new(effect.id, stack))
}
