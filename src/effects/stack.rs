//! Per-combatant effect list.
//!
//! ## Invariants
//!
//! - At most one `Effect` per effect definition. Reapplying adds stacks.
//! - List order is first-application order, and modifiers are folded in
//!   that order.
//!
//! ## Application
//!
//! A debuff aimed at a bearer of a debuff-blocking effect is cancelled and
//! costs the blocker one stack. Otherwise the grant stacks onto an existing
//! entry or is appended with `just_added` set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{EffectGrant, EffectId, EffectType, ModifierKind, StackType};
use crate::catalog::Catalog;
use crate::combat::CombatantId;

/// One applied effect on one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub effect: EffectId,
    pub stack: i32,
    pub owner: CombatantId,
    /// Set on application, cleared by the next decay pass.
    pub just_added: bool,
}

/// Outcome of `EffectStack::receive`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectApplication {
    /// A debuff blocker absorbed the grant.
    Blocked { blocker: EffectId, remaining: i32 },
    /// Added to an existing entry.
    Stacked { total: i32 },
    /// New entry appended.
    Added,
    /// The grant names an effect the catalog does not have.
    Unknown,
}

/// How a decay pass treats freshly applied effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayRule {
    /// Clear `just_added` and decay anyway (enemies).
    DecayFresh,
    /// Clear `just_added` and skip the decay this pass (the player).
    SparingFresh,
}

/// Ordered effect list of a single combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStack {
    effects: SmallVec<[Effect; 4]>,
}

impl EffectStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a grant to this stack. See the module docs for the rules.
    pub fn receive(
        &mut self,
        grant: EffectGrant,
        owner: CombatantId,
        catalog: &Catalog,
    ) -> EffectApplication {
        let Some(definition) = catalog.effect(grant.effect) else {
            return EffectApplication::Unknown;
        };

        if definition.effect_type == EffectType::Debuff {
            let blocker = self.effects.iter().position(|e| {
                catalog
                    .effect(e.effect)
                    .is_some_and(|d| d.blocks_debuff)
            });
            if let Some(index) = blocker {
                let entry = &mut self.effects[index];
                entry.stack -= 1;
                let (blocker, remaining) = (entry.effect, entry.stack);
                if remaining <= 0 {
                    self.effects.remove(index);
                }
                return EffectApplication::Blocked { blocker, remaining };
            }
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.effect == grant.effect) {
            existing.stack += grant.stack;
            return EffectApplication::Stacked {
                total: existing.stack,
            };
        }

        self.effects.push(Effect {
            effect: grant.effect,
            stack: grant.stack,
            owner,
            just_added: true,
        });
        EffectApplication::Added
    }

    /// Fold every relevant effect over `base`, in list order.
    #[must_use]
    pub fn modify(&self, base: i32, kind: ModifierKind, catalog: &Catalog) -> i32 {
        self.effects.iter().fold(base, |value, effect| {
            match catalog.effect(effect.effect) {
                Some(definition) => definition.apply(kind, value, effect.stack),
                None => value,
            }
        })
    }

    /// End-of-round pass: duration effects lose a stack and are dropped at
    /// zero. Returns the effects that expired.
    pub fn decay_durations(&mut self, rule: DecayRule, catalog: &Catalog) -> Vec<EffectId> {
        let mut expired = Vec::new();
        self.effects.retain(|effect| {
            let fresh = std::mem::take(&mut effect.just_added);
            if fresh && rule == DecayRule::SparingFresh {
                return true;
            }
            let is_duration = catalog
                .effect(effect.effect)
                .is_some_and(|d| d.stack_type == StackType::Duration);
            if !is_duration {
                return true;
            }
            effect.stack -= 1;
            if effect.stack <= 0 {
                expired.push(effect.effect);
                return false;
            }
            true
        });
        expired
    }

    /// Stack count for an effect, if present.
    #[must_use]
    pub fn stack_of(&self, effect: EffectId) -> Option<i32> {
        self.effects.iter().find(|e| e.effect == effect).map(|e| e.stack)
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

/// Final damage from `source` to `target`: the source's dealt-damage
/// modifiers first, then the target's received-damage modifiers.
#[must_use]
pub fn resolve_damage(
    base: i32,
    source: &EffectStack,
    target: &EffectStack,
    catalog: &Catalog,
) -> i32 {
    let dealt = source.modify(base, ModifierKind::DealtDamage, catalog);
    target.modify(dealt, ModifierKind::ReceivedDamage, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectDefinition, StackType};

    fn catalog() -> (Catalog, EffectId, EffectId, EffectId, EffectId) {
        let mut catalog = Catalog::new();
        let strength = catalog.insert_effect(|id| {
            EffectDefinition::new(id, "Strength", EffectType::Buff)
                .with_stack_type(StackType::Intensity)
                .modifying(ModifierKind::DealtDamage)
        })
        .unwrap();
        let vulnerable = catalog.insert_effect(|id| {
            EffectDefinition::new(id, "Vulnerable", EffectType::Debuff)
                .with_stack_type(StackType::Duration)
                .modifying(ModifierKind::ReceivedDamage)
                .with_percentage(1.5)
        })
        .unwrap();
        let weak = catalog.insert_effect(|id| {
            EffectDefinition::new(id, "Weak", EffectType::Debuff)
                .with_stack_type(StackType::Duration)
                .modifying(ModifierKind::DealtDamage)
                .with_percentage(0.75)
        })
        .unwrap();
        let artifact = catalog.insert_effect(|id| {
            EffectDefinition::new(id, "Artifact", EffectType::Buff)
                .with_stack_type(StackType::Counter)
                .blocking_debuffs()
        })
        .unwrap();
        (catalog, strength, vulnerable, weak, artifact)
    }

    #[test]
    fn test_stacking_keeps_single_entry() {
        let (catalog, strength, ..) = catalog();
        let mut stack = EffectStack::new();

        assert_eq!(
            stack.receive(EffectGrant::new(strength, 2), CombatantId::Player, &catalog),
            EffectApplication::Added
        );
        assert_eq!(
            stack.receive(EffectGrant::new(strength, 3), CombatantId::Player, &catalog),
            EffectApplication::Stacked { total: 5 }
        );
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.stack_of(strength), Some(5));
    }

    #[test]
    fn test_debuff_blocked() {
        let (catalog, _, vulnerable, _, artifact) = catalog();
        let mut stack = EffectStack::new();
        stack.receive(EffectGrant::new(artifact, 2), CombatantId::Enemy(0), &catalog);

        let first = stack.receive(EffectGrant::new(vulnerable, 2), CombatantId::Enemy(0), &catalog);
        assert_eq!(first, EffectApplication::Blocked { blocker: artifact, remaining: 1 });
        assert_eq!(stack.stack_of(vulnerable), None);

        let second = stack.receive(EffectGrant::new(vulnerable, 2), CombatantId::Enemy(0), &catalog);
        assert_eq!(second, EffectApplication::Blocked { blocker: artifact, remaining: 0 });
        assert!(stack.is_empty());

        // Blocker gone, the debuff lands now
        stack.receive(EffectGrant::new(vulnerable, 2), CombatantId::Enemy(0), &catalog);
        assert_eq!(stack.stack_of(vulnerable), Some(2));
    }

    #[test]
    fn test_buffs_ignore_blocker() {
        let (catalog, strength, _, _, artifact) = catalog();
        let mut stack = EffectStack::new();
        stack.receive(EffectGrant::new(artifact, 1), CombatantId::Player, &catalog);
        stack.receive(EffectGrant::new(strength, 1), CombatantId::Player, &catalog);

        assert_eq!(stack.stack_of(artifact), Some(1));
        assert_eq!(stack.stack_of(strength), Some(1));
    }

    #[test]
    fn test_two_pass_damage() {
        let (catalog, strength, vulnerable, weak, _) = catalog();
        let mut attacker = EffectStack::new();
        let mut defender = EffectStack::new();

        attacker.receive(EffectGrant::new(strength, 2), CombatantId::Player, &catalog);
        attacker.receive(EffectGrant::new(weak, 1), CombatantId::Player, &catalog);
        defender.receive(EffectGrant::new(vulnerable, 1), CombatantId::Enemy(0), &catalog);

        // (6 + 2) * 0.75 = 6, then * 1.5 = 9
        assert_eq!(resolve_damage(6, &attacker, &defender, &catalog), 9);
    }

    #[test]
    fn test_modifier_order_is_application_order() {
        let (catalog, strength, _, weak, _) = catalog();
        let mut weak_first = EffectStack::new();
        weak_first.receive(EffectGrant::new(weak, 1), CombatantId::Player, &catalog);
        weak_first.receive(EffectGrant::new(strength, 2), CombatantId::Player, &catalog);

        // 6 * 0.75 = 4, then + 2
        assert_eq!(weak_first.modify(6, ModifierKind::DealtDamage, &catalog), 6);
    }

    #[test]
    fn test_decay_rules() {
        let (catalog, strength, vulnerable, ..) = catalog();

        let mut enemy = EffectStack::new();
        enemy.receive(EffectGrant::new(vulnerable, 1), CombatantId::Enemy(0), &catalog);
        enemy.receive(EffectGrant::new(strength, 1), CombatantId::Enemy(0), &catalog);
        let expired = enemy.decay_durations(DecayRule::DecayFresh, &catalog);
        assert_eq!(expired, vec![vulnerable]);
        assert_eq!(enemy.stack_of(strength), Some(1));

        let mut player = EffectStack::new();
        player.receive(EffectGrant::new(vulnerable, 1), CombatantId::Player, &catalog);
        assert!(player.decay_durations(DecayRule::SparingFresh, &catalog).is_empty());
        assert_eq!(player.stack_of(vulnerable), Some(1));
        assert_eq!(player.decay_durations(DecayRule::SparingFresh, &catalog), vec![vulnerable]);
        assert!(player.is_empty());
    }
}
