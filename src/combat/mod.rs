//! Combat resolution: combatants, card plays and enemy intentions.
//!
//! ## Key Types
//!
//! - `Vitals`: Health, block and effects of one combatant
//! - `Player`: The player combatant with energy and card piles
//! - `BattleContext`: Catalog, RNG and event log threaded through every
//!   resolution step
//! - `CombatEvent`: Record of an observable state change
//!
//! ## Resolution Order
//!
//! A card play resolves its damage step, then block, healing, draws,
//! energy and finally its self-applied effect. An enemy intention resolves
//! damage to the player, block to itself, the injected card, the
//! self-applied effect and finally the effect inflicted on the player.

pub mod event;
pub mod intention;
pub mod player;
pub mod resolution;
pub mod vitals;

pub use event::{CombatEvent, EventLog};
pub use intention::perform_intention;
pub use player::Player;
pub use resolution::{play_card, resolve_card};
pub use vitals::{CombatantId, DamageOutcome, Vitals};

use tracing::debug;

use crate::catalog::Catalog;
use crate::core::GameRng;
use crate::effects::{EffectApplication, EffectGrant};

/// Shared services for one resolution step.
pub struct BattleContext<'a> {
    pub catalog: &'a Catalog,
    pub rng: &'a mut GameRng,
    pub events: &'a mut EventLog,
}

impl<'a> BattleContext<'a> {
    pub fn new(catalog: &'a Catalog, rng: &'a mut GameRng, events: &'a mut EventLog) -> Self {
        Self { catalog, rng, events }
    }

    /// Deal one hit and record it.
    pub fn hit(&mut self, target: CombatantId, vitals: &mut Vitals, amount: i32) -> DamageOutcome {
        let outcome = vitals.take_damage(amount);
        self.events.push(CombatEvent::Damaged {
            target,
            blocked: outcome.blocked,
            health_lost: outcome.health_lost,
        });
        outcome
    }

    /// Grant block and record it.
    pub fn block(&mut self, target: CombatantId, vitals: &mut Vitals, amount: i32) {
        if amount <= 0 {
            return;
        }
        vitals.gain_block(amount);
        self.events.push(CombatEvent::BlockGained { target, amount });
    }

    /// Heal and record the amount actually restored.
    pub fn heal(&mut self, target: CombatantId, vitals: &mut Vitals, amount: i32) -> i32 {
        let healed = vitals.restore_health(amount);
        if healed > 0 {
            self.events.push(CombatEvent::Healed { target, amount: healed });
        }
        healed
    }

    /// Apply an effect grant and record the outcome.
    pub fn apply_effect(
        &mut self,
        target: CombatantId,
        vitals: &mut Vitals,
        grant: EffectGrant,
    ) -> EffectApplication {
        let application = vitals.effects.receive(grant, target, self.catalog);
        match application {
            EffectApplication::Blocked { blocker, .. } => {
                self.events.push(CombatEvent::DebuffBlocked { target, blocker });
            }
            EffectApplication::Added | EffectApplication::Stacked { .. } => {
                self.events.push(CombatEvent::EffectApplied {
                    target,
                    effect: grant.effect,
                    stack: grant.stack,
                });
            }
            EffectApplication::Unknown => {
                debug!(%target, effect = %grant.effect, "Ignoring unknown effect");
            }
        }
        application
    }
}
