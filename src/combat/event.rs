//! Combat events.
//!
//! Every observable state change appends a `CombatEvent` to the run's
//! `EventLog`. The log is drained by the host each frame and fed to the
//! presentation layer (sounds, floating text).

use serde::{Deserialize, Serialize};

use super::vitals::CombatantId;
use crate::cards::{AttackType, CardId};
use crate::core::EntityId;
use crate::effects::EffectId;
use crate::encounters::{EncounterId, TurnState};

/// Something that happened during a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A hit landed. Emitted even when everything was blocked.
    Damaged {
        target: CombatantId,
        blocked: i32,
        health_lost: i32,
    },
    BlockGained {
        target: CombatantId,
        amount: i32,
    },
    Healed {
        target: CombatantId,
        amount: i32,
    },
    EnergyGained {
        amount: i32,
    },
    EffectApplied {
        target: CombatantId,
        effect: EffectId,
        stack: i32,
    },
    /// A debuff was cancelled by a blocker on the target.
    DebuffBlocked {
        target: CombatantId,
        blocker: EffectId,
    },
    EffectExpired {
        target: CombatantId,
        effect: EffectId,
    },
    CardPlayed {
        entity: EntityId,
        card: CardId,
        attack_type: AttackType,
    },
    /// An enemy shuffled a card into the draw pile.
    CardAddedToDraw {
        card: CardId,
    },
    IntentionChosen {
        enemy: usize,
        intention: usize,
    },
    /// An enemy carried out its intention.
    IntentionPerformed {
        enemy: usize,
        intention: usize,
    },
    TurnStarted {
        side: TurnState,
        turn: u32,
    },
    EnemyDefeated {
        enemy: usize,
    },
    EncounterBegan {
        encounter: EncounterId,
        index: usize,
    },
    EncounterWon,
    RewardOffered {
        cards: [CardId; 3],
    },
    /// `None` when the reward was skipped.
    RewardTaken {
        card: Option<CardId>,
    },
    RestStopEntered,
    Rested {
        healed: i32,
    },
    SavePointRecorded,
    RunWon,
    RunLost,
}

/// Ordered buffer of events since the last drain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let mut log = EventLog::new();
        log.push(CombatEvent::EncounterWon);
        log.push(CombatEvent::RunWon);

        let drained = log.drain();
        assert_eq!(drained, vec![CombatEvent::EncounterWon, CombatEvent::RunWon]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_count() {
        let mut log = EventLog::new();
        log.push(CombatEvent::Healed { target: CombatantId::Player, amount: 3 });
        log.push(CombatEvent::EncounterWon);
        log.push(CombatEvent::Healed { target: CombatantId::Player, amount: 1 });

        assert_eq!(log.count(|e| matches!(e, CombatEvent::Healed { .. })), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_event_serialization() {
        let event = CombatEvent::Damaged {
            target: CombatantId::Enemy(1),
            blocked: 2,
            health_lost: 4,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: CombatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
