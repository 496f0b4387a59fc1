//! Live encounter: enemies, turn alternation and enemy pacing.
//!
//! ## Turn Cycle
//!
//! ```text
//! begin ─► PLAYER ──end_turn──► ENEMY ──all acted──► PLAYER ...
//! ```
//!
//! `change_turn_state` always runs the exit hook of the current side,
//! switches, then runs the entry hook of the new side:
//!
//! - PLAYER entry: turn counter +1, selection cleared, draw, energy refill,
//!   block reset
//! - PLAYER exit: hand discarded
//! - ENEMY entry: enemy block reset
//! - ENEMY exit: next intentions chosen, duration effects decay
//!
//! Enemies act one per `enemy_action_interval` seconds of game clock. Dead
//! enemies are skipped inside the same tick.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::definition::{EncounterDefinition, EncounterId};
use super::reward::{roll_rewards, REWARD_COUNT};
use crate::cards::CardId;
use crate::catalog::Catalog;
use crate::combat::{perform_intention, BattleContext, CombatEvent, CombatantId, Player};
use crate::core::{GameRng, RunConfig, RunError};
use crate::effects::{DecayRule, EffectStack};
use crate::enemies::Enemy;

/// Whose turn it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Player,
    Enemy,
}

/// One battle on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    definition: EncounterId,
    enemies: Vec<Enemy>,
    turn_number: u32,
    turn_state: TurnState,
    next_enemy: usize,
    enemy_timer: f32,
    action_interval: f32,
    rewards: [CardId; REWARD_COUNT],
    reward_screen_open: bool,
}

impl Encounter {
    /// Spawn the definition's enemies and roll the reward offer.
    ///
    /// Rolling happens here, at map generation, so the reward cards are
    /// part of the seeded stream.
    pub fn new(
        definition: &EncounterDefinition,
        catalog: &Catalog,
        config: &RunConfig,
        rng: &mut GameRng,
    ) -> Result<Self, RunError> {
        let enemies = definition
            .enemies
            .iter()
            .filter_map(|slot| match catalog.enemy(slot.enemy) {
                Some(enemy) => Some(Enemy::new(enemy, slot.bounds)),
                None => {
                    warn!(encounter = %definition.id, enemy = %slot.enemy, "Skipping unknown enemy");
                    None
                }
            })
            .collect();
        let rewards = roll_rewards(catalog, config, rng)?;

        Ok(Self {
            definition: definition.id,
            enemies,
            turn_number: 0,
            turn_state: TurnState::Player,
            next_enemy: 0,
            enemy_timer: config.enemy_action_interval,
            action_interval: config.enemy_action_interval,
            rewards,
            reward_screen_open: false,
        })
    }

    // === Accessors ===

    #[must_use]
    pub const fn definition(&self) -> EncounterId {
        self.definition
    }

    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Completed player turns plus the current one.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub const fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    #[must_use]
    pub const fn rewards(&self) -> [CardId; REWARD_COUNT] {
        self.rewards
    }

    #[must_use]
    pub const fn reward_screen_open(&self) -> bool {
        self.reward_screen_open
    }

    #[must_use]
    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    // === Lifecycle ===

    /// Start the battle: shuffle the deck into the draw pile, choose the
    /// opening intentions and hand the first turn to the player.
    pub fn begin(&mut self, player: &mut Player, ctx: &mut BattleContext<'_>) {
        debug!(encounter = %self.definition, enemies = self.enemies.len(), "Beginning encounter");
        player.shuffle_draw_pile_from_deck(ctx.rng);
        self.choose_intentions(ctx);
        self.turn_state = TurnState::Player;
        self.begin_player_turn(player, ctx);
    }

    /// Tear down encounter-scoped player state.
    pub fn end(&mut self, player: &mut Player) {
        debug!(encounter = %self.definition, turns = self.turn_number, "Ending encounter");
        player.end_encounter();
    }

    /// Run the exit hook of the current side, switch, run the entry hook.
    pub fn change_turn_state(
        &mut self,
        next: TurnState,
        player: &mut Player,
        ctx: &mut BattleContext<'_>,
    ) {
        match self.turn_state {
            TurnState::Player => player.end_turn(),
            TurnState::Enemy => self.end_enemy_turn(player, ctx),
        }
        debug!(from = ?self.turn_state, to = ?next, turn = self.turn_number, "Turn state change");
        self.turn_state = next;
        match next {
            TurnState::Player => self.begin_player_turn(player, ctx),
            TurnState::Enemy => self.begin_enemy_turn(ctx),
        }
    }

    /// Advance enemy pacing by `dt` seconds.
    ///
    /// Does nothing outside the enemy turn or while the reward screen is
    /// open. When every enemy has had its slot the turn returns to the
    /// player.
    pub fn update(&mut self, dt: f32, player: &mut Player, ctx: &mut BattleContext<'_>) {
        if self.reward_screen_open || self.turn_state != TurnState::Enemy {
            return;
        }
        self.enemy_timer -= dt;
        if self.enemy_timer > 0.0 {
            return;
        }
        self.enemy_timer = self.action_interval;

        if self.next_enemy >= self.enemies.len() {
            self.change_turn_state(TurnState::Player, player, ctx);
            self.next_enemy = 0;
            return;
        }
        while self
            .enemies
            .get(self.next_enemy)
            .is_some_and(|e| !e.is_alive())
        {
            self.next_enemy += 1;
        }
        if let Some(enemy) = self.enemies.get_mut(self.next_enemy) {
            perform_intention(self.next_enemy, enemy, player, ctx);
        }
        self.next_enemy += 1;
    }

    /// Set every enemy's health to zero.
    pub fn kill_all(&mut self) {
        for enemy in &mut self.enemies {
            enemy.vitals.current_health = 0;
        }
    }

    /// Show the reward offer. Turn processing stops until it is resolved.
    pub fn open_reward_screen(&mut self, ctx: &mut BattleContext<'_>) {
        self.reward_screen_open = true;
        ctx.events.push(CombatEvent::RewardOffered {
            cards: self.rewards,
        });
    }

    /// The offered card at `choice`, if the screen is open.
    #[must_use]
    pub fn reward(&self, choice: usize) -> Option<CardId> {
        if !self.reward_screen_open {
            return None;
        }
        self.rewards.get(choice).copied()
    }

    // === Turn hooks ===

    fn begin_player_turn(&mut self, player: &mut Player, ctx: &mut BattleContext<'_>) {
        self.turn_number += 1;
        player.begin_turn(ctx.rng);
        ctx.events.push(CombatEvent::TurnStarted {
            side: TurnState::Player,
            turn: self.turn_number,
        });
    }

    fn begin_enemy_turn(&mut self, ctx: &mut BattleContext<'_>) {
        for enemy in &mut self.enemies {
            enemy.vitals.current_block = 0;
        }
        ctx.events.push(CombatEvent::TurnStarted {
            side: TurnState::Enemy,
            turn: self.turn_number,
        });
    }

    fn end_enemy_turn(&mut self, player: &mut Player, ctx: &mut BattleContext<'_>) {
        self.choose_intentions(ctx);
        for (slot, enemy) in self.enemies.iter_mut().enumerate() {
            decay(CombatantId::Enemy(slot), &mut enemy.vitals.effects, DecayRule::DecayFresh, ctx);
        }
        decay(CombatantId::Player, &mut player.vitals.effects, DecayRule::SparingFresh, ctx);
    }

    fn choose_intentions(&mut self, ctx: &mut BattleContext<'_>) {
        let catalog = ctx.catalog;
        for (slot, enemy) in self.enemies.iter_mut().enumerate() {
            let Some(definition) = catalog.enemy(enemy.definition) else {
                continue;
            };
            if let Some(intention) = enemy.choose_next_intention(definition, self.turn_number, ctx.rng) {
                ctx.events.push(CombatEvent::IntentionChosen {
                    enemy: slot,
                    intention,
                });
            }
        }
    }
}

fn decay(target: CombatantId, effects: &mut EffectStack, rule: DecayRule, ctx: &mut BattleContext<'_>) {
    for effect in effects.decay_durations(rule, ctx.catalog) {
        ctx.events.push(CombatEvent::EffectExpired { target, effect });
    }
}
