//! A run in progress: the player, the map and the shared RNG stream.
//!
//! ## Driving a Run
//!
//! The host calls `update(dt)` once per frame and forwards player input as
//! commands (`select_card`, `play_selected`, `end_turn`, `choose_reward`,
//! `rest`, ...). After each frame it drains the event log and hands it to
//! the presentation layer.
//!
//! ## Save Points
//!
//! A `RunSnapshot` is recorded when an encounter begins, when the reward
//! screen opens and when a rest stop is entered. `save_bytes` encodes the
//! latest one; `resume` rebuilds an equivalent run from it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checkpoint::Checkpoint;
use super::map::{Advance, Map};
use super::save::{GameStateTag, RunSnapshot};
use crate::cards::CardId;
use crate::catalog::Catalog;
use crate::combat::{self, BattleContext, CombatEvent, CombatantId, EventLog, Player};
use crate::core::{EntityId, GameRng, GameRngState, PlayError, RunConfig, RunError, SaveError};
use crate::encounters::{Encounter, TurnState};
use crate::enemies::IntentionPreview;

/// How a finished run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    Lost,
}

/// A run from the first encounter to victory or defeat.
pub struct Run<'c> {
    catalog: &'c Catalog,
    config: RunConfig,
    rng: GameRng,
    player: Player,
    map: Map,
    events: EventLog,
    end_timer: f32,
    outcome: Option<RunOutcome>,
    save_point: Option<RunSnapshot>,
}

impl<'c> Run<'c> {
    /// Start a fresh run from `seed` and begin the first encounter.
    pub fn new(catalog: &'c Catalog, config: RunConfig, seed: u32) -> Result<Self, RunError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        let player = Player::with_starter_deck(&config, catalog)?;
        let map = Map::generate(catalog, &config, &mut rng)?;
        info!(seed, encounters = map.len(), "Starting run");

        let mut run = Self::assemble(catalog, config, rng, player, map);
        run.begin_current_encounter();
        Ok(run)
    }

    /// Rebuild a run from a save point.
    ///
    /// The map is regenerated from the saved seed, then the stream jumps to
    /// the saved cursor before the recorded encounter begins again. Nothing
    /// is returned on failure.
    pub fn resume(
        catalog: &'c Catalog,
        config: RunConfig,
        snapshot: &RunSnapshot,
    ) -> Result<Self, RunError> {
        config.validate()?;
        if let Some(card) = snapshot.deck.iter().find(|c| catalog.card(**c).is_none()) {
            return Err(SaveError::UnknownCard(*card).into());
        }

        let mut rng = GameRng::new(snapshot.rng.seed);
        let mut player = Player::new(&config, &snapshot.deck);
        player.vitals.current_health = i32::from(snapshot.health).min(player.vitals.max_health);
        let mut map = Map::generate(catalog, &config, &mut rng)?;

        let index = usize::from(snapshot.encounter_index);
        let generated = map
            .encounters()
            .get(index)
            .map(Encounter::definition)
            .ok_or(SaveError::EncounterOutOfRange {
                index,
                len: map.len(),
            })?;
        if generated != snapshot.encounter {
            return Err(SaveError::EncounterMismatch {
                index,
                saved: snapshot.encounter,
                generated,
            }
            .into());
        }
        map.restore_position(index, snapshot.state == GameStateTag::Resting);

        let mut run = Self::assemble(catalog, config, rng, player, map);
        if snapshot.state == GameStateTag::RewardScreen {
            let mut ctx = BattleContext::new(run.catalog, &mut run.rng, &mut run.events);
            run.map.current_mut().open_reward_screen(&mut ctx);
        }
        run.rng.set_cursor(snapshot.rng.cursor);
        info!(
            seed = snapshot.rng.seed,
            cursor = snapshot.rng.cursor,
            index,
            state = ?snapshot.state,
            "Resuming run"
        );
        run.begin_current_encounter();
        Ok(run)
    }

    /// Decode a save buffer and resume from it.
    pub fn load(catalog: &'c Catalog, config: RunConfig, bytes: &[u8]) -> Result<Self, RunError> {
        let snapshot = RunSnapshot::decode(bytes).inspect_err(|error| {
            warn!(%error, "Rejected save data");
        })?;
        Self::resume(catalog, config, &snapshot)
    }

    /// Restore a full checkpoint taken with `checkpoint`.
    #[must_use]
    pub fn from_checkpoint(catalog: &'c Catalog, config: RunConfig, checkpoint: Checkpoint) -> Self {
        Self {
            catalog,
            config,
            rng: GameRng::from_state(&checkpoint.rng),
            player: checkpoint.player,
            map: checkpoint.map,
            events: EventLog::new(),
            end_timer: checkpoint.end_timer,
            outcome: checkpoint.outcome,
            save_point: checkpoint.save_point,
        }
    }

    fn assemble(catalog: &'c Catalog, config: RunConfig, rng: GameRng, player: Player, map: Map) -> Self {
        let end_timer = config.encounter_end_delay;
        Self {
            catalog,
            config,
            rng,
            player,
            map,
            events: EventLog::new(),
            end_timer,
            outcome: None,
            save_point: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }

    #[must_use]
    pub fn current_encounter(&self) -> &Encounter {
        self.map.current()
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The latest recorded save point.
    #[must_use]
    pub fn save_point(&self) -> Option<&RunSnapshot> {
        self.save_point.as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Take every event since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    /// What each enemy's intention would do right now. `None` for dead
    /// enemies and enemies without an intention.
    #[must_use]
    pub fn preview_intentions(&self) -> Vec<Option<IntentionPreview>> {
        self.map
            .current()
            .enemies()
            .iter()
            .map(|enemy| {
                if !enemy.is_alive() {
                    return None;
                }
                let definition = self.catalog.enemy(enemy.definition)?;
                enemy.preview(definition, &self.player.vitals, self.catalog)
            })
            .collect()
    }

    // === Frame update ===

    /// Advance the game clock by `dt` seconds.
    ///
    /// Handles the delayed defeat and victory checks, then enemy pacing.
    /// Nothing happens at a rest stop or after the run is over.
    pub fn update(&mut self, dt: f32) {
        if self.outcome.is_some() || self.map.is_resting() {
            return;
        }

        if !self.player.vitals.is_alive() {
            if self.tick_end_timer(dt) {
                info!(index = self.map.current_index(), "Run lost");
                self.outcome = Some(RunOutcome::Lost);
                self.events.push(CombatEvent::RunLost);
            }
            return;
        }

        let encounter = self.map.current();
        if !encounter.reward_screen_open() && encounter.all_enemies_dead() {
            if self.tick_end_timer(dt) {
                self.finish_encounter();
            }
            return;
        }

        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        self.map.current_mut().update(dt, &mut self.player, &mut ctx);
    }

    fn tick_end_timer(&mut self, dt: f32) -> bool {
        self.end_timer -= dt;
        if self.end_timer > 0.0 {
            return false;
        }
        self.end_timer = self.config.encounter_end_delay;
        true
    }

    fn finish_encounter(&mut self) {
        self.events.push(CombatEvent::EncounterWon);
        if self.map.is_final() {
            info!("Run won");
            self.outcome = Some(RunOutcome::Won);
            self.events.push(CombatEvent::RunWon);
            return;
        }
        info!(index = self.map.current_index(), "Encounter won");
        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        self.map.current_mut().open_reward_screen(&mut ctx);
        self.record_save_point();
    }

    // === Player commands ===

    fn ensure_player_turn(&self) -> Result<(), PlayError> {
        let encounter = self.map.current();
        let can_act = self.outcome.is_none()
            && !self.map.is_resting()
            && !encounter.reward_screen_open()
            && encounter.turn_state() == TurnState::Player
            && self.player.vitals.is_alive()
            && !encounter.all_enemies_dead();
        if can_act {
            Ok(())
        } else {
            Err(PlayError::NotPlayerTurn)
        }
    }

    /// End the player's turn and hand over to the enemies.
    pub fn end_turn(&mut self) -> Result<(), PlayError> {
        self.ensure_player_turn()?;
        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        self.map
            .current_mut()
            .change_turn_state(TurnState::Enemy, &mut self.player, &mut ctx);
        Ok(())
    }

    /// Toggle the selection of a card in hand.
    ///
    /// Returns the selection after the toggle.
    pub fn select_card(&mut self, card: EntityId) -> Result<Option<EntityId>, PlayError> {
        self.ensure_player_turn()?;
        self.check_playable(card)?;
        let selection = if self.player.selected_card() == Some(card) {
            None
        } else {
            Some(card)
        };
        self.player.set_selected_card(selection);
        Ok(selection)
    }

    /// Play the selected card. `target` is an enemy slot for single-target
    /// cards and ignored otherwise. A rejected play keeps the selection.
    pub fn play_selected(&mut self, target: Option<usize>) -> Result<(), PlayError> {
        let card = self.player.selected_card().ok_or(PlayError::NoSelection)?;
        self.play_card(card, target)
    }

    /// Play a card from hand.
    pub fn play_card(&mut self, card: EntityId, target: Option<usize>) -> Result<(), PlayError> {
        self.ensure_player_turn()?;
        self.check_playable(card)?;
        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        let encounter = self.map.current_mut();
        combat::play_card(&mut self.player, encounter.enemies_mut(), card, target, &mut ctx)?;
        if self.player.selected_card() == Some(card) {
            self.player.set_selected_card(None);
        }
        Ok(())
    }

    fn check_playable(&self, card: EntityId) -> Result<(), PlayError> {
        let instance = self
            .player
            .piles()
            .in_hand(card)
            .ok_or(PlayError::NotInHand(card))?;
        match self.catalog.card(instance.card_id) {
            Some(definition) if definition.is_playable => Ok(()),
            _ => Err(PlayError::Unplayable(instance.card_id)),
        }
    }

    /// Take reward `choice` (0, 1 or 2) into the deck and move on.
    pub fn choose_reward(&mut self, choice: usize) -> Result<CardId, PlayError> {
        self.ensure_reward_screen()?;
        let card = self
            .map
            .current()
            .reward(choice)
            .ok_or(PlayError::InvalidTarget)?;
        self.player.add_to_deck(card);
        info!(%card, deck = self.player.deck().len(), "Reward taken");
        self.events.push(CombatEvent::RewardTaken { card: Some(card) });
        self.enter_next_encounter();
        Ok(card)
    }

    /// Leave the reward screen without a card.
    pub fn skip_reward(&mut self) -> Result<(), PlayError> {
        self.ensure_reward_screen()?;
        info!("Reward skipped");
        self.events.push(CombatEvent::RewardTaken { card: None });
        self.enter_next_encounter();
        Ok(())
    }

    fn ensure_reward_screen(&self) -> Result<(), PlayError> {
        if self.outcome.is_none() && !self.map.is_resting() && self.map.current().reward_screen_open() {
            Ok(())
        } else {
            Err(PlayError::NotPlayerTurn)
        }
    }

    /// Rest at the current rest stop and move on. Returns the health
    /// actually restored.
    pub fn rest(&mut self) -> Result<i32, PlayError> {
        self.ensure_resting()?;
        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        let healed = ctx.heal(CombatantId::Player, &mut self.player.vitals, self.config.rest_heal);
        ctx.events.push(CombatEvent::Rested { healed });
        info!(healed, health = self.player.vitals.current_health, "Rested");
        self.enter_next_encounter();
        Ok(healed)
    }

    /// Leave the rest stop without resting.
    pub fn skip_rest(&mut self) -> Result<(), PlayError> {
        self.ensure_resting()?;
        info!("Rest skipped");
        self.enter_next_encounter();
        Ok(())
    }

    fn ensure_resting(&self) -> Result<(), PlayError> {
        if self.outcome.is_none() && self.map.is_resting() {
            Ok(())
        } else {
            Err(PlayError::NotPlayerTurn)
        }
    }

    /// Debug command: defeat every enemy of the current encounter.
    pub fn kill_all_enemies(&mut self) {
        let encounter = self.map.current_mut();
        for (slot, enemy) in encounter.enemies().iter().enumerate() {
            if enemy.is_alive() {
                self.events.push(CombatEvent::EnemyDefeated { enemy: slot });
            }
        }
        encounter.kill_all();
        debug!(index = self.map.current_index(), "Killed all enemies");
    }

    // === Map flow ===

    fn enter_next_encounter(&mut self) {
        if !self.map.next_is_rest_stop() {
            self.map.current_mut().end(&mut self.player);
        }
        match self.map.advance() {
            Advance::RestStop => {
                info!(index = self.map.current_index(), "Entered rest stop");
                self.events.push(CombatEvent::RestStopEntered);
                self.record_save_point();
            }
            Advance::Encounter(_) => self.begin_current_encounter(),
            Advance::Finished => {
                info!("Run won");
                self.outcome = Some(RunOutcome::Won);
                self.events.push(CombatEvent::RunWon);
            }
        }
    }

    fn begin_current_encounter(&mut self) {
        self.record_save_point();
        let index = self.map.current_index();
        let encounter = self.map.current_mut();
        info!(index, encounter = %encounter.definition(), "Beginning encounter");

        let mut ctx = BattleContext::new(self.catalog, &mut self.rng, &mut self.events);
        ctx.events.push(CombatEvent::EncounterBegan {
            encounter: encounter.definition(),
            index,
        });
        encounter.begin(&mut self.player, &mut ctx);
    }

    // === Persistence ===

    /// Capture the current position as a save point.
    pub fn snapshot(&self) -> Result<RunSnapshot, SaveError> {
        let health = self.player.vitals.current_health.max(0);
        let index = self.map.current_index();
        let state = if self.map.is_resting() {
            GameStateTag::Resting
        } else if self.map.current().reward_screen_open() {
            GameStateTag::RewardScreen
        } else {
            GameStateTag::Normal
        };

        Ok(RunSnapshot {
            rng: self.rng.state(),
            encounter: self.map.current().definition(),
            encounter_index: u8::try_from(index).map_err(|_| SaveError::Overflow {
                field: "encounter_index",
                value: index as i64,
            })?,
            state,
            health: u8::try_from(health).map_err(|_| SaveError::Overflow {
                field: "health",
                value: i64::from(health),
            })?,
            deck: self.player.deck_card_ids(),
        })
    }

    fn record_save_point(&mut self) {
        match self.snapshot() {
            Ok(snapshot) => {
                debug!(
                    cursor = snapshot.rng.cursor,
                    index = snapshot.encounter_index,
                    state = ?snapshot.state,
                    "Recorded save point"
                );
                self.save_point = Some(snapshot);
                self.events.push(CombatEvent::SavePointRecorded);
            }
            Err(error) => warn!(%error, "Could not record save point"),
        }
    }

    /// Encode the latest save point in the save layout.
    pub fn save_bytes(&self) -> Result<Vec<u8>, SaveError> {
        let snapshot = self.save_point.as_ref().ok_or(SaveError::NoSavePoint)?;
        info!(bytes = snapshot.deck.len() + super::save::HEADER_LEN, "Saving progress");
        Ok(snapshot.encode())
    }

    /// Capture the complete mid-battle state.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            rng: self.rng.state(),
            player: self.player.clone(),
            map: self.map.clone(),
            end_timer: self.end_timer,
            outcome: self.outcome,
            save_point: self.save_point.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardType, TargetMode};
    use crate::encounters::EncounterDefinition;
    use crate::enemies::{EnemyDefinition, Intention, IntentionMode};

    /// Starter cards first, three reward cards, two status cards last.
    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert_card(|id| {
                CardDefinition::new(id, "Slash", CardType::Attack)
                    .with_cost(1)
                    .with_damage(6, 1)
                    .with_target(TargetMode::One)
            })
            .unwrap();
        catalog
            .insert_card(|id| {
                CardDefinition::new(id, "Guard", CardType::Skill)
                    .with_cost(1)
                    .with_block(5)
                    .with_target(TargetMode::SelfTarget)
            })
            .unwrap();
        for name in ["Shield Bash", "Bash N' Smash", "Cleave", "Anger"] {
            catalog
                .insert_card(|id| {
                    CardDefinition::new(id, name, CardType::Attack)
                        .with_cost(1)
                        .with_damage(3, 1)
                        .with_target(TargetMode::One)
                })
                .unwrap();
        }
        for name in ["Dazed", "Wound"] {
            catalog
                .insert_card(|id| CardDefinition::new(id, name, CardType::Status).unplayable())
                .unwrap();
        }
        let dummy = catalog
            .insert_enemy(|id| {
                EnemyDefinition::new(id, "Dummy", 12, IntentionMode::LoopAll)
                    .with_intention(Intention::attack(4))
            })
            .unwrap();
        for difficulty in [0, 1, 2, 3, 4] {
            catalog
                .insert_encounter(|id| EncounterDefinition::new(id, difficulty).with_enemy(dummy))
                .unwrap();
        }
        catalog
    }

    fn config() -> RunConfig {
        RunConfig {
            encounters_per_tier: vec![1, 1, 1],
            ..RunConfig::default()
        }
    }

    fn hand_card(run: &Run<'_>, name: &str) -> Option<EntityId> {
        run.player()
            .piles()
            .hand()
            .iter()
            .find(|c| run.catalog().card(c.card_id).is_some_and(|d| d.name == name))
            .map(|c| c.entity_id)
    }

    #[test]
    fn test_new_run_begins_first_encounter() {
        let catalog = catalog();
        let run = Run::new(&catalog, config(), 42).unwrap();

        assert_eq!(run.map().len(), 5);
        assert_eq!(run.map().current_index(), 0);
        assert_eq!(run.current_encounter().turn_number(), 1);
        assert_eq!(run.player().piles().hand().len(), 5);
        assert_eq!(run.player().deck().len(), 10);
        let save = run.save_point().unwrap();
        assert_eq!(save.state, GameStateTag::Normal);
        assert_eq!(save.health, 30);
    }

    #[test]
    fn test_selection_toggles() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 42).unwrap();
        let card = run.player().piles().hand()[0].entity_id;

        assert_eq!(run.select_card(card), Ok(Some(card)));
        assert_eq!(run.select_card(card), Ok(None));
        assert_eq!(run.play_selected(Some(0)), Err(PlayError::NoSelection));
        assert_eq!(
            run.select_card(EntityId::new(999)),
            Err(PlayError::NotInHand(EntityId::new(999)))
        );
    }

    #[test]
    fn test_play_and_end_turn() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 7).unwrap();
        let guard = hand_card(&run, "Guard").or_else(|| hand_card(&run, "Slash")).unwrap();

        run.select_card(guard).unwrap();
        run.play_selected(Some(0)).unwrap();
        assert_eq!(run.player().current_energy, 2);
        assert_eq!(run.player().selected_card(), None);

        run.end_turn().unwrap();
        assert_eq!(run.current_encounter().turn_state(), TurnState::Enemy);
        assert_eq!(run.end_turn(), Err(PlayError::NotPlayerTurn));

        // One enemy acts at 2s, the turn returns at 4s
        run.update(2.0);
        run.update(2.0);
        assert_eq!(run.current_encounter().turn_state(), TurnState::Player);
        assert_eq!(run.current_encounter().turn_number(), 2);
    }

    #[test]
    fn test_victory_opens_reward_then_rest() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 3).unwrap();

        run.kill_all_enemies();
        assert_eq!(run.end_turn(), Err(PlayError::NotPlayerTurn));
        run.update(1.0);
        assert!(!run.current_encounter().reward_screen_open());
        run.update(2.0);
        assert!(run.current_encounter().reward_screen_open());
        assert_eq!(run.save_point().unwrap().state, GameStateTag::RewardScreen);

        let offered = run.current_encounter().rewards();
        let card = run.choose_reward(1).unwrap();
        assert_eq!(card, offered[1]);
        assert_eq!(run.player().deck().len(), 11);

        // Index 0 is the only tier-0 encounter, so a rest stop follows
        assert!(run.map().is_resting());
        assert_eq!(run.save_point().unwrap().state, GameStateTag::Resting);
        assert_eq!(run.choose_reward(0), Err(PlayError::NotPlayerTurn));

        run.skip_rest().unwrap();
        assert_eq!(run.map().current_index(), 1);
        assert!(!run.map().is_resting());
        assert_eq!(run.player().piles().hand().len(), 5);
    }

    #[test]
    fn test_rest_heals() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 3).unwrap();
        run.kill_all_enemies();
        run.update(3.0);
        run.skip_reward().unwrap();
        run.player.vitals.current_health = 12;

        assert_eq!(run.rest(), Ok(10));
        assert_eq!(run.player().vitals.current_health, 22);
        assert_eq!(run.rest(), Err(PlayError::NotPlayerTurn));
    }

    #[test]
    fn test_defeat_after_delay() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 3).unwrap();
        run.player.vitals.current_health = 0;

        run.update(2.5);
        assert_eq!(run.outcome(), None);
        run.update(0.5);
        assert_eq!(run.outcome(), Some(RunOutcome::Lost));
        assert!(run.drain_events().contains(&CombatEvent::RunLost));
    }

    #[test]
    fn test_save_bytes_without_save_point() {
        let catalog = catalog();
        let mut run = Run::new(&catalog, config(), 3).unwrap();
        assert!(run.save_bytes().is_ok());

        run.save_point = None;
        assert_eq!(run.save_bytes(), Err(SaveError::NoSavePoint));
    }

    #[test]
    fn test_preview_intentions() {
        let catalog = catalog();
        let run = Run::new(&catalog, config(), 3).unwrap();

        let previews = run.preview_intentions();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].map(|p| p.damage), Some(4));
    }
}
