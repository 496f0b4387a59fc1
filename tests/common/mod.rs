//! Shared fixtures for the integration tests.
//!
//! - A small but complete definition set, loaded from XML
//! - Tracing output for failing tests (`RUST_LOG=tower_battle=debug`)

#![allow(dead_code)]

use tower_battle::catalog::{Catalog, CatalogKind, InMemorySource};
use tower_battle::core::{EntityId, RunConfig};
use tower_battle::run::Run;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const EFFECTS: &str = r#"<EffectDefinitions>
    <EffectDefinition name="Strength" type="Buff" stackType="Intensity" modDealtDamage="true"/>
    <EffectDefinition name="Weak" type="Debuff" stackType="Duration" modDealtDamage="true" usePercentage="true" percentModifier="0.75"/>
    <EffectDefinition name="Vulnerable" type="Debuff" stackType="Duration" modReceivedDamage="true" usePercentage="true" percentModifier="1.5"/>
    <EffectDefinition name="Artifact" type="Buff" stackType="Counter" blockDebuff="true"/>
</EffectDefinitions>"#;

/// Two starter cards first and two status cards last; everything between
/// is a reward candidate.
pub const CARDS: &str = r#"<CardDefinitions>
    <CardDefinition name="Slash" type="Attack" rarity="Starter" targetMode="One" attackType="Slice" cost="1" damage="6" numHits="1"/>
    <CardDefinition name="Guard" type="Skill" rarity="Starter" targetMode="Self" cost="1" block="5"/>
    <CardDefinition name="Shield Bash" type="Attack" rarity="Common" targetMode="One" attackType="LightImpact" cost="1" damage="5" numHits="1" block="3"/>
    <CardDefinition name="Bash N' Smash" type="Attack" rarity="Common" targetMode="One" attackType="HeavyImpact" cost="2" damage="8" numHits="1" inflictEffect="Vulnerable" inflictEffectStack="2"/>
    <CardDefinition name="Cleave" type="Attack" rarity="Common" targetMode="All" attackType="Slice" cost="1" damage="8" numHits="1"/>
    <CardDefinition name="Flex" type="Skill" rarity="Uncommon" targetMode="Self" cost="0" gainEffect="Strength" gainEffectStack="2" exhaust="true"/>
    <CardDefinition name="Heavy Blow" type="Attack" rarity="Rare" targetMode="One" attackType="HeavyImpact" cost="2" damage="14" numHits="1"/>
    <CardDefinition name="Dazed" type="Status" isPlayable="false"/>
    <CardDefinition name="Wound" type="Status" isPlayable="false"/>
</CardDefinitions>"#;

pub const ENEMIES: &str = r#"<EnemyDefinitions>
    <EnemyDefinition name="Louse" maxHealth="12" intentionMode="LoopAll">
        <Intentions>
            <Intention damage="5"/>
            <Intention inflictEffect="Weak" inflictEffectStack="2"/>
        </Intentions>
    </EnemyDefinition>
    <EnemyDefinition name="Cultist" maxHealth="20" intentionMode="LoopLast">
        <Intentions>
            <Intention preparing="true" gainEffect="Strength" gainEffectStack="1"/>
            <Intention damage="6" cardToAdd="Dazed"/>
        </Intentions>
    </EnemyDefinition>
    <EnemyDefinition name="Jaw Worm" maxHealth="18" intentionMode="Random">
        <Intentions>
            <Intention damage="7"/>
            <Intention block="6"/>
            <Intention damage="4" gainEffect="Strength" gainEffectStack="2"/>
        </Intentions>
    </EnemyDefinition>
    <EnemyDefinition name="Guardian" maxHealth="40" intentionMode="LoopAll">
        <Intentions>
            <Intention block="10" gainEffect="Artifact" gainEffectStack="1"/>
            <Intention damage="9"/>
        </Intentions>
    </EnemyDefinition>
    <EnemyDefinition name="Heart" maxHealth="60" intentionMode="LoopLast">
        <Intentions>
            <Intention damage="12" inflictEffect="Vulnerable" inflictEffectStack="1"/>
        </Intentions>
    </EnemyDefinition>
</EnemyDefinitions>"#;

pub const ENCOUNTERS: &str = r#"<EncounterDefinitions>
    <EncounterDefinition difficulty="0">
        <Enemies><Enemy name="Louse"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="0">
        <Enemies><Enemy name="Cultist"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="1">
        <Enemies><Enemy name="Jaw Worm"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="1">
        <Enemies><Enemy name="Louse"/><Enemy name="Louse" renderBounds="1100,300,1300,500"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="2">
        <Enemies><Enemy name="Cultist"/><Enemy name="Jaw Worm" renderBounds="1100,300,1300,500"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="3">
        <Enemies><Enemy name="Guardian"/></Enemies>
    </EncounterDefinition>
    <EncounterDefinition difficulty="4">
        <Enemies><Enemy name="Heart"/></Enemies>
    </EncounterDefinition>
</EncounterDefinitions>"#;

pub fn source() -> InMemorySource {
    InMemorySource::new()
        .with(CatalogKind::Effect, EFFECTS)
        .with(CatalogKind::Card, CARDS)
        .with(CatalogKind::Enemy, ENEMIES)
        .with(CatalogKind::Encounter, ENCOUNTERS)
}

pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.load_all(&source()).expect("fixture catalog loads");
    catalog
}

/// One encounter per tier keeps full runs short.
pub fn short_config() -> RunConfig {
    RunConfig {
        encounters_per_tier: vec![1, 1, 1],
        ..RunConfig::default()
    }
}

/// Entity id of the first card in hand with this name.
pub fn hand_card(run: &Run<'_>, name: &str) -> Option<EntityId> {
    run.player()
        .piles()
        .hand()
        .iter()
        .find(|c| run.catalog().card(c.card_id).is_some_and(|d| d.name == name))
        .map(|c| c.entity_id)
}

/// Card names in hand order.
pub fn hand_names(run: &Run<'_>) -> Vec<String> {
    run.player()
        .piles()
        .hand()
        .iter()
        .filter_map(|c| run.catalog().card(c.card_id).map(|d| d.name.clone()))
        .collect()
}

/// Advance the clock in fixed steps.
pub fn advance(run: &mut Run<'_>, seconds: f32, step: f32) {
    let mut elapsed = 0.0;
    while elapsed < seconds {
        run.update(step);
        elapsed += step;
    }
}

/// Kill the current encounter and wait out the end delay.
pub fn win_encounter(run: &mut Run<'_>) {
    run.kill_all_enemies();
    run.update(run.config().encounter_end_delay);
}
