//! Definition loading tests.
//!
//! These tests load the fixture tables through the public catalog API:
//! - Document order assigns ids
//! - Cross-table references resolve by name
//! - Reloading is a no-op
//! - Directory sources and run configuration files

mod common;

use std::fs;

use tower_battle::cards::{AttackType, CardType, TargetMode};
use tower_battle::catalog::{Catalog, CatalogKind, DirectorySource, InMemorySource};
use tower_battle::core::{CatalogError, ConfigError, RunConfig};
use tower_battle::effects::{EffectType, StackType};
use tower_battle::enemies::IntentionMode;
use tower_battle::encounters::EncounterId;

#[test]
fn test_fixture_tables() {
    let catalog = common::catalog();

    assert_eq!(catalog.len_of(CatalogKind::Effect), 4);
    assert_eq!(catalog.len_of(CatalogKind::Card), 9);
    assert_eq!(catalog.len_of(CatalogKind::Enemy), 5);
    assert_eq!(catalog.len_of(CatalogKind::Encounter), 7);

    for (index, card) in catalog.cards().iter().enumerate() {
        assert_eq!(usize::from(card.id.raw()), index);
    }
    for (index, encounter) in catalog.encounters().iter().enumerate() {
        assert_eq!(encounter.id, EncounterId::new(index as u8));
    }
}

#[test]
fn test_references_resolve_by_name() {
    let catalog = common::catalog();

    let bash = catalog.card_by_name("Bash N' Smash").unwrap();
    let vulnerable = catalog.effect_by_name("Vulnerable").unwrap();
    assert_eq!(bash.card_type, CardType::Attack);
    assert_eq!(bash.target_mode, TargetMode::One);
    assert_eq!(bash.attack_type, AttackType::HeavyImpact);
    assert_eq!(bash.inflict_effect.map(|g| (g.effect, g.stack)), Some((vulnerable.id, 2)));
    assert_eq!(vulnerable.stack_type, StackType::Duration);

    let cultist = catalog.enemy_by_name("Cultist").unwrap();
    let dazed = catalog.card_by_name("Dazed").unwrap();
    assert_eq!(cultist.intention_mode, IntentionMode::LoopLast);
    assert!(cultist.intentions[0].preparing);
    assert_eq!(cultist.intentions[1].card_to_add, Some(dazed.id));
    assert!(!dazed.is_playable);

    let pair = catalog.encounter(EncounterId::new(3)).unwrap();
    let louse = catalog.enemy_by_name("Louse").unwrap();
    assert_eq!(pair.difficulty, 1);
    assert_eq!(pair.enemies.len(), 2);
    assert!(pair.enemies.iter().all(|slot| slot.enemy == louse.id));
    assert_eq!(pair.enemies[1].bounds, [1100.0, 300.0, 1300.0, 500.0]);
}

#[test]
fn test_reload_is_a_no_op() {
    let mut catalog = common::catalog();
    let before = catalog.cards().to_vec();

    catalog.load_all(&common::source()).unwrap();
    let added = catalog
        .load(CatalogKind::Card, r#"<CardDefinitions><CardDefinition name="Extra"/></CardDefinitions>"#)
        .unwrap();

    assert_eq!(added, 0);
    assert_eq!(catalog.cards(), before.as_slice());
    assert!(catalog.card_by_name("Extra").is_none());
}

#[test]
fn test_unknown_attributes_fall_back() {
    let mut catalog = Catalog::new();
    catalog
        .load(
            CatalogKind::Effect,
            r#"<EffectDefinitions><EffectDefinition name="Odd" type="Sideways" stackType="Sometimes"/></EffectDefinitions>"#,
        )
        .unwrap();

    let odd = catalog.effect_by_name("Odd").unwrap();
    assert_eq!(odd.effect_type, EffectType::Unknown);
    assert_eq!(odd.stack_type, StackType::None);
}

#[test]
fn test_missing_document() {
    let source = InMemorySource::new().with(CatalogKind::Effect, common::EFFECTS);
    let mut catalog = Catalog::new();

    let result = catalog.load_all(&source);
    assert!(matches!(result, Err(CatalogError::MissingSource { kind: CatalogKind::Card })));
    assert_eq!(catalog.len_of(CatalogKind::Effect), 4);
}

#[test]
fn test_malformed_document() {
    let mut catalog = Catalog::new();
    let result = catalog.load(CatalogKind::Effect, "<EffectDefinitions><EffectDefinition");
    assert!(matches!(result, Err(CatalogError::Malformed { kind: CatalogKind::Effect, .. })));
}

#[test]
fn test_directory_source() {
    let root = std::env::temp_dir().join(format!("tower-battle-catalog-{}", std::process::id()));
    fs::create_dir_all(&root).unwrap();
    let documents = [
        (CatalogKind::Effect, common::EFFECTS),
        (CatalogKind::Card, common::CARDS),
        (CatalogKind::Enemy, common::ENEMIES),
        (CatalogKind::Encounter, common::ENCOUNTERS),
    ];
    for (kind, text) in documents {
        fs::write(root.join(kind.file_name()), text).unwrap();
    }

    let mut catalog = Catalog::new();
    catalog.load_all(&DirectorySource::new(&root)).unwrap();
    assert_eq!(catalog.cards(), common::catalog().cards());

    let missing = Catalog::new().load_all(&DirectorySource::new(root.join("nowhere")));
    assert!(matches!(missing, Err(CatalogError::Io { kind: CatalogKind::Effect, .. })));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_config_from_toml() {
    let config = RunConfig::from_toml_str(
        r#"
        player_max_health = 50
        encounters_per_tier = [2, 2]
        "#,
    )
    .unwrap();

    assert_eq!(config.player_max_health, 50);
    assert_eq!(config.encounters_per_tier, vec![2, 2]);
    assert_eq!(config.start_energy, RunConfig::default().start_energy);

    let too_healthy = RunConfig::from_toml_str("player_max_health = 300");
    assert!(matches!(
        too_healthy,
        Err(ConfigError::Invalid { field: "player_max_health", .. })
    ));
    assert!(matches!(
        RunConfig::from_toml_str("encounters_per_tier = \"many\""),
        Err(ConfigError::Parse(_))
    ));
}
