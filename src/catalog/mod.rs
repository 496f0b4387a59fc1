//! Definition tables: effects, cards, enemies and encounters.
//!
//! ## Loading
//!
//! Documents come from a `DefinitionSource` and are loaded in the order of
//! `CatalogKind::ALL`, because cards name effects, enemies name cards and
//! effects, and encounters name enemies. Loading a table that already has
//! entries is a no-op.
//!
//! ```
//! use tower_battle::catalog::{Catalog, CatalogKind, InMemorySource};
//!
//! let source = InMemorySource::new()
//!     .with(CatalogKind::Effect, r#"<EffectDefinitions>
//!         <EffectDefinition name="Strength" type="Buff" stackType="Intensity" modDealtDamage="true"/>
//!     </EffectDefinitions>"#)
//!     .with(CatalogKind::Card, r#"<CardDefinitions>
//!         <CardDefinition name="Flex" type="Skill" targetMode="Self" gainEffect="Strength" gainEffectStack="2"/>
//!     </CardDefinitions>"#)
//!     .with(CatalogKind::Enemy, "<EnemyDefinitions/>")
//!     .with(CatalogKind::Encounter, "<EncounterDefinitions/>");
//!
//! let mut catalog = Catalog::new();
//! catalog.load_all(&source).unwrap();
//!
//! let flex = catalog.card_by_name("Flex").unwrap();
//! assert_eq!(flex.gain_effect.map(|g| g.stack), Some(2));
//! ```
//!
//! ## Lookups
//!
//! Lookups return `Option`; a miss is never an error.

pub mod loader;
pub mod registry;
pub mod source;
pub mod xml;

use tracing::{debug, info};

pub use registry::{Named, Registry};
pub use source::{CatalogKind, DefinitionSource, DirectorySource, InMemorySource};

use crate::cards::{CardDefinition, CardId};
use crate::core::CatalogError;
use crate::effects::{EffectDefinition, EffectId};
use crate::encounters::{EncounterDefinition, EncounterId};
use crate::enemies::{EnemyDefinition, EnemyId};

const ONE_BYTE_IDS: usize = u8::MAX as usize + 1;
const TWO_BYTE_IDS: usize = u16::MAX as usize + 1;

impl Named for EffectDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for CardDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for EnemyDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

/// All definition tables of a game. Built once, then shared read-only.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    effects: Registry<EffectDefinition>,
    cards: Registry<CardDefinition>,
    enemies: Registry<EnemyDefinition>,
    /// Encounters are only referenced by id.
    encounters: Vec<EncounterDefinition>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table from `source`, skipping tables that are filled.
    pub fn load_all(&mut self, source: &dyn DefinitionSource) -> Result<(), CatalogError> {
        for kind in CatalogKind::ALL {
            if self.len_of(kind) > 0 {
                debug!(%kind, "Definitions already loaded");
                continue;
            }
            let text = source.read(kind)?;
            self.load(kind, &text)?;
        }
        Ok(())
    }

    /// Load one table from document text. Returns the number of
    /// definitions added, which is 0 when the table was already filled.
    pub fn load(&mut self, kind: CatalogKind, text: &str) -> Result<usize, CatalogError> {
        if self.len_of(kind) > 0 {
            debug!(%kind, "Definitions already loaded");
            return Ok(0);
        }

        let root = xml::parse_document(text)
            .map_err(|message| CatalogError::Malformed { kind, message })?;
        let elements = loader::definition_elements(&root, kind)?;

        match kind {
            CatalogKind::Effect => {
                loader::check_count(kind, elements.len(), TWO_BYTE_IDS)?;
                for element in elements {
                    self.effects.register_with(|index| {
                        loader::parse_effect(element, EffectId::new(index as u16))
                    });
                }
            }
            CatalogKind::Card => {
                loader::check_count(kind, elements.len(), ONE_BYTE_IDS)?;
                for element in elements {
                    let effects = &self.effects;
                    self.cards.register_with(|index| {
                        loader::parse_card(element, CardId::new(index as u8), effects)
                    });
                }
            }
            CatalogKind::Enemy => {
                loader::check_count(kind, elements.len(), TWO_BYTE_IDS)?;
                let parsed = elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        loader::parse_enemy(element, EnemyId::new(index as u16), &self.cards, &self.effects)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                for enemy in parsed {
                    self.enemies.register_with(|_| enemy);
                }
            }
            CatalogKind::Encounter => {
                loader::check_count(kind, elements.len(), ONE_BYTE_IDS)?;
                let parsed = elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        loader::parse_encounter(element, EncounterId::new(index as u8), &self.enemies)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.encounters.extend(parsed);
            }
        }

        let count = self.len_of(kind);
        info!(%kind, count, "Loaded definitions");
        Ok(count)
    }

    /// Number of definitions in one table.
    #[must_use]
    pub fn len_of(&self, kind: CatalogKind) -> usize {
        match kind {
            CatalogKind::Effect => self.effects.len(),
            CatalogKind::Card => self.cards.len(),
            CatalogKind::Enemy => self.enemies.len(),
            CatalogKind::Encounter => self.encounters.len(),
        }
    }

    // === Programmatic construction ===

    /// Add an effect built from its assigned id.
    pub fn insert_effect(
        &mut self,
        build: impl FnOnce(EffectId) -> EffectDefinition,
    ) -> Result<EffectId, CatalogError> {
        loader::check_count(CatalogKind::Effect, self.effects.len() + 1, TWO_BYTE_IDS)?;
        let index = self.effects.register_with(|index| build(EffectId::new(index as u16)));
        Ok(EffectId::new(index as u16))
    }

    /// Add a card built from its assigned id.
    pub fn insert_card(
        &mut self,
        build: impl FnOnce(CardId) -> CardDefinition,
    ) -> Result<CardId, CatalogError> {
        loader::check_count(CatalogKind::Card, self.cards.len() + 1, ONE_BYTE_IDS)?;
        let index = self.cards.register_with(|index| build(CardId::new(index as u8)));
        Ok(CardId::new(index as u8))
    }

    /// Add an enemy built from its assigned id.
    pub fn insert_enemy(
        &mut self,
        build: impl FnOnce(EnemyId) -> EnemyDefinition,
    ) -> Result<EnemyId, CatalogError> {
        loader::check_count(CatalogKind::Enemy, self.enemies.len() + 1, TWO_BYTE_IDS)?;
        let index = self.enemies.register_with(|index| build(EnemyId::new(index as u16)));
        Ok(EnemyId::new(index as u16))
    }

    /// Add an encounter built from its assigned id.
    pub fn insert_encounter(
        &mut self,
        build: impl FnOnce(EncounterId) -> EncounterDefinition,
    ) -> Result<EncounterId, CatalogError> {
        loader::check_count(CatalogKind::Encounter, self.encounters.len() + 1, ONE_BYTE_IDS)?;
        let id = EncounterId::new(self.encounters.len() as u8);
        self.encounters.push(build(id));
        Ok(id)
    }

    // === Lookups ===

    #[must_use]
    pub fn effect(&self, id: EffectId) -> Option<&EffectDefinition> {
        self.effects.get(usize::from(id.raw()))
    }

    #[must_use]
    pub fn effect_by_name(&self, name: &str) -> Option<&EffectDefinition> {
        self.effects.by_name(name)
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(usize::from(id.raw()))
    }

    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.by_name(name)
    }

    #[must_use]
    pub fn enemy(&self, id: EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(usize::from(id.raw()))
    }

    #[must_use]
    pub fn enemy_by_name(&self, name: &str) -> Option<&EnemyDefinition> {
        self.enemies.by_name(name)
    }

    #[must_use]
    pub fn encounter(&self, id: EncounterId) -> Option<&EncounterDefinition> {
        self.encounters.get(usize::from(id.raw()))
    }

    /// Card definitions in id order.
    #[must_use]
    pub fn cards(&self) -> &[CardDefinition] {
        self.cards.as_slice()
    }

    /// Encounter definitions in id order.
    #[must_use]
    pub fn encounters(&self) -> &[EncounterDefinition] {
        &self.encounters
    }

    #[must_use]
    pub fn effects(&self) -> &[EffectDefinition] {
        self.effects.as_slice()
    }

    #[must_use]
    pub fn enemies(&self) -> &[EnemyDefinition] {
        self.enemies.as_slice()
    }
}
