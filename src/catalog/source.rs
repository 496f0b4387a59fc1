//! Where definition documents come from.
//!
//! The catalog never touches the filesystem itself; it asks a
//! `DefinitionSource` for the text of each document.

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::CatalogError;

/// The four definition tables, in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    Effect,
    Card,
    Enemy,
    Encounter,
}

impl CatalogKind {
    /// Load order. Later tables reference earlier ones by name.
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Effect,
        CatalogKind::Card,
        CatalogKind::Enemy,
        CatalogKind::Encounter,
    ];

    /// Conventional document file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            CatalogKind::Effect => "EffectDefinitions.xml",
            CatalogKind::Card => "CardDefinitions.xml",
            CatalogKind::Enemy => "EnemyDefinitions.xml",
            CatalogKind::Encounter => "EncounterDefinitions.xml",
        }
    }

    /// Element name of one definition inside the document root.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            CatalogKind::Effect => "EffectDefinition",
            CatalogKind::Card => "CardDefinition",
            CatalogKind::Enemy => "EnemyDefinition",
            CatalogKind::Encounter => "EncounterDefinition",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::Effect => "effect",
            CatalogKind::Card => "card",
            CatalogKind::Enemy => "enemy",
            CatalogKind::Encounter => "encounter",
        };
        f.write_str(name)
    }
}

/// Provider of definition document text.
pub trait DefinitionSource {
    /// Return the full document for one table.
    fn read(&self, kind: CatalogKind) -> Result<String, CatalogError>;
}

/// Documents held in memory. Used by tests and embedders that bundle data.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    documents: FxHashMap<CatalogKind, String>,
}

impl InMemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: CatalogKind, text: impl Into<String>) -> Self {
        self.documents.insert(kind, text.into());
        self
    }
}

impl DefinitionSource for InMemorySource {
    fn read(&self, kind: CatalogKind) -> Result<String, CatalogError> {
        self.documents
            .get(&kind)
            .cloned()
            .ok_or(CatalogError::MissingSource { kind })
    }
}

/// Documents read from `<root>/<file_name>`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DefinitionSource for DirectorySource {
    fn read(&self, kind: CatalogKind) -> Result<String, CatalogError> {
        let path = self.root.join(kind.file_name());
        std::fs::read_to_string(&path).map_err(|source| CatalogError::Io { kind, path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new().with(CatalogKind::Card, "<CardDefinitions/>");

        assert_eq!(source.read(CatalogKind::Card).unwrap(), "<CardDefinitions/>");
        assert!(matches!(
            source.read(CatalogKind::Enemy),
            Err(CatalogError::MissingSource { kind: CatalogKind::Enemy })
        ));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let source = DirectorySource::new("/nonexistent/definitions");
        let err = source.read(CatalogKind::Effect).unwrap_err();

        assert!(matches!(err, CatalogError::Io { kind: CatalogKind::Effect, .. }));
        assert!(err.to_string().contains("EffectDefinitions.xml"));
    }

    #[test]
    fn test_load_order() {
        assert_eq!(CatalogKind::ALL[0], CatalogKind::Effect);
        assert_eq!(CatalogKind::ALL[3], CatalogKind::Encounter);
        assert_eq!(CatalogKind::Enemy.element_name(), "EnemyDefinition");
    }
}
