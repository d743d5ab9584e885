use crate::config::AuraFileConfig;
use crate::definition::AuraDefinition;
use crate::{BuildError, CatalogError};
use status_core::Aura;
use std::collections::HashMap;
use std::path::Path;

/// Registry of all aura definitions, loaded from TOML files
#[derive(Debug, Default)]
pub struct AuraCatalog {
    definitions: HashMap<String, AuraDefinition>,
}

impl AuraCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all aura definitions from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.load_dir(dir)?;
        tracing::info!(count = catalog.len(), dir = %dir.display(), "aura catalog loaded");
        Ok(catalog)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), CatalogError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        self.insert_str(&content, Some(path))?;
        tracing::debug!(path = %path.display(), "aura definition loaded");
        Ok(())
    }

    /// Parse one aura definition from a TOML string and add it
    pub fn parse_str(&mut self, content: &str) -> Result<&AuraDefinition, CatalogError> {
        let id = self.insert_str(content, None)?;
        self.definitions.get(&id).ok_or(CatalogError::Validation {
            message: format!("aura '{id}' missing after insert"),
            path: None,
        })
    }

    fn insert_str(&mut self, content: &str, path: Option<&Path>) -> Result<String, CatalogError> {
        let config: AuraFileConfig = toml::from_str(content).map_err(|e| CatalogError::Parse {
            error: e,
            path: path.map(Path::to_path_buf),
        })?;

        let definition = AuraDefinition::from_config(config).map_err(|e| CatalogError::Validation {
            message: e.to_string(),
            path: path.map(Path::to_path_buf),
        })?;

        if self.definitions.contains_key(&definition.id) {
            return Err(CatalogError::Validation {
                message: format!("duplicate aura id '{}'", definition.id),
                path: path.map(Path::to_path_buf),
            });
        }

        let id = definition.id.clone();
        self.definitions.insert(id.clone(), definition);
        Ok(id)
    }

    /// Get a definition by ID
    pub fn get(&self, id: &str) -> Option<&AuraDefinition> {
        self.definitions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// List all aura IDs
    pub fn aura_ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build a fresh, inactive aura by ID
    pub fn create(&self, id: &str) -> Result<Aura, BuildError> {
        let definition = self
            .get(id)
            .ok_or_else(|| BuildError::UnknownAura(id.to_string()))?;

        definition.build(self, 0)
    }

    /// Build every definition once, reporting the first dangling or cyclic reference
    pub fn validate(&self) -> Result<(), BuildError> {
        let mut ids: Vec<&str> = self.aura_ids().collect();
        ids.sort_unstable();
        for id in ids {
            self.create(id)?;
        }
        Ok(())
    }
}
