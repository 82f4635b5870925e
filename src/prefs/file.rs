// ============================================================================
// FilePrefs : préférences persistées dans un fichier JSON
// ============================================================================
// Le fichier contient un objet JSON plat : { "clé": "valeur", ... }
//
// CONCEPTS RUST :
// 1. anyhow::Context pour des erreurs d'I/O lisibles
// 2. Écriture atomique : fichier temporaire puis rename
// 3. Erreurs d'écriture journalisées (le trait est total)
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::prefs::PreferenceStore;

/// Préférences stockées dans un fichier JSON, écrites à chaque modification
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,

    // BTreeMap : ordre stable des clés dans le fichier
    values: BTreeMap<String, String>,
}

impl FilePrefs {
    /// Charge le fichier de préférences
    ///
    /// Un fichier absent donne un store vide ; un fichier illisible ou mal
    /// formé est une erreur.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Malformed preferences file {}", path.display()))?
        } else {
            debug!(path = %path.display(), "No preferences file yet, starting empty");
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = values.len(), "Preferences loaded");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Écrit toutes les valeurs sur disque
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize preferences")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }

    fn persist_or_warn(&self, key: &str) {
        if let Err(e) = self.persist() {
            warn!(key = %key, path = %self.path.display(), error = ?e, "Failed to persist preferences");
        }
    }
}

impl PreferenceStore for FilePrefs {
    fn get_value(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_value(&mut self, key: &str, value: &str) {
        debug!(key = %key, value = %value, "Setting preference");
        self.values.insert(key.to_string(), value.to_string());
        self.persist_or_warn(key);
    }

    fn remove_value(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            debug!(key = %key, "Removing preference");
            self.persist_or_warn(key);
        }
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
