use std::collections::HashMap;

use crate::prefs::PreferenceStore;

/// Préférences en mémoire, perdues à la fin du process
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crée un store prérempli (pratique dans les tests)
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get_value(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_value(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove_value(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let mut prefs = MemoryPrefs::new();
        assert_eq!(prefs.get_value("k", "fallback"), "fallback");
        assert!(!prefs.has("k"));

        prefs.set_value("k", "v");
        assert_eq!(prefs.get_value("k", "fallback"), "v");
        assert!(prefs.has("k"));

        prefs.remove_value("k");
        assert_eq!(prefs.get_value("k", "fallback"), "fallback");

        // Supprimer une clé absente ne fait rien
        prefs.remove_value("k");
        assert!(!prefs.has("k"));
    }

    #[test]
    fn test_with_values() {
        let prefs = MemoryPrefs::with_values([("a", "1"), ("b", "2")]);
        assert_eq!(prefs.get_value("a", ""), "1");
        assert_eq!(prefs.get_value("b", ""), "2");
    }
}
