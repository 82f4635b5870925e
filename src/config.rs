// ============================================================================
// Configuration
// ============================================================================
// Emplacements des fichiers et locale, résolus au démarrage
//
// Variables d'environnement :
// - WALLETVIEW_DATA_DIR : répertoire de données
//   (défaut : ~/.local/share/walletview sur Linux)
// - WALLETVIEW_LOCALE : locale d'affichage (défaut : LC_ALL / LANG)
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::currency::Locale;
use crate::models::{default_accounts, Account};

const APP_DIR: &str = "walletview";

/// Configuration de l'application
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub locale: Locale,
}

impl Config {
    /// Charge la configuration depuis l'environnement
    ///
    /// # Erreurs
    /// Si WALLETVIEW_LOCALE est défini mais illisible
    pub fn load() -> Result<Self> {
        let data_dir = match std::env::var_os("WALLETVIEW_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".walletview")),
        };

        let locale = match std::env::var("WALLETVIEW_LOCALE") {
            Ok(value) if !value.is_empty() => value
                .parse()
                .with_context(|| format!("Invalid WALLETVIEW_LOCALE {:?}", value))?,
            _ => Locale::from_env(),
        };

        Ok(Self { data_dir, locale })
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locale: Locale::default(),
        }
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join("prefs.json")
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join("accounts.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Charge les comptes depuis un fichier JSON (tableau d'Account)
///
/// Fichier absent : comptes par défaut. Fichier mal formé : erreur.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    if !path.exists() {
        info!(path = %path.display(), "No accounts file, using default accounts");
        return Ok(default_accounts());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read accounts file {}", path.display()))?;
    let accounts: Vec<Account> = serde_json::from_str(&content)
        .with_context(|| format!("Malformed accounts file {}", path.display()))?;

    debug!(path = %path.display(), count = accounts.len(), "Accounts loaded");
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CryptoCurrency;
    use tempfile::tempdir;

    #[test]
    fn test_derived_paths() {
        let config = Config::with_data_dir("/tmp/wv");
        assert_eq!(config.prefs_path(), PathBuf::from("/tmp/wv/prefs.json"));
        assert_eq!(config.accounts_path(), PathBuf::from("/tmp/wv/accounts.json"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/wv/logs"));
    }

    #[test]
    fn test_missing_accounts_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let accounts = load_accounts(&dir.path().join("accounts.json")).unwrap();
        assert_eq!(accounts, default_accounts());
    }

    #[test]
    fn test_load_accounts_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"[
                {"label": "Spending", "asset": "BTC", "balance": 0.1, "default": true},
                {"label": "Cold storage", "asset": "BTC", "balance": 2.0, "watch_only": true},
                {"label": "Ether", "asset": "ETHER", "balance": 3.5}
            ]"#,
        )
        .unwrap();

        let accounts = load_accounts(&path).unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(accounts[1].watch_only);
        assert_eq!(accounts[2].asset, CryptoCurrency::Ether);

        fs::write(&path, r#"[{"label": "Bad", "asset": "DOGE", "balance": 1}]"#).unwrap();
        assert!(load_accounts(&path).is_err());
    }
}
