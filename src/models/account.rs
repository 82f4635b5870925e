// ============================================================================
// Structure : Account
// ============================================================================
// Un compte du wallet tel que lu depuis accounts.json
//
// CONCEPT RUST : Serde
// - #[derive(Deserialize)] génère le parsing JSON
// - #[serde(default)] : les flags absents valent false
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::CryptoCurrency;

/// Compte du wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Nom affiché (ex: "My Bitcoin Wallet")
    pub label: String,

    /// Actif du compte
    pub asset: CryptoCurrency,

    /// Solde en unités entières (ex: 0.5 BTC)
    pub balance: f64,

    #[serde(default)]
    pub archived: bool,

    /// Compte importé sans clé privée (lecture seule)
    #[serde(default)]
    pub watch_only: bool,

    #[serde(default)]
    pub default: bool,
}

impl Account {
    pub fn new(label: String, asset: CryptoCurrency, balance: f64) -> Self {
        Self {
            label,
            asset,
            balance,
            archived: false,
            watch_only: false,
            default: false,
        }
    }
}

/// Comptes utilisés quand aucun fichier accounts.json n'existe
///
/// Un compte par actif, le premier compte BTC est le compte par défaut.
pub fn default_accounts() -> Vec<Account> {
    let mut accounts: Vec<Account> = CryptoCurrency::ALL
        .iter()
        .map(|asset| Account::new(format!("My {} Wallet", asset.label()), *asset, 0.0))
        .collect();

    if let Some(first) = accounts.first_mut() {
        first.default = true;
    }

    accounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_with_missing_flags() {
        let json = r#"{"label": "Savings", "asset": "BTC", "balance": 0.25}"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.label, "Savings");
        assert_eq!(account.asset, CryptoCurrency::Btc);
        assert_eq!(account.balance, 0.25);
        assert!(!account.archived);
        assert!(!account.watch_only);
        assert!(!account.default);
    }

    #[test]
    fn test_default_accounts() {
        let accounts = default_accounts();
        assert_eq!(accounts.len(), CryptoCurrency::ALL.len());
        assert_eq!(accounts[0].asset, CryptoCurrency::Btc);
        assert!(accounts[0].default);
        assert_eq!(accounts.iter().filter(|a| a.default).count(), 1);
    }
}
