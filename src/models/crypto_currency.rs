// ============================================================================
// Enum : CryptoCurrency
// ============================================================================
// Les crypto-actifs supportés par le wallet (ensemble fixe)
//
// CONCEPTS RUST :
// 1. Enum C-like : variants sans données, Copy + Eq + Hash
// 2. FromStr : parsing depuis une String avec une erreur typée
// 3. Display : conversion vers le nom canonique
//
// Le nom canonique ("BTC", "ETHER", "BCH") est la valeur stockée dans les
// préférences. Le symbole ("BTC", "ETH", "BCH") est celui qu'on affiche.
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crypto-actif supporté
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoCurrency {
    #[serde(rename = "BTC")]
    Btc,

    #[serde(rename = "ETHER")]
    Ether,

    #[serde(rename = "BCH")]
    Bch,
}

/// Erreur renvoyée quand une chaîne ne correspond à aucun nom canonique
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown crypto currency: {0:?}")]
pub struct ParseCryptoCurrencyError(pub String);

impl CryptoCurrency {
    /// Tous les actifs, dans l'ordre d'affichage
    pub const ALL: [CryptoCurrency; 3] = [
        CryptoCurrency::Btc,
        CryptoCurrency::Ether,
        CryptoCurrency::Bch,
    ];

    /// Nom canonique (clé de persistance)
    pub fn name(&self) -> &'static str {
        match self {
            CryptoCurrency::Btc => "BTC",
            CryptoCurrency::Ether => "ETHER",
            CryptoCurrency::Bch => "BCH",
        }
    }

    /// Symbole de ticker (ex: "ETH" pour Ether)
    pub fn symbol(&self) -> &'static str {
        match self {
            CryptoCurrency::Btc => "BTC",
            CryptoCurrency::Ether => "ETH",
            CryptoCurrency::Bch => "BCH",
        }
    }

    /// Nom lisible
    pub fn label(&self) -> &'static str {
        match self {
            CryptoCurrency::Btc => "Bitcoin",
            CryptoCurrency::Ether => "Ether",
            CryptoCurrency::Bch => "Bitcoin Cash",
        }
    }

    /// Précision de l'unité de base (satoshi = 8, wei = 18)
    pub fn decimals(&self) -> usize {
        match self {
            CryptoCurrency::Btc | CryptoCurrency::Bch => 8,
            CryptoCurrency::Ether => 18,
        }
    }
}

impl fmt::Display for CryptoCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CONCEPT RUST : FromStr
/// - Permet d'écrire "BTC".parse::<CryptoCurrency>()
/// - Comparaison exacte : "btc" ou "ETH" ne sont PAS des noms canoniques
impl FromStr for CryptoCurrency {
    type Err = ParseCryptoCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CryptoCurrency::ALL
            .iter()
            .copied()
            .find(|currency| currency.name() == s)
            .ok_or_else(|| ParseCryptoCurrencyError(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("BTC".parse::<CryptoCurrency>(), Ok(CryptoCurrency::Btc));
        assert_eq!("ETHER".parse::<CryptoCurrency>(), Ok(CryptoCurrency::Ether));
        assert_eq!("BCH".parse::<CryptoCurrency>(), Ok(CryptoCurrency::Bch));
    }

    #[test]
    fn test_parse_is_exact() {
        // Le symbole ETH n'est pas le nom canonique
        assert!("ETH".parse::<CryptoCurrency>().is_err());
        assert!("btc".parse::<CryptoCurrency>().is_err());
        assert!(" BTC".parse::<CryptoCurrency>().is_err());
        assert_eq!(
            "DOGE".parse::<CryptoCurrency>(),
            Err(ParseCryptoCurrencyError("DOGE".to_string()))
        );
    }

    #[test]
    fn test_display_matches_name() {
        for currency in CryptoCurrency::ALL {
            assert_eq!(currency.to_string(), currency.name());
            assert_eq!(currency.name().parse::<CryptoCurrency>(), Ok(currency));
        }
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&CryptoCurrency::Ether).unwrap();
        assert_eq!(json, "\"ETHER\"");

        let parsed: CryptoCurrency = serde_json::from_str("\"BCH\"").unwrap();
        assert_eq!(parsed, CryptoCurrency::Bch);
    }
}
