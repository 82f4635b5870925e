// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod account;         // Compte du wallet (accounts.json)
pub mod account_row;     // Ligne affichée dans la liste des comptes
pub mod crypto_currency; // Crypto-actifs supportés
pub mod price;           // Cours spot

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use walletview::models::account_row::AccountRow;
// On peut faire : use walletview::models::AccountRow;
pub use account::{default_accounts, Account};
pub use account_row::AccountRow;
pub use crypto_currency::{CryptoCurrency, ParseCryptoCurrencyError};
pub use price::{PriceBook, PriceQuote};
