// ============================================================================
// Module : currency
// ============================================================================
// Tout ce qui concerne la devise affichée :
// - state  : préférence crypto / fiat persistée
// - symbol : symbole d'une devise selon la locale
// - format : formatage des montants
// ============================================================================

pub mod format;
pub mod state;
pub mod symbol;

use thiserror::Error;

pub use format::{format_crypto, format_fiat};
pub use state::CurrencyState;
pub use symbol::{currency_symbol, is_known_currency, supported_fiat_codes, Locale};

/// Erreurs du module currency
///
/// CONCEPT RUST : thiserror
/// - #[error(...)] génère l'implémentation de Display
/// - L'enum reste comparable dans les tests (PartialEq)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Code qui n'est pas un code ISO 4217
    #[error("unknown currency code: {0:?}")]
    UnknownCurrency(String),

    #[error("invalid locale: {0:?}")]
    InvalidLocale(String),
}
