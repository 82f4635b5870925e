// ============================================================================
// Module : prefs
// ============================================================================
// Stockage clé-valeur synchrone pour les préférences utilisateur
//
// CONCEPT RUST : Traits comme interfaces
// - PreferenceStore décrit le contrat (get / set / remove)
// - MemoryPrefs : implémentation en mémoire (tests)
// - FilePrefs : implémentation persistée dans un fichier JSON
// ============================================================================

pub mod file;   // Préférences persistées (prefs.json)
pub mod memory; // Préférences en mémoire

pub use file::FilePrefs;
pub use memory::MemoryPrefs;

/// Crypto-actif sélectionné (nom canonique, ex: "BTC")
pub const KEY_CURRENCY_CRYPTO_STATE: &str = "KEY_CURRENCY_CRYPTO_STATE";

/// Devise fiat sélectionnée (code ISO 4217)
pub const KEY_SELECTED_FIAT: &str = "ccurrency";

/// Devise fiat utilisée tant que l'utilisateur n'en a pas choisi
pub const DEFAULT_CURRENCY: &str = "USD";

/// Stockage clé-valeur de chaînes
///
/// Les opérations sont totales : une implémentation qui rencontre une erreur
/// d'I/O la journalise et garde la valeur en mémoire.
pub trait PreferenceStore {
    /// Retourne la valeur stockée, ou `default` si la clé est absente
    fn get_value(&self, key: &str, default: &str) -> String;

    fn set_value(&mut self, key: &str, value: &str);

    fn remove_value(&mut self, key: &str);

    fn has(&self, key: &str) -> bool;
}
