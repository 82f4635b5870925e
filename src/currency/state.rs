// ============================================================================
// Structure : CurrencyState
// ============================================================================
// Devise affichée par l'UI : crypto (et quel actif) ou fiat
//
// CONCEPTS RUST :
// 1. Générique <S: PreferenceStore> : le store est injecté
// 2. Constructeur unique init() : impossible d'utiliser un état non initialisé
// 3. &mut self : persistance + mise à jour mémoire en une seule opération
//
// L'objet est créé par main() et possédé par App (pas de singleton global).
//
// Machine à états :
//   init() ──► DisplayingCrypto(actif) ◄──► DisplayingFiat
//              set_displaying_crypto(true/false) ou toggle_display()
// ============================================================================

use tracing::{debug, info, warn};

use crate::currency::{symbol, CurrencyError, Locale};
use crate::models::CryptoCurrency;
use crate::prefs::{PreferenceStore, DEFAULT_CURRENCY, KEY_CURRENCY_CRYPTO_STATE, KEY_SELECTED_FIAT};

/// Préférence de devise d'affichage, adossée à un PreferenceStore
#[derive(Debug)]
pub struct CurrencyState<S> {
    prefs: S,
    crypto_currency: CryptoCurrency,
    is_displaying_crypto: bool,
}

impl<S: PreferenceStore> CurrencyState<S> {
    /// Lie le store et charge l'actif sélectionné
    ///
    /// - Clé absente : BTC
    /// - Valeur illisible : la clé est purgée, BTC est réécrit
    ///
    /// L'état démarre toujours en affichage crypto.
    pub fn init(prefs: S) -> Self {
        let stored = prefs.get_value(KEY_CURRENCY_CRYPTO_STATE, CryptoCurrency::Btc.name());

        let mut state = Self {
            prefs,
            crypto_currency: CryptoCurrency::Btc,
            is_displaying_crypto: true,
        };

        match stored.parse::<CryptoCurrency>() {
            Ok(currency) => {
                debug!(currency = %currency, "Loaded selected crypto currency");
                state.crypto_currency = currency;
            }
            Err(e) => {
                warn!(stored = %stored, error = %e, "Invalid stored crypto currency, resetting to BTC");
                state.prefs.remove_value(KEY_CURRENCY_CRYPTO_STATE);
                state.set_crypto_currency(CryptoCurrency::Btc);
            }
        }

        state
    }

    pub fn crypto_currency(&self) -> CryptoCurrency {
        self.crypto_currency
    }

    /// Persiste puis met à jour l'actif sélectionné
    ///
    /// L'emprunt exclusif garantit qu'aucun lecteur n'observe la valeur
    /// persistée avant la valeur en mémoire.
    pub fn set_crypto_currency(&mut self, currency: CryptoCurrency) {
        self.prefs.set_value(KEY_CURRENCY_CRYPTO_STATE, currency.name());
        self.crypto_currency = currency;
        info!(currency = %currency, "Selected crypto currency changed");
    }

    /// Bascule entre BTC et ETHER
    ///
    /// Tout actif autre que BTC (y compris BCH) bascule vers BTC : la
    /// bascule ne connaît que deux actifs.
    pub fn toggle_crypto_currency(&mut self) -> CryptoCurrency {
        let next = if self.crypto_currency == CryptoCurrency::Btc {
            CryptoCurrency::Ether
        } else {
            CryptoCurrency::Btc
        };
        self.set_crypto_currency(next);
        next
    }

    pub fn is_displaying_crypto(&self) -> bool {
        self.is_displaying_crypto
    }

    /// Non persisté : chaque lancement démarre en affichage crypto
    pub fn set_displaying_crypto(&mut self, displaying_crypto: bool) {
        self.is_displaying_crypto = displaying_crypto;
    }

    /// Passe de crypto à fiat et inversement
    pub fn toggle_display(&mut self) -> bool {
        self.is_displaying_crypto = !self.is_displaying_crypto;
        self.is_displaying_crypto
    }

    /// Code ISO de la devise fiat choisie (USD par défaut)
    pub fn fiat_unit(&self) -> String {
        self.prefs.get_value(KEY_SELECTED_FIAT, DEFAULT_CURRENCY)
    }

    /// Enregistre la devise fiat choisie
    ///
    /// # Erreurs
    /// `CurrencyError::UnknownCurrency` si le code n'est pas un code ISO 4217 ;
    /// la préférence n'est alors pas modifiée.
    pub fn set_fiat_unit(&mut self, code: &str) -> Result<(), CurrencyError> {
        if !symbol::is_known_currency(code) {
            return Err(CurrencyError::UnknownCurrency(code.to_string()));
        }
        self.prefs.set_value(KEY_SELECTED_FIAT, code);
        info!(fiat = %code, "Selected fiat currency changed");
        Ok(())
    }

    /// Symbole de `code` pour `locale` (ex: "GBP" + en-GB → "£")
    pub fn currency_symbol(&self, code: &str, locale: &Locale) -> Result<String, CurrencyError> {
        symbol::currency_symbol(code, locale)
    }

    pub fn prefs(&self) -> &S {
        &self.prefs
    }

    /// Rend le store (fin de vie de l'état)
    pub fn into_prefs(self) -> S {
        self.prefs
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;

    fn init_with(stored: Option<&str>) -> CurrencyState<MemoryPrefs> {
        let prefs = match stored {
            Some(value) => MemoryPrefs::with_values([(KEY_CURRENCY_CRYPTO_STATE, value)]),
            None => MemoryPrefs::new(),
        };
        CurrencyState::init(prefs)
    }

    #[test]
    fn test_init_without_stored_value() {
        let state = init_with(None);
        assert_eq!(state.crypto_currency(), CryptoCurrency::Btc);
        assert!(state.is_displaying_crypto());
    }

    #[test]
    fn test_init_with_stored_value() {
        let state = init_with(Some("BCH"));
        assert_eq!(state.crypto_currency(), CryptoCurrency::Bch);
        assert!(state.is_displaying_crypto());
    }

    #[test]
    fn test_init_with_garbage_resets_to_btc() {
        let state = init_with(Some("not-a-coin"));
        assert_eq!(state.crypto_currency(), CryptoCurrency::Btc);
        assert!(state.is_displaying_crypto());

        let prefs = state.into_prefs();
        assert_eq!(prefs.get_value(KEY_CURRENCY_CRYPTO_STATE, "<absent>"), "BTC");
    }

    #[test]
    fn test_set_crypto_currency_persists() {
        let mut state = init_with(None);
        for currency in CryptoCurrency::ALL {
            state.set_crypto_currency(currency);
            assert_eq!(state.crypto_currency(), currency);
            assert_eq!(
                state.prefs().get_value(KEY_CURRENCY_CRYPTO_STATE, ""),
                currency.name()
            );
        }
    }

    #[test]
    fn test_persisted_choice_survives_reinit() {
        let mut state = init_with(None);
        state.set_crypto_currency(CryptoCurrency::Ether);
        state.set_displaying_crypto(false);

        let state = CurrencyState::init(state.into_prefs());
        assert_eq!(state.crypto_currency(), CryptoCurrency::Ether);
        // L'affichage crypto/fiat n'est pas persisté
        assert!(state.is_displaying_crypto());
    }

    #[test]
    fn test_toggle_between_btc_and_ether() {
        let mut state = init_with(None);
        assert_eq!(state.toggle_crypto_currency(), CryptoCurrency::Ether);
        assert_eq!(state.crypto_currency(), CryptoCurrency::Ether);
        assert_eq!(state.toggle_crypto_currency(), CryptoCurrency::Btc);
        assert_eq!(state.prefs().get_value(KEY_CURRENCY_CRYPTO_STATE, ""), "BTC");
    }

    #[test]
    fn test_toggle_from_bch_collapses_to_btc() {
        // Comportement connu : la bascule ne gère que BTC et ETHER
        let mut state = init_with(Some("BCH"));
        assert_eq!(state.toggle_crypto_currency(), CryptoCurrency::Btc);
        assert_eq!(state.prefs().get_value(KEY_CURRENCY_CRYPTO_STATE, ""), "BTC");
    }

    #[test]
    fn test_display_mode_transitions() {
        let mut state = init_with(None);
        state.set_displaying_crypto(false);
        assert!(!state.is_displaying_crypto());
        state.set_displaying_crypto(true);
        assert!(state.is_displaying_crypto());

        assert!(!state.toggle_display());
        assert!(state.toggle_display());
    }

    #[test]
    fn test_fiat_unit() {
        let mut state = init_with(None);
        assert_eq!(state.fiat_unit(), DEFAULT_CURRENCY);

        state.set_fiat_unit("GBP").unwrap();
        assert_eq!(state.fiat_unit(), "GBP");

        assert_eq!(
            state.set_fiat_unit("ZZZ"),
            Err(CurrencyError::UnknownCurrency("ZZZ".to_string()))
        );
        assert_eq!(state.fiat_unit(), "GBP");

        // Code ISO absent du sélecteur : accepté
        state.set_fiat_unit("MXN").unwrap();
        assert_eq!(state.fiat_unit(), "MXN");
        assert!(state.currency_symbol("MXN", &Locale::default()).is_ok());
    }

    #[test]
    fn test_currency_symbol_lookup() {
        let state = init_with(None);
        let en_us = Locale::new("en", Some("US"));
        let en_gb = Locale::new("en", Some("GB"));

        assert_eq!(state.currency_symbol("USD", &en_us).unwrap(), "$");
        assert_eq!(state.currency_symbol("GBP", &en_gb).unwrap(), "£");
        assert!(state.currency_symbol("ZZZ", &en_us).is_err());
    }
}
