// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Générique <S> : le store de préférences est choisi par main() (ou les tests)
// 3. Encapsulation : CurrencyState n'est modifiable que via les méthodes de App
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::currency::{format_crypto, format_fiat, supported_fiat_codes, CurrencyState, Locale};
use crate::models::{Account, AccountRow, CryptoCurrency, PriceBook, PriceQuote};
use crate::prefs::PreferenceStore;

/// État principal de l'application
pub struct App<S> {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Tous les comptes du wallet
    pub accounts: Vec<Account>,

    /// Derniers cours connus
    pub prices: PriceBook,

    /// Index de la ligne sélectionnée parmi les comptes visibles
    pub selected_index: usize,

    /// Affiche les comptes de tous les actifs (sinon : actif sélectionné seulement)
    pub show_all_assets: bool,

    /// Locale utilisée pour les symboles fiat
    pub locale: Locale,

    /// Two-step quit : première pression de 'q' = confirmation demandée
    pub confirm_quit: bool,

    pub is_loading: bool,
    pub loading_message: Option<String>,

    /// Dernier message à afficher dans le footer (erreurs de cours, etc.)
    pub status_message: Option<String>,

    currency: CurrencyState<S>,
}

impl<S: PreferenceStore> App<S> {
    /// Crée l'application à partir d'un état de devise déjà initialisé
    pub fn new(accounts: Vec<Account>, currency: CurrencyState<S>, locale: Locale) -> Self {
        Self {
            running: true,
            accounts,
            prices: PriceBook::new(),
            selected_index: 0,
            show_all_assets: false,
            locale,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            status_message: None,
            currency,
        }
    }

    pub fn currency(&self) -> &CurrencyState<S> {
        &self.currency
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Comptes visibles et lignes affichées
    // ========================================================================

    /// Index (dans `accounts`) des comptes affichés
    pub fn visible_indices(&self) -> Vec<usize> {
        let selected = self.currency.crypto_currency();
        self.accounts
            .iter()
            .enumerate()
            .filter(|(_, account)| self.show_all_assets || account.asset == selected)
            .map(|(index, _)| index)
            .collect()
    }

    /// Compte correspondant à la ligne sélectionnée
    pub fn selected_account(&self) -> Option<&Account> {
        let index = *self.visible_indices().get(self.selected_index)?;
        self.accounts.get(index)
    }

    fn selected_account_mut(&mut self) -> Option<&mut Account> {
        let index = *self.visible_indices().get(self.selected_index)?;
        self.accounts.get_mut(index)
    }

    /// Construit les lignes de la liste pour le mode d'affichage courant
    ///
    /// CONCEPT RUST : Closure générique
    /// - `icon_for` fournit l'icône de chaque compte
    /// - App ne connaît pas le type de l'icône (il appartient à l'UI)
    pub fn rows<I>(&self, icon_for: impl Fn(&Account) -> I) -> Vec<AccountRow<I>> {
        self.visible_indices()
            .into_iter()
            .filter_map(|index| self.accounts.get(index))
            .map(|account| {
                AccountRow::new(
                    account.label.clone(),
                    self.amount_for(account),
                    icon_for(account),
                    account.archived,
                    account.watch_only,
                    account.default,
                )
            })
            .collect()
    }

    /// Montant d'un compte dans la devise affichée
    ///
    /// - Crypto : "0.50000000 BTC"
    /// - Fiat : "$20,000.00", ou "-- USD" tant qu'aucun cours n'est connu
    pub fn amount_for(&self, account: &Account) -> String {
        if self.currency.is_displaying_crypto() {
            return format_crypto(account.balance, account.asset);
        }

        let fiat = self.currency.fiat_unit();
        match self.prices.convert(account.asset, &fiat, account.balance) {
            Some(value) => {
                // Une préférence fiat corrompue s'affiche avec son code
                let symbol = self
                    .currency
                    .currency_symbol(&fiat, &self.locale)
                    .unwrap_or_else(|_| format!("{} ", fiat));
                format_fiat(value, &symbol)
            }
            None => format!("-- {}", fiat),
        }
    }

    /// Couples (actif, fiat) dont il faut récupérer le cours
    pub fn price_requests(&self) -> Vec<(CryptoCurrency, String)> {
        let fiat = self.currency.fiat_unit();
        let assets: HashSet<CryptoCurrency> = self.accounts.iter().map(|a| a.asset).collect();

        CryptoCurrency::ALL
            .iter()
            .filter(|asset| assets.contains(*asset))
            .map(|asset| (*asset, fiat.clone()))
            .collect()
    }

    pub fn update_price(&mut self, quote: PriceQuote) {
        debug!(asset = %quote.asset, fiat = %quote.fiat, price = quote.price, "Updating price book");
        self.prices.insert(quote);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.visible_indices().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ramène la sélection dans la liste visible après un changement de filtre
    fn clamp_selection(&mut self) {
        let max_index = self.visible_indices().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    // ========================================================================
    // Devise affichée
    // ========================================================================

    /// Bascule crypto ↔ fiat
    pub fn toggle_display(&mut self) {
        let crypto = self.currency.toggle_display();
        info!(displaying_crypto = crypto, "Display mode toggled");
    }

    /// Bascule BTC ↔ ETHER (BCH revient à BTC)
    pub fn toggle_crypto_currency(&mut self) {
        let currency = self.currency.toggle_crypto_currency();
        self.selected_index = 0;
        debug!(currency = %currency, "Crypto currency toggled");
    }

    /// Passe à la devise fiat suivante dans la liste supportée
    ///
    /// Retourne la nouvelle devise.
    pub fn next_fiat(&mut self) -> String {
        let current = self.currency.fiat_unit();
        let codes: Vec<&str> = supported_fiat_codes().collect();

        let next = match codes.iter().position(|code| *code == current) {
            Some(pos) => codes[(pos + 1) % codes.len()],
            None => codes[0],
        };

        if let Err(e) = self.currency.set_fiat_unit(next) {
            warn!(fiat = %next, error = %e, "Failed to select fiat currency");
            self.status_message = Some(e.to_string());
        }
        next.to_string()
    }

    pub fn toggle_show_all_assets(&mut self) {
        self.show_all_assets = !self.show_all_assets;
        self.clamp_selection();
    }

    // ========================================================================
    // Flags du compte sélectionné
    // ========================================================================

    pub fn toggle_archived_selected(&mut self) {
        if let Some(account) = self.selected_account_mut() {
            account.archived = !account.archived;
            info!(account = %account.label, archived = account.archived, "Archived flag changed");
        }
    }

    pub fn toggle_watch_only_selected(&mut self) {
        if let Some(account) = self.selected_account_mut() {
            account.watch_only = !account.watch_only;
            info!(account = %account.label, watch_only = account.watch_only, "Watch-only flag changed");
        }
    }

    /// Le compte sélectionné devient le compte par défaut de son actif
    pub fn make_selected_default(&mut self) {
        let Some(index) = self.visible_indices().get(self.selected_index).copied() else {
            return;
        };
        let asset = self.accounts[index].asset;

        for (i, account) in self.accounts.iter_mut().enumerate() {
            if account.asset == asset {
                account.default = i == index;
            }
        }
        info!(account = %self.accounts[index].label, asset = %asset, "Default account changed");
    }

    // ========================================================================
    // Quit / chargement / statut
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
