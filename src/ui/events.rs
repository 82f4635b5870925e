// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Poll avec timeout : la boucle ne bloque jamais plus de 250ms
// 3. Error handling avec Result
//
// Raccourcis : q quit, ↑↓/jk navigation, c crypto/fiat, t BTC/ETH,
// f devise fiat, s tous les actifs, x archive, w watch-only, m défaut,
// r rafraîchir les cours
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

// ============================================================================
// Enum Event
// ============================================================================
// CONCEPT RUST : Enums avec données
// - Chaque variant peut contenir des données différentes
// - Key(KeyEvent) : stocke l'événement clavier complet
// - Tick : variant sans données (unit variant)
//
// C'est plus puissant que les enums en C/Java !
// ============================================================================

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (pour animations, rafraîchissement)
    Tick,
}

// ============================================================================
// Structure EventHandler
// ============================================================================
// CONCEPT : Unit struct
// - Un seul handler pour toute l'application, sans état
// ============================================================================

/// Gestionnaire d'événements
pub struct EventHandler;

impl EventHandler {
    /// Crée un nouveau gestionnaire d'événements
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT RUST : Result et ?
    /// - poll() peut échouer (I/O error)
    /// - read() peut échouer
    /// - ? propage automatiquement les erreurs
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend max 250ms
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Si événement, le lit et le convertit
    pub fn next(&self) -> Result<Event> {
        // Poll avec timeout de 250ms
        // CONCEPT RUST : if expression
        // - if retourne une valeur en Rust (comme un ternaire ?)
        if event::poll(Duration::from_millis(250))? {
            // Il y a un événement, on le lit
            match event::read()? {
                // Événement clavier
                CrosstermEvent::Key(key) => {
                    // CONCEPT : Filter sur KeyEventKind
                    // Sur certains OS, on reçoit Press ET Release
                    // On ne veut gérer que Press pour éviter les doublons
                    if key.kind == KeyEventKind::Press {
                        Ok(Event::Key(key))
                    } else {
                        // Ignore Release, retourne Tick
                        Ok(Event::Tick)
                    }
                }

                // Autres événements (resize, mouse, etc.) ignorés pour l'instant
                _ => Ok(Event::Tick),
            }
        } else {
            // Timeout : pas d'événement, retourne Tick
            Ok(Event::Tick)
        }
    }
}

// ============================================================================
// Helper : Convertir KeyEvent en action
// ============================================================================
// CONCEPT RUST : Pattern matching avancé
// - Match sur KeyCode pour identifier la touche
// - Peut aussi matcher sur les modifiers (Ctrl, Alt, Shift)
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    // CONCEPT RUST : Pattern matching avec if let
    // - Destructure Event::Key et vérifie le KeyCode en une ligne
    // - Plus élégant que match pour un seul cas
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le haut ou 'k' (vim)
///
/// CONCEPT RUST : Multiple patterns avec |
/// - KeyCode::Up | KeyCode::Char('k') : match l'un ou l'autre
pub fn is_up_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    } else {
        false
    }
}

/// Retourne true si la touche est un des caractères donnés
fn is_char_event(event: &Event, chars: &[char]) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char(c) if chars.contains(&c))
    } else {
        false
    }
}

/// 'c' : bascule affichage crypto / fiat
pub fn is_display_toggle_event(event: &Event) -> bool {
    is_char_event(event, &['c', 'C'])
}

/// 't' : bascule BTC / ETH
pub fn is_asset_toggle_event(event: &Event) -> bool {
    is_char_event(event, &['t', 'T'])
}

/// 'f' : devise fiat suivante
pub fn is_next_fiat_event(event: &Event) -> bool {
    is_char_event(event, &['f', 'F'])
}

/// 's' : afficher les comptes de tous les actifs
pub fn is_show_all_event(event: &Event) -> bool {
    is_char_event(event, &['s', 'S'])
}

/// 'x' : archiver / désarchiver le compte sélectionné
pub fn is_archive_event(event: &Event) -> bool {
    is_char_event(event, &['x', 'X'])
}

/// 'w' : marquer le compte comme watch-only
pub fn is_watch_only_event(event: &Event) -> bool {
    is_char_event(event, &['w', 'W'])
}

/// 'm' : compte par défaut
pub fn is_make_default_event(event: &Event) -> bool {
    is_char_event(event, &['m', 'M'])
}

/// 'r' : rafraîchir les cours
pub fn is_refresh_event(event: &Event) -> bool {
    is_char_event(event, &['r', 'R'])
}

// ============================================================================
// Tests
// ============================================================================
