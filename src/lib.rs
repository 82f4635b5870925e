// ============================================================================
// WalletView - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Cours spot (Yahoo Finance)
pub mod app;       // État de l'application
pub mod config;    // Chemins et locale
pub mod currency;  // Devise affichée, symboles, formatage
pub mod models;    // Structures de données
pub mod prefs;     // Préférences clé-valeur
pub mod ui;        // Interface utilisateur
