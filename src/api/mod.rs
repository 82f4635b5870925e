// ============================================================================
// Module : api
// ============================================================================
// Clients API pour récupérer les cours des crypto-actifs
// ============================================================================

pub mod yahoo;  // Client API Yahoo Finance

// Re-export des fonctions principales
pub use yahoo::fetch_spot_price;
