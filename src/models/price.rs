// ============================================================================
// Structures : PriceQuote, PriceBook
// ============================================================================
// Cours spot d'un crypto-actif dans une devise fiat
//
// CONCEPTS RUST :
// 1. HashMap avec une clé tuple (actif, code fiat)
// 2. Option chaining pour la conversion
// ============================================================================

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::CryptoCurrency;

/// Cours d'un actif dans une devise fiat
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub asset: CryptoCurrency,

    /// Code ISO 4217 (ex: "USD")
    pub fiat: String,

    /// Prix d'une unité entière de l'actif
    pub price: f64,

    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(asset: CryptoCurrency, fiat: String, price: f64) -> Self {
        Self {
            asset,
            fiat,
            price,
            fetched_at: Utc::now(),
        }
    }
}

/// Derniers cours connus, un par couple (actif, fiat)
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    quotes: HashMap<(CryptoCurrency, String), PriceQuote>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remplace le cours précédent pour ce couple
    pub fn insert(&mut self, quote: PriceQuote) {
        self.quotes
            .insert((quote.asset, quote.fiat.clone()), quote);
    }

    pub fn get(&self, asset: CryptoCurrency, fiat: &str) -> Option<&PriceQuote> {
        self.quotes.get(&(asset, fiat.to_string()))
    }

    /// Convertit un montant d'actif en fiat (None si pas de cours)
    pub fn convert(&self, asset: CryptoCurrency, fiat: &str, amount: f64) -> Option<f64> {
        self.get(asset, fiat).map(|quote| quote.price * amount)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_with_and_without_quote() {
        let mut book = PriceBook::new();
        assert!(book.is_empty());
        assert_eq!(book.convert(CryptoCurrency::Btc, "USD", 1.0), None);

        book.insert(PriceQuote::new(CryptoCurrency::Btc, "USD".to_string(), 40_000.0));
        assert_eq!(book.convert(CryptoCurrency::Btc, "USD", 0.5), Some(20_000.0));
        assert_eq!(book.convert(CryptoCurrency::Btc, "EUR", 0.5), None);
        assert_eq!(book.convert(CryptoCurrency::Ether, "USD", 0.5), None);
    }

    #[test]
    fn test_insert_replaces_previous_quote() {
        let mut book = PriceBook::new();
        book.insert(PriceQuote::new(CryptoCurrency::Ether, "GBP".to_string(), 1_000.0));
        book.insert(PriceQuote::new(CryptoCurrency::Ether, "GBP".to_string(), 1_200.0));

        assert_eq!(book.len(), 1);
        assert_eq!(book.get(CryptoCurrency::Ether, "GBP").map(|q| q.price), Some(1_200.0));
    }
}
