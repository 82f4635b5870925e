// ============================================================================
// Formatage des montants
// ============================================================================

use crate::models::CryptoCurrency;

/// Décimales affichées pour un montant crypto
const CRYPTO_DISPLAY_DECIMALS: usize = 8;

/// Formatte un montant crypto : "0.50000000 BTC"
pub fn format_crypto(amount: f64, asset: CryptoCurrency) -> String {
    let decimals = asset.decimals().min(CRYPTO_DISPLAY_DECIMALS);
    format!("{:.*} {}", decimals, amount, asset.symbol())
}

/// Formatte un montant fiat avec séparateur de milliers : "$1,234.56"
pub fn format_fiat(amount: f64, symbol: &str) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    // Insère une virgule toutes les 3 chiffres en partant de la droite
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // -0.00 s'affiche sans signe
    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_crypto() {
        assert_eq!(format_crypto(0.5, CryptoCurrency::Btc), "0.50000000 BTC");
        assert_eq!(format_crypto(1.25, CryptoCurrency::Ether), "1.25000000 ETH");
        assert_eq!(format_crypto(0.0, CryptoCurrency::Bch), "0.00000000 BCH");
    }

    #[test]
    fn test_format_fiat_grouping() {
        assert_eq!(format_fiat(0.0, "$"), "$0.00");
        assert_eq!(format_fiat(999.999, "$"), "$1,000.00");
        assert_eq!(format_fiat(1234.5, "£"), "£1,234.50");
        assert_eq!(format_fiat(1_234_567.891, "US$"), "US$1,234,567.89");
    }

    #[test]
    fn test_format_fiat_negative() {
        assert_eq!(format_fiat(-42.1, "€"), "-€42.10");
        assert_eq!(format_fiat(-0.001, "$"), "$0.00");
    }
}
