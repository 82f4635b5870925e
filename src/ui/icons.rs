// ============================================================================
// Icônes des comptes
// ============================================================================
// L'icône est un glyphe Unicode + une couleur ratatui. C'est le type `I`
// passé à AccountRow<I> par le dashboard.
// ============================================================================

use ratatui::style::Color;

use crate::models::{Account, CryptoCurrency};

/// Icône d'un compte dans la liste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub glyph: &'static str,
    pub color: Color,
}

/// Icône selon l'actif et l'état du compte
pub fn icon_for(account: &Account) -> Icon {
    if account.watch_only {
        return Icon {
            glyph: "👁",
            color: Color::Gray,
        };
    }

    match account.asset {
        CryptoCurrency::Btc => Icon {
            glyph: "₿",
            color: Color::Yellow,
        },
        CryptoCurrency::Ether => Icon {
            glyph: "Ξ",
            color: Color::Magenta,
        },
        CryptoCurrency::Bch => Icon {
            glyph: "Ƀ",
            color: Color::Green,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_for() {
        let mut account = Account::new("Ether".to_string(), CryptoCurrency::Ether, 1.0);
        assert_eq!(icon_for(&account).glyph, "Ξ");

        account.watch_only = true;
        assert_eq!(icon_for(&account).color, Color::Gray);
    }
}
