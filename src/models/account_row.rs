// ============================================================================
// Structure : AccountRow
// ============================================================================
// Une ligne de la liste des comptes, prête à être affichée
//
// CONCEPTS RUST :
// 1. Générique <I> : l'icône est un handle opaque choisi par l'appelant
// 2. Champs privés + accesseurs : titre, montant et icône ne changent jamais
// 3. Setters uniquement pour les trois flags
// ============================================================================

/// Ligne de compte dans la liste
///
/// Construite à chaque rendu de la liste, jetée quand la liste est
/// reconstruite. Aucune validation sur le texte.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow<I> {
    title: String,
    amount: String,
    icon: I,
    is_archived: bool,
    is_watch_only: bool,
    is_default: bool,
}

impl<I> AccountRow<I> {
    pub fn new(
        title: String,
        amount: String,
        icon: I,
        is_archived: bool,
        is_watch_only: bool,
        is_default: bool,
    ) -> Self {
        Self {
            title,
            amount,
            icon,
            is_archived,
            is_watch_only,
            is_default,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Montant déjà formaté (ex: "0.50000000 BTC" ou "$1,234.56")
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn icon(&self) -> &I {
        &self.icon
    }

    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    pub fn set_archived(&mut self, is_archived: bool) {
        self.is_archived = is_archived;
    }

    pub fn is_watch_only(&self) -> bool {
        self.is_watch_only
    }

    pub fn set_watch_only(&mut self, is_watch_only: bool) {
        self.is_watch_only = is_watch_only;
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    /// Formatte la ligne pour le widget liste
    ///
    /// Format : "Savings                       0.50000000 BTC  [default]"
    ///
    /// Le titre est tronqué à 24 caractères avec ellipse si nécessaire
    pub fn display(&self) -> String {
        let title = if self.title.chars().count() <= 24 {
            self.title.clone()
        } else {
            let truncated: String = self.title.chars().take(23).collect();
            format!("{}…", truncated)
        };

        let mut badges = Vec::new();
        if self.is_default {
            badges.push("[default]");
        }
        if self.is_watch_only {
            badges.push("[watch-only]");
        }
        if self.is_archived {
            badges.push("[archived]");
        }

        format!("{:<24} {:>22}  {}", title, self.amount, badges.join(" "))
            .trim_end()
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> AccountRow<&'static str> {
        AccountRow::new(
            "Savings".to_string(),
            "0.50000000 BTC".to_string(),
            "₿",
            false,
            false,
            false,
        )
    }

    #[test]
    fn test_account_row_new() {
        let row = sample_row();
        assert_eq!(row.title(), "Savings");
        assert_eq!(row.amount(), "0.50000000 BTC");
        assert_eq!(*row.icon(), "₿");
        assert!(!row.is_archived());
        assert!(!row.is_watch_only());
        assert!(!row.is_default());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut row = sample_row();

        row.set_archived(true);
        assert!(row.is_archived());
        assert!(!row.is_watch_only());
        assert!(!row.is_default());

        row.set_watch_only(true);
        assert!(row.is_archived());
        assert!(row.is_watch_only());
        assert!(!row.is_default());

        row.set_default(true);
        row.set_archived(false);
        assert!(!row.is_archived());
        assert!(row.is_watch_only());
        assert!(row.is_default());

        // Les champs fixes ne bougent pas
        assert_eq!(row.title(), "Savings");
        assert_eq!(row.amount(), "0.50000000 BTC");
        assert_eq!(*row.icon(), "₿");
    }

    #[test]
    fn test_no_validation() {
        let row = AccountRow::new(String::new(), "???".to_string(), (), true, true, true);
        assert_eq!(row.title(), "");
        assert!(row.is_archived() && row.is_watch_only() && row.is_default());
    }

    #[test]
    fn test_display_badges_and_truncation() {
        let mut row = AccountRow::new(
            "A very long account name that overflows".to_string(),
            "$10.00".to_string(),
            (),
            false,
            false,
            true,
        );
        let line = row.display();
        assert!(line.starts_with("A very long account nam…"));
        assert!(line.ends_with("[default]"));

        row.set_watch_only(true);
        assert!(row.display().ends_with("[default] [watch-only]"));

        assert!(sample_row().display().ends_with("0.50000000 BTC"));
    }
}
