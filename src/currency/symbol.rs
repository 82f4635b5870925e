// ============================================================================
// Symboles de devises selon la locale
// ============================================================================
// Associe un code ISO 4217 + une locale à un symbole d'affichage
//
// Règle : si la région de la locale utilise la devise, on affiche le symbole
// local ("$" pour USD en en-US), sinon le symbole international ("US$").
// Les autres codes ISO 4217 prennent le symbole fourni par iso_currency.
// ============================================================================

use std::fmt;
use std::str::FromStr;

use iso_currency::Currency;

use crate::currency::CurrencyError;

/// Locale minimale : langue + région optionnelle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Code langue ISO 639 en minuscules (ex: "en")
    pub language: String,

    /// Code région ISO 3166 en majuscules (ex: "US")
    pub region: Option<String>,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_lowercase(),
            region: region.map(|r| r.to_uppercase()),
        }
    }

    /// Locale de l'environnement (LC_ALL, LC_MONETARY puis LANG)
    ///
    /// Les valeurs "C" / "POSIX" ou illisibles donnent en-US.
    pub fn from_env() -> Self {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// La première variable non vide l'emporte, même si elle est illisible
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ["LC_ALL", "LC_MONETARY", "LANG"]
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en", Some("US"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Parse "en-US", "en_GB", "fr" ou "en_US.UTF-8"
impl FromStr for Locale {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Retire l'encodage (.UTF-8) et le modificateur (@euro)
        let base = s.split(['.', '@']).next().unwrap_or_default();
        let mut parts = base.split(['-', '_']);

        let language = parts.next().unwrap_or_default();
        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(CurrencyError::InvalidLocale(s.to_string()));
        }

        let region = match parts.next() {
            Some(r) if r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()) => Some(r),
            Some(r) if r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()) => Some(r),
            Some(_) => return Err(CurrencyError::InvalidLocale(s.to_string())),
            None => None,
        };

        Ok(Locale::new(language, region))
    }
}

/// Une devise fiat connue
struct FiatCurrency {
    code: &'static str,

    /// Symbole affiché hors des régions de la devise
    symbol: &'static str,

    /// Symbole affiché dans les régions de la devise
    local_symbol: &'static str,

    regions: &'static [&'static str],
}

const EUROZONE: &[&str] = &[
    "AT", "BE", "CY", "DE", "EE", "ES", "FI", "FR", "GR", "HR", "IE", "IT", "LT", "LU", "LV",
    "MT", "NL", "PT", "SI", "SK",
];

/// Devises fiat du sélecteur, avec leurs symboles local et international
const FIAT_CURRENCIES: &[FiatCurrency] = &[
    FiatCurrency { code: "USD", symbol: "US$", local_symbol: "$", regions: &["US", "PR", "EC", "SV"] },
    FiatCurrency { code: "EUR", symbol: "€", local_symbol: "€", regions: EUROZONE },
    FiatCurrency { code: "GBP", symbol: "£", local_symbol: "£", regions: &["GB", "IM", "JE", "GG"] },
    FiatCurrency { code: "JPY", symbol: "¥", local_symbol: "￥", regions: &["JP"] },
    FiatCurrency { code: "CNY", symbol: "CN¥", local_symbol: "¥", regions: &["CN"] },
    FiatCurrency { code: "AUD", symbol: "A$", local_symbol: "$", regions: &["AU"] },
    FiatCurrency { code: "CAD", symbol: "CA$", local_symbol: "$", regions: &["CA"] },
    FiatCurrency { code: "CHF", symbol: "CHF", local_symbol: "CHF", regions: &["CH", "LI"] },
    FiatCurrency { code: "HKD", symbol: "HK$", local_symbol: "$", regions: &["HK"] },
    FiatCurrency { code: "INR", symbol: "₹", local_symbol: "₹", regions: &["IN"] },
    FiatCurrency { code: "ISK", symbol: "ISK", local_symbol: "kr", regions: &["IS"] },
    FiatCurrency { code: "KRW", symbol: "₩", local_symbol: "₩", regions: &["KR"] },
    FiatCurrency { code: "NZD", symbol: "NZ$", local_symbol: "$", regions: &["NZ"] },
    FiatCurrency { code: "PLN", symbol: "PLN", local_symbol: "zł", regions: &["PL"] },
    FiatCurrency { code: "RUB", symbol: "RUB", local_symbol: "₽", regions: &["RU"] },
    FiatCurrency { code: "SEK", symbol: "SEK", local_symbol: "kr", regions: &["SE"] },
    FiatCurrency { code: "SGD", symbol: "SGD", local_symbol: "$", regions: &["SG"] },
    FiatCurrency { code: "THB", symbol: "THB", local_symbol: "฿", regions: &["TH"] },
    FiatCurrency { code: "TWD", symbol: "NT$", local_symbol: "$", regions: &["TW"] },
    FiatCurrency { code: "DKK", symbol: "DKK", local_symbol: "kr.", regions: &["DK", "GL", "FO"] },
    FiatCurrency { code: "BRL", symbol: "R$", local_symbol: "R$", regions: &["BR"] },
    FiatCurrency { code: "CLP", symbol: "CLP", local_symbol: "$", regions: &["CL"] },
];

fn find(code: &str) -> Option<&'static FiatCurrency> {
    FIAT_CURRENCIES.iter().find(|currency| currency.code == code)
}

/// Devise ISO 4217 pour un code exact en majuscules
fn iso_currency(code: &str) -> Option<Currency> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Currency::from_code(code)
}

/// Codes fiat supportés, dans l'ordre du sélecteur
pub fn supported_fiat_codes() -> impl Iterator<Item = &'static str> {
    FIAT_CURRENCIES.iter().map(|currency| currency.code)
}

/// Le code est-il une devise ISO 4217 ? (comparaison exacte, majuscules)
pub fn is_known_currency(code: &str) -> bool {
    iso_currency(code).is_some()
}

/// Retourne le symbole d'une devise pour une locale
///
/// Les devises du sélecteur distinguent symbole local et international ;
/// les autres codes ISO utilisent le symbole de la norme.
///
/// # Exemple
/// currency_symbol("USD", &Locale::new("en", Some("US")))? == "$"
/// currency_symbol("USD", &Locale::new("en", Some("GB")))? == "US$"
///
/// # Erreurs
/// `CurrencyError::UnknownCurrency` si le code n'est pas un code ISO 4217
pub fn currency_symbol(code: &str, locale: &Locale) -> Result<String, CurrencyError> {
    let iso = iso_currency(code).ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))?;

    let Some(currency) = find(code) else {
        let symbol = iso.symbol().to_string();
        return Ok(if symbol.is_empty() { code.to_string() } else { symbol });
    };

    let is_local = locale
        .region
        .as_deref()
        .map(|region| currency.regions.iter().any(|r| *r == region))
        .unwrap_or(false);

    let symbol = if is_local {
        currency.local_symbol
    } else {
        currency.symbol
    };

    Ok(symbol.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(s: &str) -> Locale {
        s.parse().unwrap()
    }

    #[test]
    fn test_symbol_in_home_region() {
        assert_eq!(currency_symbol("USD", &locale("en-US")).unwrap(), "$");
        assert_eq!(currency_symbol("GBP", &locale("en-GB")).unwrap(), "£");
        assert_eq!(currency_symbol("CAD", &locale("en-CA")).unwrap(), "$");
        assert_eq!(currency_symbol("EUR", &locale("fr-FR")).unwrap(), "€");
    }

    #[test]
    fn test_symbol_outside_home_region() {
        assert_eq!(currency_symbol("USD", &locale("en-GB")).unwrap(), "US$");
        assert_eq!(currency_symbol("CAD", &locale("en-US")).unwrap(), "CA$");
        assert_eq!(currency_symbol("GBP", &locale("en-US")).unwrap(), "£");
        // Sans région, toujours le symbole international
        assert_eq!(currency_symbol("USD", &locale("en")).unwrap(), "US$");
    }

    #[test]
    fn test_unknown_code_fails() {
        assert_eq!(
            currency_symbol("ZZZ", &locale("en-US")),
            Err(CurrencyError::UnknownCurrency("ZZZ".to_string()))
        );
        // Les codes sont sensibles à la casse
        assert!(currency_symbol("usd", &locale("en-US")).is_err());
        assert!(currency_symbol("", &locale("en-US")).is_err());
    }

    #[test]
    fn test_parse_locale_forms() {
        assert_eq!(locale("en-US"), Locale::new("en", Some("US")));
        assert_eq!(locale("en_GB"), Locale::new("en", Some("GB")));
        assert_eq!(locale("en_US.UTF-8"), Locale::new("en", Some("US")));
        assert_eq!(locale("de_DE@euro"), Locale::new("de", Some("DE")));
        assert_eq!(locale("fr"), Locale::new("fr", None));
        assert_eq!(locale("es-419"), Locale::new("es", Some("419")));
        assert_eq!(locale("EN-us").to_string(), "en-US");
    }

    #[test]
    fn test_parse_invalid_locale() {
        assert!("".parse::<Locale>().is_err());
        assert!("C".parse::<Locale>().is_err());
        assert!("en-USA".parse::<Locale>().is_err());
        assert!("12-US".parse::<Locale>().is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| pairs.iter().find(|(k, _)| k == var).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_locale_env_precedence() {
        let all = vars(&[("LC_ALL", "fr_FR.UTF-8"), ("LC_MONETARY", "de_DE"), ("LANG", "en_GB")]);
        assert_eq!(Locale::from_vars(all), Locale::new("fr", Some("FR")));

        let monetary = vars(&[("LC_ALL", ""), ("LC_MONETARY", "de_DE"), ("LANG", "en_GB")]);
        assert_eq!(Locale::from_vars(monetary), Locale::new("de", Some("DE")));

        let lang = vars(&[("LANG", "en_GB.UTF-8")]);
        assert_eq!(Locale::from_vars(lang), Locale::new("en", Some("GB")));
    }

    #[test]
    fn test_locale_env_fallback_to_en_us() {
        assert_eq!(Locale::from_vars(vars(&[])), Locale::new("en", Some("US")));
        assert_eq!(Locale::from_vars(vars(&[("LANG", "C")])), Locale::default());
        assert_eq!(Locale::from_vars(vars(&[("LANG", "C.UTF-8")])), Locale::default());
        assert_eq!(
            Locale::from_vars(vars(&[("LC_ALL", "POSIX"), ("LANG", "fr_FR")])),
            Locale::default()
        );
    }

    #[test]
    fn test_supported_codes_are_known() {
        let codes: Vec<&str> = supported_fiat_codes().collect();
        assert_eq!(codes.len(), 22);
        assert_eq!(codes.first(), Some(&"USD"));
        assert!(codes.iter().all(|code| is_known_currency(code)));
        assert!(!is_known_currency("ZZZ"));
        assert!(!is_known_currency("usd"));
    }

    #[test]
    fn test_iso_codes_outside_picker_resolve() {
        for code in ["MXN", "NOK", "ZAR", "TRY", "CZK", "HUF", "ILS", "AED"] {
            assert!(!supported_fiat_codes().any(|c| c == code));
            assert!(is_known_currency(code), "{} should be known", code);

            let symbol = currency_symbol(code, &locale("en-US")).unwrap();
            assert!(!symbol.is_empty(), "{} has an empty symbol", code);
        }
    }
}
