//! Locale-aware currency strings for revenue display.

use crate::errors::DashboardError;

/// Non-breaking space placed between symbol and amount in spaced layouts.
const NBSP: char = '\u{a0}';

/// Number and symbol layout for one locale.
struct LocaleFormat {
    id: &'static str,
    group: char,
    decimal: char,
    symbol_after: bool,
    spaced: bool,
    /// Currency code to display symbol; unknown codes print as the code itself.
    symbols: &'static [(&'static str, &'static str)],
}

static LOCALES: [LocaleFormat; 6] = [
    LocaleFormat {
        id: "en_US",
        group: ',',
        decimal: '.',
        symbol_after: false,
        spaced: false,
        symbols: &[("USD", "$"), ("AUD", "A$"), ("BRL", "R$"), ("EUR", "€")],
    },
    LocaleFormat {
        id: "en_AU",
        group: ',',
        decimal: '.',
        symbol_after: false,
        spaced: false,
        symbols: &[("AUD", "$"), ("USD", "USD"), ("BRL", "BRL"), ("EUR", "EUR")],
    },
    LocaleFormat {
        id: "es_CO",
        group: '.',
        decimal: ',',
        symbol_after: false,
        spaced: true,
        symbols: &[("COP", "$"), ("AUD", "AU$"), ("USD", "US$"), ("BRL", "R$"), ("EUR", "€")],
    },
    LocaleFormat {
        id: "pt_BR",
        group: '.',
        decimal: ',',
        symbol_after: false,
        spaced: true,
        symbols: &[("BRL", "R$"), ("AUD", "AU$"), ("USD", "US$"), ("EUR", "€")],
    },
    LocaleFormat {
        id: "id_ID",
        group: '.',
        decimal: ',',
        symbol_after: false,
        spaced: false,
        symbols: &[("IDR", "Rp"), ("AUD", "AU$"), ("USD", "US$"), ("BRL", "R$"), ("EUR", "€")],
    },
    LocaleFormat {
        id: "de_DE",
        group: '.',
        decimal: ',',
        symbol_after: true,
        spaced: true,
        symbols: &[("EUR", "€"), ("AUD", "AU$"), ("USD", "$"), ("BRL", "R$")],
    },
];

/// Locale identifiers accepted by [`format_currency`].
pub fn supported_locales() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|locale| locale.id)
}

/// Format `amount` as a currency string for `locale`, rounded to cents.
///
/// `locale` may use `_` or `-` (`es_CO`, `es-CO`). Errors on unknown locales
/// and non-finite amounts.
pub fn format_currency(
    amount: f64,
    currency: &str,
    locale: &str,
) -> Result<String, DashboardError> {
    let normalized = locale.trim().replace('-', "_");
    let format = LOCALES
        .iter()
        .find(|candidate| candidate.id.eq_ignore_ascii_case(&normalized))
        .ok_or_else(|| {
            DashboardError::Configuration(format!(
                "unsupported locale '{locale}' (expected one of: {})",
                supported_locales().collect::<Vec<_>>().join(", ")
            ))
        })?;
    if !amount.is_finite() {
        return Err(DashboardError::Configuration(format!(
            "cannot format non-finite amount {amount}"
        )));
    }

    let code = currency.trim().to_ascii_uppercase();
    let symbol = format
        .symbols
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, symbol)| (*symbol).to_string())
        .unwrap_or(code);

    let cents = (amount.abs() * 100.0).round() as u128;
    let number = format!(
        "{}{}{:02}",
        format_grouped(cents / 100, format.group),
        format.decimal,
        cents % 100
    );
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let gap = if format.spaced {
        NBSP.to_string()
    } else {
        String::new()
    };
    Ok(if format.symbol_after {
        format!("{sign}{number}{gap}{symbol}")
    } else {
        format!("{sign}{symbol}{gap}{number}")
    })
}

/// Insert `separator` between each group of three integer digits.
pub fn format_grouped(value: u128, separator: char) -> String {
    let raw = value.to_string();
    let mut grouped_reversed = String::with_capacity(raw.len() + (raw.len() / 3));
    for (idx, ch) in raw.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(separator);
        }
        grouped_reversed.push(ch);
    }
    grouped_reversed.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(format_grouped(0, ','), "0");
        assert_eq!(format_grouped(999, ','), "999");
        assert_eq!(format_grouped(1_000, ','), "1,000");
        assert_eq!(format_grouped(13_591_643, '.'), "13.591.643");
    }

    #[test]
    fn formats_default_locale() {
        assert_eq!(
            format_currency(1_234_567.891, "AUD", "es_CO").unwrap(),
            "AU$\u{a0}1.234.567,89"
        );
        assert_eq!(format_currency(0.0, "AUD", "es_CO").unwrap(), "AU$\u{a0}0,00");
    }

    #[test]
    fn formats_other_locales() {
        assert_eq!(format_currency(1234.5, "USD", "en_US").unwrap(), "$1,234.50");
        assert_eq!(format_currency(1234.5, "AUD", "en-AU").unwrap(), "$1,234.50");
        assert_eq!(format_currency(1234.5, "EUR", "de_DE").unwrap(), "1.234,50\u{a0}€");
        assert_eq!(format_currency(1234.5, "IDR", "id_ID").unwrap(), "Rp1.234,50");
        assert_eq!(format_currency(-12.0, "BRL", "pt_BR").unwrap(), "-R$\u{a0}12,00");
        assert_eq!(format_currency(5.0, "XYZ", "en_US").unwrap(), "XYZ5.00");
    }

    #[test]
    fn rejects_unknown_locale_and_non_finite_amounts() {
        assert!(matches!(
            format_currency(1.0, "AUD", "xx_YY"),
            Err(DashboardError::Configuration(_))
        ));
        assert!(format_currency(f64::NAN, "AUD", "es_CO").is_err());
        assert!(format_currency(f64::INFINITY, "AUD", "es_CO").is_err());
    }
}
