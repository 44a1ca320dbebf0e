//! Currency and percentage formatting.
//!
//! Numbers are grouped with the separators of the selected locale and the
//! currency symbol is placed the way that locale writes it: after the number
//! with a no-break space in French ("1 234,50 €"), before it in English
//! ("$1,234.50").

use iso_currency::Currency;
use num_format::{Locale, ToFormattedString};

use crate::{
    Error,
    format::{NARROW_NO_BREAK_SPACE, NO_BREAK_SPACE},
};

const DEFAULT_CURRENCY: Currency = Currency::EUR;
const DEFAULT_FRACTION_DIGITS: u8 = 2;
const DEFAULT_PERCENTAGE_FRACTION_DIGITS: u8 = 1;
const MAX_FRACTION_DIGITS: u8 = 20;

/// Characters removed by [parse_currency] before parsing, alongside whitespace.
const CURRENCY_SYMBOLS: [char; 4] = ['€', '$', '£', '¥'];

/// Scale factors and suffixes for compact notation, largest first.
const COMPACT_UNITS: [(f64, &str); 3] = [(1e9, "Md"), (1e6, "M"), (1e3, "k")];

/// The number formatting conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberLocale {
    locale: Locale,
    /// Whether the currency symbol is written before the number.
    symbol_first: bool,
}

impl NumberLocale {
    fn french() -> Self {
        Self {
            locale: Locale::fr,
            symbol_first: false,
        }
    }

    /// Resolve a BCP 47 style tag such as "fr-FR" or "en_US".
    ///
    /// Falls back to the language subtag when there are no conventions for
    /// the full tag.
    fn parse(tag: &str) -> Result<Self, Error> {
        let tag = tag.trim().replace('_', "-");
        let language = tag.split('-').next().unwrap_or_default().to_lowercase();

        let locale = Locale::from_name(&tag)
            .or_else(|_| Locale::from_name(&language))
            .map_err(|_| Error::UnknownLocale(tag.clone()))?;

        Ok(Self {
            locale,
            symbol_first: matches!(language.as_str(), "en" | "ja" | "ko" | "zh"),
        })
    }
}

/// Options for [format_currency].
///
/// The default formats euros the French way with two fraction digits and no
/// explicit sign.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    currency: Currency,
    locale: NumberLocale,
    min_fraction_digits: u8,
    max_fraction_digits: u8,
    show_sign: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY,
            locale: NumberLocale::french(),
            min_fraction_digits: DEFAULT_FRACTION_DIGITS,
            max_fraction_digits: DEFAULT_FRACTION_DIGITS,
            show_sign: false,
        }
    }
}

impl CurrencyFormat {
    /// Create a format for an ISO 4217 currency code and a locale tag.
    ///
    /// # Errors
    /// Returns [Error::UnknownCurrency] or [Error::UnknownLocale] if either
    /// cannot be resolved.
    pub fn new(currency_code: &str, locale: &str) -> Result<Self, Error> {
        Ok(Self {
            currency: parse_currency_code(currency_code)?,
            locale: NumberLocale::parse(locale)?,
            ..Self::default()
        })
    }

    /// Set the minimum and maximum number of fraction digits.
    ///
    /// Amounts are rounded to `max` digits and trailing zeros are dropped
    /// down to `min` digits.
    ///
    /// # Errors
    /// Returns [Error::InvalidFractionDigits] if `min > max` or `max` is
    /// larger than 20.
    pub fn fraction_digits(mut self, min: u8, max: u8) -> Result<Self, Error> {
        validate_fraction_digits(min, max)?;
        self.min_fraction_digits = min;
        self.max_fraction_digits = max;
        Ok(self)
    }

    /// Round to whole currency units, as the dashboard cards and charts do.
    pub fn whole_units(mut self) -> Self {
        self.min_fraction_digits = 0;
        self.max_fraction_digits = 0;
        self
    }

    /// Prefix non-zero amounts with "+" or "-".
    pub fn show_sign(mut self, show_sign: bool) -> Self {
        self.show_sign = show_sign;
        self
    }
}

/// Options for [format_percentage].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageFormat {
    min_fraction_digits: u8,
    max_fraction_digits: u8,
    show_sign: bool,
}

impl Default for PercentageFormat {
    fn default() -> Self {
        Self {
            min_fraction_digits: DEFAULT_PERCENTAGE_FRACTION_DIGITS,
            max_fraction_digits: DEFAULT_PERCENTAGE_FRACTION_DIGITS,
            show_sign: false,
        }
    }
}

impl PercentageFormat {
    /// Create a percentage format with the given fraction digit bounds.
    ///
    /// # Errors
    /// Returns [Error::InvalidFractionDigits] if `min > max` or `max` is
    /// larger than 20.
    pub fn new(min_fraction_digits: u8, max_fraction_digits: u8) -> Result<Self, Error> {
        validate_fraction_digits(min_fraction_digits, max_fraction_digits)?;

        Ok(Self {
            min_fraction_digits,
            max_fraction_digits,
            show_sign: false,
        })
    }

    /// Prefix positive values with "+". Negative values always carry "-".
    pub fn show_sign(mut self, show_sign: bool) -> Self {
        self.show_sign = show_sign;
        self
    }
}

fn validate_fraction_digits(min: u8, max: u8) -> Result<(), Error> {
    if min > max || max > MAX_FRACTION_DIGITS {
        return Err(Error::InvalidFractionDigits { min, max });
    }

    Ok(())
}

fn parse_currency_code(code: &str) -> Result<Currency, Error> {
    Currency::from_code(&code.trim().to_uppercase())
        .ok_or_else(|| Error::UnknownCurrency(code.to_owned()))
}

/// Format the magnitude of `value` with the grouping and decimal separators
/// of `locale`.
fn format_decimal(
    value: f64,
    min_fraction_digits: u8,
    max_fraction_digits: u8,
    locale: Locale,
) -> String {
    let rounded = format!("{:.*}", max_fraction_digits as usize, value.abs());
    let (integer_part, fraction_part) = rounded.split_once('.').unwrap_or((&rounded, ""));

    let grouped = match integer_part.parse::<u64>() {
        Ok(integer) => integer.to_formatted_string(&locale),
        Err(_) => integer_part.to_owned(),
    };

    let significant = fraction_part.trim_end_matches('0').len();
    let kept = significant.max(min_fraction_digits as usize);
    let fraction_part = &fraction_part[..kept.min(fraction_part.len())];

    if fraction_part.is_empty() {
        grouped
    } else {
        format!("{grouped}{}{fraction_part}", locale.decimal())
    }
}

/// Format `amount` as money.
///
/// The magnitude is always rendered unsigned. When the format has
/// `show_sign` set and `amount` is not zero, "+" or "-" is prepended.
/// Without `show_sign` negative amounts lose their sign, so callers that
/// need it (e.g. an expense list) must add it themselves.
///
/// ```
/// use flowtrack::format::{CurrencyFormat, format_currency};
///
/// let format = CurrencyFormat::default().show_sign(true);
/// assert_eq!(format_currency(-87.45, &format), "-87,45\u{a0}€");
/// ```
pub fn format_currency(amount: f64, format: &CurrencyFormat) -> String {
    let number = format_decimal(
        amount,
        format.min_fraction_digits,
        format.max_fraction_digits,
        format.locale.locale,
    );
    let symbol = format.currency.symbol().to_string();

    let formatted = if format.locale.symbol_first {
        format!("{symbol}{number}")
    } else {
        format!("{number}{NO_BREAK_SPACE}{symbol}")
    };

    match (format.show_sign, amount) {
        (true, amount) if amount > 0.0 => format!("+{formatted}"),
        (true, amount) if amount < 0.0 => format!("-{formatted}"),
        _ => formatted,
    }
}

/// Format `value`, given in percentage points (35.2 means 35.2%), in French
/// notation, e.g. "35,2 %".
pub fn format_percentage(value: f64, format: &PercentageFormat) -> String {
    let number = format_decimal(
        value,
        format.min_fraction_digits,
        format.max_fraction_digits,
        Locale::fr,
    );
    let formatted = format!("{number}{NARROW_NO_BREAK_SPACE}%");

    if value < 0.0 {
        format!("-{formatted}")
    } else if format.show_sign && value > 0.0 {
        format!("+{formatted}")
    } else {
        formatted
    }
}

/// Format `amount` in French compact notation with at most one fraction
/// digit, e.g. "4,3 k €".
///
/// # Errors
/// Returns [Error::UnknownCurrency] if `currency_code` is not a known code.
pub fn format_compact_currency(amount: f64, currency_code: &str) -> Result<String, Error> {
    let currency = parse_currency_code(currency_code)?;
    let magnitude = amount.abs();
    let round_to_tenth = |value: f64| (value * 10.0).round() / 10.0;

    let compact = COMPACT_UNITS
        .iter()
        .find(|(scale, _)| round_to_tenth(magnitude / scale) >= 1.0);

    let number = match compact {
        Some((scale, suffix)) => format!(
            "{}{NO_BREAK_SPACE}{suffix}",
            format_decimal(magnitude / scale, 0, 1, Locale::fr)
        ),
        None => format_decimal(magnitude, 0, 1, Locale::fr),
    };

    let sign = if amount < 0.0 { "-" } else { "" };

    Ok(format!("{sign}{number}{NO_BREAK_SPACE}{}", currency.symbol()))
}

/// Parse user input such as "87,45 €" into a number.
///
/// Currency symbols and whitespace are removed, the first comma is treated
/// as the decimal separator and the longest numeric prefix is parsed, so
/// "12abc" gives 12. Returns `None` when no number can be read.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);

    let prefix = numeric_prefix(&cleaned);
    if prefix.is_empty() {
        return None;
    }

    prefix.parse().ok()
}

/// The longest prefix of `text` that reads as a decimal number with an
/// optional sign and exponent.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digit_count = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }

        digit_count += fraction_end - fraction_start;
        if digit_count > 0 {
            end = fraction_end;
        }
    }

    if digit_count == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }

        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }

        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    &text[..end]
}

/// The display symbol for an ISO 4217 code, or the code itself when it is
/// not a known currency.
pub fn currency_symbol(code: &str) -> String {
    match parse_currency_code(code) {
        Ok(currency) => currency.symbol().to_string(),
        Err(_) => code.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use num_format::Locale;

    use crate::{
        Error,
        format::{
            CurrencyFormat, PercentageFormat, currency_symbol, format_compact_currency,
            format_currency, format_percentage, parse_currency,
        },
    };

    #[test]
    fn formats_euros_the_french_way_by_default() {
        let got = format_currency(1234.5, &CurrencyFormat::default());

        let want = format!("1{}234,50\u{a0}€", Locale::fr.separator());
        assert_eq!(got, want);
    }

    #[test]
    fn negative_amount_keeps_sign_when_requested() {
        let format = CurrencyFormat::default().show_sign(true);

        assert_eq!(format_currency(-87.45, &format), "-87,45\u{a0}€");
    }

    #[test]
    fn positive_amount_gets_plus_sign_when_requested() {
        let format = CurrencyFormat::default().show_sign(true);

        assert_eq!(format_currency(65.2, &format), "+65,20\u{a0}€");
    }

    #[test]
    fn zero_never_gets_a_sign() {
        let format = CurrencyFormat::default().show_sign(true);

        assert_eq!(format_currency(0.0, &format), "0,00\u{a0}€");
    }

    #[test]
    fn magnitude_is_unsigned_without_show_sign() {
        assert_eq!(
            format_currency(-15.99, &CurrencyFormat::default()),
            "15,99\u{a0}€"
        );
    }

    #[test]
    fn whole_units_rounds_to_integer() {
        let format = CurrencyFormat::default().whole_units();

        assert_eq!(format_currency(450.3, &format), "450\u{a0}€");
        assert_eq!(format_currency(95.6, &format), "96\u{a0}€");
    }

    #[test]
    fn trailing_zeros_are_dropped_down_to_the_minimum() {
        let format = CurrencyFormat::default().fraction_digits(0, 2).unwrap();

        assert_eq!(format_currency(12.5, &format), "12,5\u{a0}€");
        assert_eq!(format_currency(12.0, &format), "12\u{a0}€");
        assert_eq!(format_currency(12.346, &format), "12,35\u{a0}€");
    }

    #[test]
    fn english_locale_puts_symbol_first() {
        let format = CurrencyFormat::new("USD", "en-US").unwrap();

        assert_eq!(format_currency(1234.5, &format), "$1,234.50");
    }

    #[test]
    fn currency_code_is_case_insensitive() {
        assert!(CurrencyFormat::new("eur", "fr-FR").is_ok());
    }

    #[test]
    fn rejects_unknown_currency() {
        let result = CurrencyFormat::new("XYZ", "fr-FR");

        assert_eq!(result, Err(Error::UnknownCurrency("XYZ".to_owned())));
    }

    #[test]
    fn rejects_unknown_locale() {
        let result = CurrencyFormat::new("EUR", "qq-QQ");

        assert!(matches!(result, Err(Error::UnknownLocale(_))));
    }

    #[test]
    fn rejects_minimum_digits_above_maximum() {
        let result = CurrencyFormat::default().fraction_digits(3, 2);

        assert_eq!(result, Err(Error::InvalidFractionDigits { min: 3, max: 2 }));
    }

    #[test]
    fn formats_percentage_points() {
        let got = format_percentage(35.2, &PercentageFormat::default());

        assert_eq!(got, "35,2\u{202f}%");
    }

    #[test]
    fn percentage_sign_only_added_to_positive_values() {
        let format = PercentageFormat::default().show_sign(true);

        assert_eq!(format_percentage(12.5, &format), "+12,5\u{202f}%");
        assert_eq!(format_percentage(-8.3, &format), "-8,3\u{202f}%");
        assert_eq!(format_percentage(0.0, &format), "0,0\u{202f}%");
    }

    #[test]
    fn percentage_respects_fraction_digits() {
        let format = PercentageFormat::new(0, 0).unwrap();

        assert_eq!(format_percentage(21.9, &format), "22\u{202f}%");
    }

    #[test]
    fn compact_currency_uses_thousands_suffix() {
        assert_eq!(
            format_compact_currency(4250.5, "EUR").unwrap(),
            "4,3\u{a0}k\u{a0}€"
        );
        assert_eq!(
            format_compact_currency(1_500_000.0, "EUR").unwrap(),
            "1,5\u{a0}M\u{a0}€"
        );
        assert_eq!(format_compact_currency(850.0, "EUR").unwrap(), "850\u{a0}€");
    }

    #[test]
    fn compact_currency_moves_up_a_unit_when_rounding_overflows() {
        assert_eq!(
            format_compact_currency(999_950.0, "EUR").unwrap(),
            "1\u{a0}M\u{a0}€"
        );
    }

    #[test]
    fn compact_currency_keeps_negative_sign() {
        assert_eq!(
            format_compact_currency(-2000.0, "EUR").unwrap(),
            "-2\u{a0}k\u{a0}€"
        );
    }

    #[test]
    fn parses_french_amount() {
        assert_eq!(parse_currency("87,45 €"), Some(87.45));
    }

    #[test]
    fn parses_amount_with_symbol_prefix_and_spaces() {
        assert_eq!(parse_currency("$ 1 234.5"), Some(1234.5));
    }

    #[test]
    fn parses_formatted_output() {
        let formatted = format_currency(-1234.5, &CurrencyFormat::default().show_sign(true));

        assert_eq!(parse_currency(&formatted), Some(-1234.5));
    }

    #[test]
    fn parses_leading_number_and_ignores_the_rest() {
        assert_eq!(parse_currency("12abc"), Some(12.0));
        assert_eq!(parse_currency("1.234,56"), Some(1.234));
    }

    #[test]
    fn non_numeric_text_is_no_value() {
        assert_eq!(parse_currency("abc"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("€"), None);
        assert_eq!(parse_currency("-."), None);
    }

    #[test]
    fn looks_up_currency_symbols() {
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("GBP"), "£");
        assert_eq!(currency_symbol("XYZ"), "XYZ");
    }
}
