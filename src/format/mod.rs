//! Locale-aware display formatting for amounts, percentages and dates.
//!
//! Every function here is pure: the same inputs always give the same string,
//! and "now" is always passed in by the caller.

mod currency;
mod date;

pub use currency::{
    CurrencyFormat, PercentageFormat, currency_symbol, format_compact_currency, format_currency,
    format_percentage, parse_currency,
};
pub use date::{
    format_date, format_day_month, format_month_year, format_relative_date, format_time_ago,
};

/// Placed between a number and a trailing currency symbol, e.g. "87,45 €".
pub const NO_BREAK_SPACE: char = '\u{a0}';

/// Placed between a number and a trailing percent sign in French, e.g. "35,2 %".
pub const NARROW_NO_BREAK_SPACE: char = '\u{202f}';
