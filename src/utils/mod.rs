//! Utility functions for formatting
//!
//! Centralized display formatting for portfolio values, weights and scores so
//! tables and summaries render numbers the same way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$" prefix
    Usd,
    /// No currency symbol (for table cells, JSON-adjacent output)
    None,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal with `,` thousands separators and two decimal places,
/// optionally right-aligned to `width`.
///
/// # Examples
/// ```
/// use fundboard::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::Usd),
///     "$1,234.56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 12, CurrencySymbol::None),
///     "    1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = round2(value);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Usd => "$",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{}.{}", sign, prefix, with_separators, decimal_part);

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format as dollars: "$1,234.56"
///
/// # Examples
/// ```
/// use fundboard::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(100500)), "$100,500.00");
/// assert_eq!(format_currency(dec!(-500)), "-$500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Usd)
}

/// Format a fractional weight as a percentage: 0.2 → "20.00%"
///
/// # Examples
/// ```
/// use fundboard::utils::format_weight_pct;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_weight_pct(dec!(0.2)), "20.00%");
/// assert_eq!(format_weight_pct(dec!(0)), "0.00%");
/// ```
pub fn format_weight_pct(weight: Decimal) -> String {
    format!("{:.2}%", round2(weight.saturating_mul(Decimal::ONE_HUNDRED)))
}

/// Scores print without trailing zeros: 92 stays "92", 70.50 becomes "70.5"
pub fn format_score(score: Decimal) -> String {
    score.normalize().to_string()
}
