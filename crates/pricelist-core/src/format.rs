//! Display formatting for prices. Only the HTTP and CLI boundaries use this;
//! everything below them works with raw [`Decimal`] values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Separator used by the es-UY convention (`1.234.567`).
pub const DEFAULT_GROUP_SEPARATOR: char = '.';

/// Whole-unit, thousands-grouped price rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFormat {
    pub group_separator: char,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            group_separator: DEFAULT_GROUP_SEPARATOR,
        }
    }
}

impl PriceFormat {
    #[must_use]
    pub fn new(group_separator: char) -> Self {
        Self { group_separator }
    }

    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format_grouped(amount, self.group_separator)
    }
}

/// Render `amount` with zero decimals and `separator` between groups of three
/// digits. Midpoints round away from zero, matching spreadsheet display.
#[must_use]
pub fn format_grouped(amount: Decimal, separator: char) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
