//! Price normalization at ingest time and discount quotes at query time.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::cell::CellValue;
use crate::discounts::DiscountTable;

const NO_DISCOUNT: &str = "No Discount";

/// How a raw price cell was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCell {
    Numeric(Decimal),
    /// A numeric cell below zero. Catalog prices are non-negative, so the
    /// value is kept only for logging.
    Negative(Decimal),
    /// The literal "No Discount" marker.
    NoDiscount,
    /// Unparseable text, empty, error, boolean or date cells.
    Unrecognized,
}

impl PriceCell {
    /// The amount to store. Anything that is not numeric becomes zero.
    #[must_use]
    pub fn amount(self) -> Decimal {
        match self {
            PriceCell::Numeric(value) => value,
            PriceCell::Negative(_) | PriceCell::NoDiscount | PriceCell::Unrecognized => {
                Decimal::ZERO
            }
        }
    }
}

/// Classify a raw price cell. Never fails: the worst outcome is a zero amount.
#[must_use]
pub fn classify_price(cell: &CellValue) -> PriceCell {
    match cell {
        CellValue::Int(i) => numeric(Decimal::from(*i)),
        CellValue::Float(f) => Decimal::from_f64(*f).map_or(PriceCell::Unrecognized, numeric),
        CellValue::Text(text) if text.trim().eq_ignore_ascii_case(NO_DISCOUNT) => {
            PriceCell::NoDiscount
        }
        _ => PriceCell::Unrecognized,
    }
}

fn numeric(value: Decimal) -> PriceCell {
    if value.is_sign_negative() && !value.is_zero() {
        PriceCell::Negative(value)
    } else {
        PriceCell::Numeric(value)
    }
}

/// Standard and discounted price for one catalog row, before any formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// Trimmed category code; empty when the row had none.
    pub category: String,
    pub standard_price: Decimal,
    pub discounted_price: Decimal,
}

/// Apply the discount tier for `category` to `price`.
///
/// Known tiers yield `price * (1 - rate)` rounded to whole units with
/// banker's rounding (half to even). Unknown or blank categories leave the
/// price untouched.
#[must_use]
pub fn quote(price: Decimal, category: Option<&str>, discounts: &DiscountTable) -> PriceQuote {
    let category = category.map(str::trim).unwrap_or_default().to_string();
    let discounted_price = match discounts.rate(&category) {
        Some(rate) => (price * (Decimal::ONE - rate)).round_dp(0),
        None => price,
    };

    PriceQuote {
        category,
        standard_price: price,
        discounted_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_price_converts_numeric_cells() {
        assert_eq!(
            classify_price(&CellValue::Int(1500)).amount(),
            Decimal::new(1500, 0)
        );
        assert_eq!(
            classify_price(&CellValue::Float(1500.0)).amount(),
            Decimal::new(1500, 0)
        );
        assert_eq!(
            classify_price(&CellValue::Float(12.75)).amount(),
            Decimal::new(1275, 2)
        );
    }

    #[test]
    fn classify_price_maps_no_discount_to_zero() {
        let cell = classify_price(&CellValue::Text("  no discount ".into()));
        assert_eq!(cell, PriceCell::NoDiscount);
        assert_eq!(cell.amount(), Decimal::ZERO);
    }

    #[test]
    fn classify_price_zeroes_everything_else() {
        for cell in [
            CellValue::Text("garbage".into()),
            CellValue::Text("1500".into()),
            CellValue::Empty,
            CellValue::Error("#N/A".into()),
            CellValue::Bool(true),
            CellValue::Other("2024-01-01".into()),
        ] {
            let classified = classify_price(&cell);
            assert_eq!(classified, PriceCell::Unrecognized, "cell {cell:?}");
            assert_eq!(classified.amount(), Decimal::ZERO);
        }
    }

    #[test]
    fn classify_price_zeroes_negative_numbers() {
        let cell = classify_price(&CellValue::Float(-50.0));
        assert_eq!(cell, PriceCell::Negative(Decimal::new(-50, 0)));
        assert_eq!(cell.amount(), Decimal::ZERO);

        let cell = classify_price(&CellValue::Int(-1));
        assert_eq!(cell.amount(), Decimal::ZERO);

        // -0.0 is not below zero.
        assert_eq!(
            classify_price(&CellValue::Float(-0.0)).amount(),
            Decimal::ZERO
        );
    }

    #[test]
    fn classify_price_rejects_non_finite_floats() {
        assert_eq!(
            classify_price(&CellValue::Float(f64::NAN)),
            PriceCell::Unrecognized
        );
    }

    #[test]
    fn quote_applies_known_tier() {
        let q = quote(Decimal::new(1000, 0), Some("A"), &DiscountTable::default());
        assert_eq!(q.category, "A");
        assert_eq!(q.standard_price, Decimal::new(1000, 0));
        assert_eq!(q.discounted_price, Decimal::new(650, 0));
    }

    #[test]
    fn quote_leaves_unknown_tier_undiscounted() {
        let q = quote(Decimal::new(1000, 0), Some("Z"), &DiscountTable::default());
        assert_eq!(q.discounted_price, Decimal::new(1000, 0));
    }

    #[test]
    fn quote_trims_category_and_treats_missing_as_blank() {
        let q = quote(Decimal::new(200, 0), Some(" C "), &DiscountTable::default());
        assert_eq!(q.category, "C");
        assert_eq!(q.discounted_price, Decimal::new(170, 0));

        let q = quote(Decimal::new(200, 0), None, &DiscountTable::default());
        assert_eq!(q.category, "");
        assert_eq!(q.discounted_price, Decimal::new(200, 0));
    }

    #[test]
    fn quote_rounds_half_to_even() {
        let table = DiscountTable::default();
        // D = 5%: 50 * 0.95 = 47.5 -> 48, 30 * 0.95 = 28.5 -> 28
        assert_eq!(
            quote(Decimal::new(50, 0), Some("D"), &table).discounted_price,
            Decimal::new(48, 0)
        );
        assert_eq!(
            quote(Decimal::new(30, 0), Some("D"), &table).discounted_price,
            Decimal::new(28, 0)
        );
    }

    #[test]
    fn quote_keeps_fractional_price_for_unknown_tier() {
        let q = quote(Decimal::new(9999, 2), Some(""), &DiscountTable::default());
        assert_eq!(q.discounted_price, Decimal::new(9999, 2));
    }
}
