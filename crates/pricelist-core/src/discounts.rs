use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ConfigError;

/// Tier code → discount rate (`0.35` = 35% off).
///
/// Codes are matched exactly after the caller trims them; any code not in
/// the table gets no discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTable {
    tiers: BTreeMap<String, Decimal>,
}

impl Default for DiscountTable {
    fn default() -> Self {
        let pct = |n: i64| Decimal::new(n, 2);
        Self::new([
            ("A", pct(35)),
            ("B", pct(35)),
            ("N", pct(35)),
            ("F", pct(20)),
            ("C", pct(15)),
            ("E", pct(30)),
            ("S", pct(20)),
            ("D", pct(5)),
        ])
    }
}

impl DiscountTable {
    pub fn new<I, K>(tiers: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        Self {
            tiers: tiers.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Discount rate for a tier code, or `None` when the code is not a tier.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.tiers.get(code).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DiscountsFile {
    tiers: BTreeMap<String, Decimal>,
}

/// Load and validate a discount table from a YAML file of the form
/// `tiers: { A: 0.35, B: 0.35 }`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_discounts(path: &Path) -> Result<DiscountTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DiscountsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_discounts(&content)
}

fn parse_discounts(content: &str) -> Result<DiscountTable, ConfigError> {
    let file: DiscountsFile = serde_yaml::from_str(content)?;
    validate_tiers(&file.tiers)?;
    Ok(DiscountTable { tiers: file.tiers })
}

fn validate_tiers(tiers: &BTreeMap<String, Decimal>) -> Result<(), ConfigError> {
    for (code, rate) in tiers {
        if code.trim().is_empty() || code.trim() != code {
            return Err(ConfigError::Validation(format!(
                "tier code '{code}' must be non-empty and have no surrounding whitespace"
            )));
        }
        if *rate < Decimal::ZERO || *rate > Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "tier '{code}' has rate {rate}; must be between 0 and 1"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_standard_tiers() {
        let table = DiscountTable::default();
        assert_eq!(table.len(), 8);
        assert_eq!(table.rate("A"), Some(Decimal::new(35, 2)));
        assert_eq!(table.rate("B"), Some(Decimal::new(35, 2)));
        assert_eq!(table.rate("N"), Some(Decimal::new(35, 2)));
        assert_eq!(table.rate("F"), Some(Decimal::new(20, 2)));
        assert_eq!(table.rate("C"), Some(Decimal::new(15, 2)));
        assert_eq!(table.rate("E"), Some(Decimal::new(30, 2)));
        assert_eq!(table.rate("S"), Some(Decimal::new(20, 2)));
        assert_eq!(table.rate("D"), Some(Decimal::new(5, 2)));
    }

    #[test]
    fn unknown_and_blank_codes_have_no_rate() {
        let table = DiscountTable::default();
        assert_eq!(table.rate("Z"), None);
        assert_eq!(table.rate(""), None);
        // Codes are case-sensitive.
        assert_eq!(table.rate("a"), None);
    }

    #[test]
    fn parse_discounts_reads_yaml_tiers() {
        let table = parse_discounts("tiers:\n  A: 0.4\n  X: \"0.125\"\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate("A"), Some(Decimal::new(4, 1)));
        assert_eq!(table.rate("X"), Some(Decimal::new(125, 3)));
        assert_eq!(table.rate("B"), None);
    }

    #[test]
    fn parse_discounts_rejects_rate_above_one() {
        let err = parse_discounts("tiers:\n  A: 1.5\n").unwrap_err();
        assert!(err.to_string().contains("must be between 0 and 1"), "{err}");
    }

    #[test]
    fn parse_discounts_rejects_negative_rate() {
        let err = parse_discounts("tiers:\n  A: -0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err:?}");
    }

    #[test]
    fn parse_discounts_rejects_blank_code() {
        let err = parse_discounts("tiers:\n  \" \": 0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err:?}");
    }

    #[test]
    fn parse_discounts_rejects_malformed_yaml() {
        let err = parse_discounts("tiers: [A, B]").unwrap_err();
        assert!(matches!(err, ConfigError::DiscountsFileParse(_)), "{err:?}");
    }

    #[test]
    fn bundled_discounts_file_matches_default_table() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/discounts.yaml");
        let table = load_discounts(&path).unwrap();
        assert_eq!(table, DiscountTable::default());
    }

    #[test]
    fn load_discounts_reports_missing_file() {
        let err = load_discounts(Path::new("/nonexistent/discounts.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::DiscountsFileIo { .. }), "{err:?}");
    }
}
