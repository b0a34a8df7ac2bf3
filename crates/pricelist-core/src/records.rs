use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the vendor price list, as mapped from the spreadsheet and
/// stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub identifier: String,
    pub product_family_group: String,
    pub product: String,
    pub item: String,
    pub sku: String,
    #[serde(rename = "description1")]
    pub description_1: String,
    #[serde(rename = "description2")]
    pub description_2: String,
    /// Non-negative; zero doubles as the "no price / no discount" sentinel.
    /// Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Single-letter discount tier code, or blank.
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_record_serializes_with_camel_case_keys() {
        let record = PriceRecord {
            identifier: "FG-100F".to_string(),
            product_family_group: "FortiGate".to_string(),
            product: "FortiGate-100F".to_string(),
            item: "Hardware".to_string(),
            sku: "FG-100F".to_string(),
            description_1: "22 x GE RJ45 ports".to_string(),
            description_2: String::new(),
            price: Decimal::new(3295, 0),
            category: "A".to_string(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["productFamilyGroup"], "FortiGate");
        assert_eq!(json["description1"], "22 x GE RJ45 ports");
        assert_eq!(json["sku"], "FG-100F");
        assert_eq!(json["price"], 3295.0);
    }
}
