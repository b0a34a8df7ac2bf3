//! Header validation and header-name → column-index resolution.

use std::collections::HashMap;

use crate::error::SheetError;
use crate::worksheet::Worksheet;

/// Headers every price list must carry in row 1, matched exactly.
pub const REQUIRED_HEADERS: [&str; 8] = [
    "Identifier",
    "Product Family Group",
    "Product",
    "Item",
    "SKU",
    "Description #1",
    "Description #2",
    "Price",
];

/// Optional header naming the discount-tier column.
pub const CATEGORY_HEADER: &str = "Category";

/// 1-based column of each field, resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub identifier: u32,
    pub product_family_group: u32,
    pub product: u32,
    pub item: u32,
    pub sku: u32,
    pub description_1: u32,
    pub description_2: u32,
    pub price: u32,
    pub category: u32,
}

impl ColumnMap {
    /// Column layout of the vendor template: seven text fields in columns
    /// 1–7, price in 10, category in 11.
    pub const VENDOR_TEMPLATE: ColumnMap = ColumnMap {
        identifier: 1,
        product_family_group: 2,
        product: 3,
        item: 4,
        sku: 5,
        description_1: 6,
        description_2: 7,
        price: 10,
        category: 11,
    };

    /// Scan row 1 and locate every required header.
    ///
    /// When a header appears more than once the leftmost column wins. The
    /// category column comes from a `Category` header if present, otherwise
    /// it is the column right of `Price`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::MissingColumn`] naming the first required header
    /// (in [`REQUIRED_HEADERS`] order) that row 1 does not contain.
    pub fn resolve<W: Worksheet + ?Sized>(sheet: &W) -> Result<Self, SheetError> {
        let mut positions: HashMap<String, u32> = HashMap::new();
        for column in 1..=sheet.last_column() {
            let text = sheet.cell(1, column).display_text();
            if !text.is_empty() {
                positions.entry(text).or_insert(column);
            }
        }

        let find = |name: &'static str| -> Result<u32, SheetError> {
            positions
                .get(name)
                .copied()
                .ok_or(SheetError::MissingColumn(name))
        };

        let [identifier, product_family_group, product, item, sku, description_1, description_2, price] =
            REQUIRED_HEADERS;

        let map = ColumnMap {
            identifier: find(identifier)?,
            product_family_group: find(product_family_group)?,
            product: find(product)?,
            item: find(item)?,
            sku: find(sku)?,
            description_1: find(description_1)?,
            description_2: find(description_2)?,
            price: find(price)?,
            category: 0,
        };

        let category = positions
            .get(CATEGORY_HEADER)
            .copied()
            .unwrap_or(map.price + 1);

        Ok(ColumnMap { category, ..map })
    }
}

#[cfg(test)]
mod tests {
    use pricelist_core::CellValue;

    use super::*;
    use crate::worksheet::MemorySheet;

    const TEMPLATE_HEADER: [&str; 11] = [
        "Identifier",
        "Product Family Group",
        "Product",
        "Item",
        "SKU",
        "Description #1",
        "Description #2",
        "List Currency",
        "Discount Type",
        "Price",
        "",
    ];

    #[test]
    fn resolve_matches_vendor_template() {
        let sheet = MemorySheet::from_rows(&TEMPLATE_HEADER, vec![]);
        let map = ColumnMap::resolve(&sheet).unwrap();
        assert_eq!(map, ColumnMap::VENDOR_TEMPLATE);
    }

    #[test]
    fn resolve_follows_reordered_headers() {
        let sheet = MemorySheet::from_rows(
            &[
                "Price",
                "SKU",
                "Identifier",
                "Item",
                "Product",
                "Product Family Group",
                "Description #2",
                "Description #1",
                "Category",
            ],
            vec![],
        );
        let map = ColumnMap::resolve(&sheet).unwrap();
        assert_eq!(map.price, 1);
        assert_eq!(map.sku, 2);
        assert_eq!(map.identifier, 3);
        assert_eq!(map.product, 5);
        assert_eq!(map.description_1, 8);
        assert_eq!(map.description_2, 7);
        assert_eq!(map.category, 9);
    }

    #[test]
    fn resolve_reports_missing_sku() {
        let header: Vec<&str> = TEMPLATE_HEADER
            .iter()
            .copied()
            .filter(|h| *h != "SKU")
            .collect();
        let sheet = MemorySheet::from_rows(&header, vec![]);
        let err = ColumnMap::resolve(&sheet).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn("SKU")), "{err:?}");
        assert_eq!(
            err.to_string(),
            "The column 'SKU' is missing in the Excel file."
        );
    }

    #[test]
    fn resolve_reports_first_missing_header_in_required_order() {
        let sheet = MemorySheet::from_rows(&["Price", "Item"], vec![]);
        let err = ColumnMap::resolve(&sheet).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn("Identifier")), "{err:?}");
    }

    #[test]
    fn resolve_requires_exact_header_text() {
        let mut header = TEMPLATE_HEADER;
        header[4] = "sku";
        let sheet = MemorySheet::from_rows(&header, vec![]);
        let err = ColumnMap::resolve(&sheet).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn("SKU")), "{err:?}");
    }

    #[test]
    fn resolve_prefers_leftmost_duplicate_header() {
        let mut header = TEMPLATE_HEADER.to_vec();
        header.push("SKU");
        let sheet = MemorySheet::from_rows(&header, vec![]);
        assert_eq!(ColumnMap::resolve(&sheet).unwrap().sku, 5);
    }

    #[test]
    fn resolve_only_scans_first_row() {
        let mut sheet = MemorySheet::from_rows(&["Identifier"], vec![]);
        sheet.set(2, 2, CellValue::Text("Product Family Group".into()));
        let err = ColumnMap::resolve(&sheet).unwrap_err();
        assert!(
            matches!(err, SheetError::MissingColumn("Product Family Group")),
            "{err:?}"
        );
    }

    #[test]
    fn resolve_rejects_empty_sheet() {
        let err = ColumnMap::resolve(&MemorySheet::new()).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn("Identifier")), "{err:?}");
    }
}
