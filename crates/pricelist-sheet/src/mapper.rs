//! Worksheet rows → [`PriceRecord`]s.

use pricelist_core::{classify_price, PriceCell, PriceRecord};

use crate::columns::ColumnMap;
use crate::error::SheetError;
use crate::workbook::open_first_sheet;
use crate::worksheet::Worksheet;

/// Validate and map an uploaded workbook in one step.
///
/// Empty payloads are rejected before any parsing happens.
///
/// # Errors
///
/// Returns [`SheetError::EmptyUpload`] for an empty payload, workbook errors
/// if the bytes cannot be opened, and [`SheetError::MissingColumn`] if the
/// header row is incomplete.
pub fn read_price_list(bytes: Vec<u8>) -> Result<Vec<PriceRecord>, SheetError> {
    if bytes.is_empty() {
        return Err(SheetError::EmptyUpload);
    }
    let sheet = open_first_sheet(bytes)?;
    load_price_list(&sheet)
}

/// Validate the header row of `sheet` and map every data row.
///
/// # Errors
///
/// Returns [`SheetError::MissingColumn`] if a required header is absent.
pub fn load_price_list<W: Worksheet + ?Sized>(sheet: &W) -> Result<Vec<PriceRecord>, SheetError> {
    let columns = ColumnMap::resolve(sheet)?;
    tracing::debug!(?columns, "price list headers validated");
    Ok(map_rows(sheet, &columns))
}

/// Map rows 2 through the last populated row. Blank rows inside the range
/// yield blank records; price cells never cause a failure.
pub fn map_rows<W: Worksheet + ?Sized>(sheet: &W, columns: &ColumnMap) -> Vec<PriceRecord> {
    let last_row = sheet.last_row();
    let capacity = usize::try_from(last_row.saturating_sub(1)).unwrap_or_default();
    let mut records = Vec::with_capacity(capacity);

    for row in 2..=last_row {
        let text = |column: u32| sheet.cell(row, column).display_text();

        let raw_price = sheet.cell(row, columns.price);
        let price = match classify_price(&raw_price) {
            PriceCell::Numeric(value) => value,
            cell @ PriceCell::Negative(value) => {
                tracing::warn!(row, %value, "negative price; storing 0");
                cell.amount()
            }
            cell @ PriceCell::NoDiscount => {
                tracing::debug!(row, "price marked 'No Discount'; storing 0");
                cell.amount()
            }
            cell @ PriceCell::Unrecognized => {
                tracing::debug!(row, raw = ?raw_price, "unrecognized price cell; storing 0");
                cell.amount()
            }
        };

        records.push(PriceRecord {
            identifier: text(columns.identifier),
            product_family_group: text(columns.product_family_group),
            product: text(columns.product),
            item: text(columns.item),
            sku: text(columns.sku),
            description_1: text(columns.description_1),
            description_2: text(columns.description_2),
            price,
            category: text(columns.category),
        });
    }

    records
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
