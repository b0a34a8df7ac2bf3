//! The one capability ingestion needs from a spreadsheet library: read the
//! value at a 1-based `(row, column)` of a single worksheet.

use std::collections::BTreeMap;

use pricelist_core::CellValue;

pub trait Worksheet {
    /// Last populated row (1-based); `0` for an empty sheet.
    fn last_row(&self) -> u32;

    /// Last populated column (1-based); `0` for an empty sheet.
    fn last_column(&self) -> u32;

    /// Value at a 1-based position. Out-of-range positions read as empty.
    fn cell(&self, row: u32, column: u32) -> CellValue;
}

/// In-memory worksheet, mostly useful for tests and for callers that already
/// hold tabular data.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: BTreeMap<(u32, u32), CellValue>,
    last_row: u32,
    last_column: u32,
}

impl MemorySheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet whose first row holds `header` and whose following rows
    /// hold `rows`, all starting at column 1.
    #[must_use]
    pub fn from_rows(header: &[&str], rows: Vec<Vec<CellValue>>) -> Self {
        let mut sheet = Self::new();
        for (idx, name) in (1..).zip(header) {
            sheet.set(1, idx, CellValue::Text((*name).to_string()));
        }
        for (row, values) in (2..).zip(rows) {
            for (col, value) in (1..).zip(values) {
                sheet.set(row, col, value);
            }
        }
        sheet
    }

    /// Set a 1-based cell. Empty values still extend the populated range.
    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        debug_assert!(row >= 1 && column >= 1, "positions are 1-based");
        self.last_row = self.last_row.max(row);
        self.last_column = self.last_column.max(column);
        self.cells.insert((row, column), value);
    }
}

impl Worksheet for MemorySheet {
    fn last_row(&self) -> u32 {
        self.last_row
    }

    fn last_column(&self) -> u32 {
        self.last_column
    }

    fn cell(&self, row: u32, column: u32) -> CellValue {
        self.cells
            .get(&(row, column))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }
}
