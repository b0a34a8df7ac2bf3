//! calamine-backed [`Worksheet`].

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use pricelist_core::CellValue;

use crate::error::SheetError;
use crate::worksheet::Worksheet;

/// First worksheet of an uploaded workbook, fully loaded into memory.
#[derive(Debug, Clone)]
pub struct CalamineSheet {
    range: Range<Data>,
}

impl CalamineSheet {
    #[must_use]
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }
}

/// Open the first worksheet of an `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`
/// payload. The format is sniffed from the bytes.
///
/// # Errors
///
/// Returns [`SheetError::Workbook`] if the bytes are not a readable workbook
/// and [`SheetError::NoWorksheet`] if it has no sheets.
pub fn open_first_sheet(bytes: Vec<u8>) -> Result<CalamineSheet, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;
    Ok(CalamineSheet::new(range))
}

impl Worksheet for CalamineSheet {
    fn last_row(&self) -> u32 {
        self.range.end().map_or(0, |(row, _)| row + 1)
    }

    fn last_column(&self) -> u32 {
        self.range.end().map_or(0, |(_, col)| col + 1)
    }

    fn cell(&self, row: u32, column: u32) -> CellValue {
        if row == 0 || column == 0 {
            return CellValue::Empty;
        }
        self.range
            .get_value((row - 1, column - 1))
            .map_or(CellValue::Empty, to_cell_value)
    }
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        other => CellValue::Other(other.to_string()),
    }
}
