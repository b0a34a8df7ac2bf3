pub mod columns;
pub mod error;
pub mod mapper;
pub mod workbook;
pub mod worksheet;

pub use columns::{ColumnMap, CATEGORY_HEADER, REQUIRED_HEADERS};
pub use error::SheetError;
pub use mapper::{load_price_list, map_rows, read_price_list};
pub use workbook::{open_first_sheet, CalamineSheet};
pub use worksheet::{MemorySheet, Worksheet};
