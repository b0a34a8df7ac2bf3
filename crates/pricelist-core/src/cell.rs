//! Library-neutral view of a spreadsheet cell.

/// Raw value of a single worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Error cells (`#N/A`, `#DIV/0!`, ...) keep their display text.
    Error(String),
    /// Dates, durations and anything else a reader surfaces as non-numeric.
    Other(String),
}

impl CellValue {
    /// The text a spreadsheet would display for this cell.
    ///
    /// Integral floats drop the fractional part (`1500.0` renders as `1500`).
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Text(s) | CellValue::Error(s) | CellValue::Other(s) => s.clone(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
