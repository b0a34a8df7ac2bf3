use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("No file uploaded or file is empty.")]
    EmptyUpload,

    #[error("could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("The column '{0}' is missing in the Excel file.")]
    MissingColumn(&'static str),
}

impl SheetError {
    /// `true` for problems with the caller's input shape (empty payload,
    /// missing header) as opposed to an unreadable file.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, SheetError::EmptyUpload | SheetError::MissingColumn(_))
    }
}
