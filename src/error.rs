use std::fmt;

/// Unified error type for spreadsheet and persistence operations
#[derive(Debug)]
pub enum AppError {
    /// File I/O error
    Io(std::io::Error),
    /// Failed to read or write persisted JSON state
    Storage(serde_json::Error),
    /// Failed to parse an xlsx workbook
    Sheet(calamine::XlsxError),
    /// Failed to build an xlsx workbook
    Workbook(rust_xlsxwriter::XlsxError),
    /// The workbook contains no sheets
    MissingSheet,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Sheet(e) => write!(f, "Spreadsheet error: {}", e),
            AppError::Workbook(e) => write!(f, "Workbook error: {}", e),
            AppError::MissingSheet => write!(f, "Workbook contains no sheets"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::Sheet(e) => Some(e),
            AppError::Workbook(e) => Some(e),
            AppError::MissingSheet => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err)
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::Sheet(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Workbook(err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
