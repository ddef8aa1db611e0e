use chrono::NaiveDate;
use thiserror::Error;

pub type ReservasResult<T> = Result<T, ReservasError>;

#[derive(Error, Debug)]
pub enum ReservasError {
    #[error("The file contains no valid reservation rows")]
    EmptyInput,

    #[error("Both dates (from and to) are required to apply the filter")]
    MissingDate,

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("The 'from' date {start} must not be after the 'to' date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("No reservations found between {start} and {end}")]
    EmptyResult { start: NaiveDate, end: NaiveDate },

    #[error("Unsupported file: {0} (expected .xlsx, .xlsm, .xls or .ods)")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ReservasError {
    /// Engine conditions the user can fix from the input side. These never
    /// invalidate the session: the previous report stays current.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ReservasError::EmptyInput
                | ReservasError::MissingDate
                | ReservasError::InvalidDate(_)
                | ReservasError::InvertedRange { .. }
                | ReservasError::EmptyResult { .. }
                | ReservasError::UnsupportedFile(_)
        )
    }
}
