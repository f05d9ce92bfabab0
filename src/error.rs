use thiserror::Error;

pub type NominaResult<T> = Result<T, NominaError>;

#[derive(Error, Debug)]
pub enum NominaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("The spreadsheet is empty or has no data rows")]
    EmptyFile,

    #[error("No valid students were found in the spreadsheet")]
    NoValidStudents,

    #[error("Failed to process the spreadsheet: {0}")]
    Decode(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unsupported file type '{0}': expected an Excel file (.xls or .xlsx)")]
    UnsupportedFileType(String),

    #[error("File is {size} bytes, the limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid rotation request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<calamine::Error> for NominaError {
    fn from(e: calamine::Error) -> Self {
        NominaError::Decode(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for NominaError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        NominaError::Export(e.to_string())
    }
}
