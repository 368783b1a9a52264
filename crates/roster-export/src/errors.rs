use thiserror::Error as ThisError;

/// Export errors
#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] roster_data::Error),

    #[error("could not write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("could not write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
