//! Report assembly and spreadsheet output.

pub mod daily;
pub mod range;

use thiserror::Error;

/// Report error types.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no valid data, report not generated")]
    Empty,
}
