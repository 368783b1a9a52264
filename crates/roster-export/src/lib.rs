mod errors;
pub use errors::ExportError;

mod format;
pub use format::ExportFormat;

pub mod delimited;
pub mod spreadsheet;

mod records;
pub use records::{snapshot, HEADER};
