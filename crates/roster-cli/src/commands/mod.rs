mod members;
pub use members::*;

mod reports;
pub use reports::*;

mod export;
pub use export::*;

use anyhow::{anyhow, Error as AnyError};
use roster_data::Error;

/// Turn store failures into operator facing errors
pub(crate) fn explain(err: Error) -> AnyError {
    match err {
        Error::DuplicateKey(column) => {
            tracing::info!(column = column.as_str(), "rejected duplicate member");
            anyhow!("Student Number or Gmail already exists.")
        }
        err => AnyError::new(err),
    }
}
