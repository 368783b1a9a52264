use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Registry errors
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("duplicate value for unique field `{0}`")]
    DuplicateKey(String),
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Storage(sqlx::Error),
}

impl Error {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::DuplicateKey(_))
    }
}

/// Extract the column from a message like
/// `UNIQUE constraint failed: members.gmail`.
fn unique_column(message: &str) -> String {
    message
        .rsplit(':')
        .next()
        .and_then(|cols| cols.split(',').next())
        .map(|col| col.trim())
        .map(|col| col.rsplit('.').next().unwrap_or(col))
        .unwrap_or_default()
        .to_string()
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            // 2067 = SQLITE_CONSTRAINT_UNIQUE
            let code = db_err.code().unwrap_or_default();
            if db_err.is_unique_violation() || code == "2067" {
                return Error::DuplicateKey(unique_column(db_err.message()));
            }
        }
        Error::Storage(err)
    }
}
