//! Database error types.

use derive_more::{Display, Error};
use nim_core::StoreError;

/// Failure in the SQLite layer.
///
/// Wraps a [`StoreError`] so the location where the database call failed
/// survives the conversion into the engine's error type.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", _0.message, _0.file, _0.line)]
pub struct DbError(#[error(not(source))] StoreError);

impl DbError {
    /// Creates a database error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self(StoreError::new(message))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        err.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_the_caller() {
        let err = DbError::new("boom");
        let store = StoreError::from(err.clone());
        assert_eq!(store.file, file!());
        assert_eq!(store.message, "boom");
        assert!(err.to_string().starts_with("Database error: boom at "));
    }

    #[test]
    fn test_diesel_error_converts() {
        let err = StoreError::from(DbError::from(diesel::result::Error::NotFound));
        assert!(err.message.starts_with("Diesel error:"));
    }
}
