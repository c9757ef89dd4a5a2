//! Diesel and pool error mapping shared by every repository.
//!
//! Each repository owns its own port error enum; these helpers take that
//! enum's constructors so the classification logic lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, error};

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(pool_error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    error!(error = %pool_error, "database pool unavailable");
    let message = match pool_error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Raw database messages are logged at debug level and never copied into the
/// returned error, so they cannot leak through API responses.
pub(crate) fn map_basic_diesel_error<E, Q, C>(diesel_error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &diesel_error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %diesel_error, "diesel operation failed"),
    }

    match diesel_error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Whether the error is a primary-key or unique-constraint violation.
pub(crate) fn is_unique_violation(diesel_error: &DieselError) -> bool {
    matches!(
        diesel_error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for shared error classification.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    fn classify(diesel_error: DieselError) -> Mapped {
        map_basic_diesel_error(diesel_error, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        })
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ),
        Mapped::Connection("database connection error".to_owned())
    )]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"users_pkey\"".to_owned()),
        ),
        Mapped::Query("database error")
    )]
    fn classifies_diesel_errors(#[case] input: DieselError, #[case] expected: Mapped) {
        assert_eq!(classify(input), expected);
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn detects_unique_violations() {
        let unique = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate".to_owned()),
        );
        assert!(is_unique_violation(&unique));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
