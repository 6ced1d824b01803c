//! Shared error mapping for the Diesel repositories.
//!
//! Every persistence port exposes the same `Connection`/`Query` split, so the
//! helpers take the port's constructors and return the port's error type.

use tracing::{debug, warn};

use crate::domain::IdValidationError;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel failures into query or connection errors.
///
/// `NotFound`, query-builder and database errors are query failures; a
/// closed connection is a connection failure so callers answer 503.
pub fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Map a stored row that fails identifier validation into a query error.
pub fn map_corrupt_row<E, Q>(error: &IdValidationError, query: Q) -> E
where
    Q: FnOnce(String) -> E,
{
    warn!(error = %error, "stored row holds an invalid identifier");
    query(format!("corrupt row: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MatchRepositoryError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn map(error: DieselError) -> MatchRepositoryError {
        map_diesel_error(
            error,
            MatchRepositoryError::query,
            MatchRepositoryError::connection,
        )
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let err = map(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, MatchRepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ),
        "database error"
    )]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] message: &str) {
        let err = map(error);
        assert_eq!(err, MatchRepositoryError::query(message));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let err: MatchRepositoryError = map_pool_error(
            PoolError::checkout("timed out"),
            MatchRepositoryError::connection,
        );
        assert_eq!(err, MatchRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn corrupt_rows_are_query_errors() {
        let source = IdValidationError::NotPositive {
            kind: "jobId",
            value: 0,
        };
        let err: MatchRepositoryError = map_corrupt_row(&source, MatchRepositoryError::query);
        assert!(matches!(err, MatchRepositoryError::Query { .. }));
    }
}
