//! Shared MongoDB error mapping for the repositories.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Whether `error` reports a unique index violation.
pub(super) fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

fn is_connection_failure(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

/// Map a driver error into query/connection constructors.
pub(super) fn map_mongo_error<E, Q, C>(error: &MongoError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    debug!(%error, "mongodb operation failed");
    if is_connection_failure(error) {
        connection("database connection error")
    } else {
        query("database error")
    }
}
