//! Helpers for recognising PostgreSQL constraint violations in `sqlx` errors.

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Name of the violated constraint if `err` is a database error with `code`.
fn violated_constraint<'e>(err: &'e sqlx::Error, code: &str) -> Option<&'e str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code) => {
            Some(db_err.constraint().unwrap_or("unknown"))
        }
        _ => None,
    }
}

/// Constraint name when `err` is a unique constraint violation.
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    violated_constraint(err, UNIQUE_VIOLATION)
}

/// Constraint name when `err` is a foreign key violation.
pub fn foreign_key_violation(err: &sqlx::Error) -> Option<&str> {
    violated_constraint(err, FOREIGN_KEY_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_violations() {
        let err = sqlx::Error::RowNotFound;
        assert_eq!(unique_violation(&err), None);
        assert_eq!(foreign_key_violation(&err), None);
    }
}
