use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// A unique constraint rejected the write. This is the real guard for
    /// email, slug and collaborator-pair uniqueness.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(sqlx::Error),

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    /// Name of the violated constraint, e.g. `event_slug_key`.
    #[must_use]
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation(sqlx::Error::Database(db_err)) => db_err.constraint(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let unique = matches!(&err, sqlx::Error::Database(db_err) if db_err.is_unique_violation());
        if unique {
            Self::UniqueViolation(err)
        } else {
            Self::Sqlx(err)
        }
    }
}
