use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored refresh token. Only the selector is kept in plain text.
#[derive(Debug, FromRow)]
pub struct RefreshToken {
    pub user_id: i32,
    pub verifier_hash: String,
    pub expires_at: DateTime<Utc>,
}
