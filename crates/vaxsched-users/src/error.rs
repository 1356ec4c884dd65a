use thiserror::Error;
use vaxsched_core::Role;

/// All account-layer errors. Kept separate from the booking errors so the
/// shell can map each one to its own status line.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("{role} already exists: {username}")]
    AlreadyExists { role: Role, username: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

pub type Result<T> = std::result::Result<T, UserError>;
