use thiserror::Error;

/// Startup failures. Per-command failures never surface here: the shell
/// turns them into status lines.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Booking(#[from] vaxsched_booking::BookingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
