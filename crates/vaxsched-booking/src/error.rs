use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while managing inventory, availability or appointments.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unknown vaccine: {0}")]
    UnknownVaccine(String),

    /// The vaccine exists but its dose count is zero.
    #[error("No doses left for vaccine {0}")]
    OutOfDoses(String),

    #[error("No caregiver available on {0}")]
    NoCaregiverAvailable(NaiveDate),

    #[error("{caregiver} is already available on {date}")]
    AvailabilityExists { caregiver: String, date: NaiveDate },

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(i64),

    /// A patient tried to touch an appointment that belongs to someone else.
    #[error("{username} may not modify appointment {id}")]
    NotPermitted { username: String, id: i64 },

    /// Dose additions must be strictly positive.
    #[error("Invalid dose count: {0}")]
    InvalidDoses(i64),
}

pub type Result<T> = std::result::Result<T, BookingError>;
