use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vaccine and the number of doses on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    pub name: String,
    /// Never negative; the table enforces it with a CHECK constraint.
    pub doses: i64,
}

/// A caregiver-date pair open for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    pub caregiver: String,
}

/// A confirmed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// `max(id) + 1` at reservation time, starting at 1.
    pub id: i64,
    pub date: NaiveDate,
    pub caregiver: String,
    pub patient: String,
    pub vaccine: String,
    /// RFC 3339 timestamp of the reservation.
    pub created_at: String,
}
