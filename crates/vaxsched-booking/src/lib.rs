//! `vaxsched-booking` — dose inventory, caregiver availability and
//! appointments, persisted in SQLite.
//!
//! # Reservation flow
//!
//! | Step | Check / effect                                             |
//! |------|------------------------------------------------------------|
//! | 1    | vaccine exists                                             |
//! | 2    | at least one dose left                                     |
//! | 3    | alphabetically first caregiver available on the date       |
//! | 4    | insert appointment `max(id) + 1`, take one dose, drop slot |
//!
//! Cancelling runs step 4 in reverse. Both flows commit as one transaction.

pub mod appointments;
pub mod availability;
pub mod db;
pub mod error;
pub mod types;
pub mod vaccines;

pub use error::{BookingError, Result};
pub use types::{Appointment, Availability, Vaccine};
