use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;
use vaxsched_core::format_date;

use crate::error::{BookingError, Result};
use crate::types::Availability;

/// Open `date` for booking with `caregiver`. Each caregiver has at most one
/// slot per date.
pub fn upload_availability(
    conn: &Connection,
    caregiver: &str,
    date: NaiveDate,
) -> Result<Availability> {
    if is_available(conn, caregiver, date)? {
        return Err(BookingError::AvailabilityExists {
            caregiver: caregiver.to_string(),
            date,
        });
    }
    conn.execute(
        "INSERT INTO availabilities (date, caregiver) VALUES (?1, ?2)",
        params![format_date(date), caregiver],
    )?;
    info!(caregiver, %date, "availability uploaded");
    Ok(Availability {
        date,
        caregiver: caregiver.to_string(),
    })
}

pub fn is_available(conn: &Connection, caregiver: &str, date: NaiveDate) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM availabilities WHERE date = ?1 AND caregiver = ?2",
            params![format_date(date), caregiver],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Usernames of every caregiver open on `date`, alphabetically.
pub fn caregivers_available_on(conn: &Connection, date: NaiveDate) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT caregiver FROM availabilities WHERE date = ?1 ORDER BY caregiver")?;
    let rows = stmt
        .query_map(params![format_date(date)], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(rows)
}

/// The caregiver a reservation on `date` is assigned to.
pub(crate) fn first_available(conn: &Connection, date: NaiveDate) -> Result<Option<String>> {
    let name = conn
        .query_row(
            "SELECT caregiver FROM availabilities WHERE date = ?1 ORDER BY caregiver LIMIT 1",
            params![format_date(date)],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name)
}

pub(crate) fn remove_availability(
    conn: &Connection,
    caregiver: &str,
    date: NaiveDate,
) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM availabilities WHERE date = ?1 AND caregiver = ?2",
        params![format_date(date), caregiver],
    )?;
    Ok(n > 0)
}

/// Put a slot back after a cancellation. A no-op if it already exists.
pub(crate) fn restore_availability(
    conn: &Connection,
    caregiver: &str,
    date: NaiveDate,
) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO availabilities (date, caregiver) VALUES (?1, ?2)",
        params![format_date(date), caregiver],
    )?;
    Ok(())
}
