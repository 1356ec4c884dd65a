use chrono::NaiveDate;
use rusqlite::Connection;
use vaxsched_core::types::DATE_FORMAT;

use crate::error::Result;

/// Initialise the booking schema in `conn`.
///
/// Must run after `vaxsched_users::db::init_db`: availabilities and
/// appointments reference the account tables.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vaccines (
            name    TEXT    NOT NULL PRIMARY KEY COLLATE NOCASE,
            doses   INTEGER NOT NULL DEFAULT 0 CHECK (typeof(doses) = 'integer' AND doses >= 0)
        );

        CREATE TABLE IF NOT EXISTS availabilities (
            date        TEXT NOT NULL,      -- yyyy-mm-dd
            caregiver   TEXT NOT NULL COLLATE NOCASE REFERENCES caregivers(username),
            PRIMARY KEY (date, caregiver)
        );

        CREATE TABLE IF NOT EXISTS appointments (
            id          INTEGER NOT NULL PRIMARY KEY,
            date        TEXT    NOT NULL,   -- yyyy-mm-dd
            caregiver   TEXT    NOT NULL COLLATE NOCASE REFERENCES caregivers(username),
            patient     TEXT    NOT NULL COLLATE NOCASE REFERENCES patients(username),
            vaccine     TEXT    NOT NULL COLLATE NOCASE REFERENCES vaccines(name),
            created_at  TEXT    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments (patient);
        CREATE INDEX IF NOT EXISTS idx_appointments_caregiver ON appointments (caregiver);
        ",
    )?;
    Ok(())
}

/// Read a yyyy-mm-dd TEXT column as a date.
pub(crate) fn get_date(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
