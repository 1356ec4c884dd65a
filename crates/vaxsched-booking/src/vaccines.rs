use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::error::{BookingError, Result};
use crate::types::Vaccine;

pub fn get_vaccine(conn: &Connection, name: &str) -> Result<Option<Vaccine>> {
    let vaccine = conn
        .query_row(
            "SELECT name, doses FROM vaccines WHERE name = ?1",
            params![name],
            |row| {
                Ok(Vaccine {
                    name: row.get(0)?,
                    doses: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(vaccine)
}

/// All vaccines ordered by name, including those with zero doses left.
pub fn list_vaccines(conn: &Connection) -> Result<Vec<Vaccine>> {
    let mut stmt = conn.prepare("SELECT name, doses FROM vaccines ORDER BY name")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Vaccine {
                name: row.get(0)?,
                doses: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Add `doses` to the inventory, registering the vaccine on first use.
/// Returns the updated record. A count that would push the total past
/// `i64::MAX` is rejected with `InvalidDoses` and nothing is written.
pub fn add_doses(conn: &Connection, name: &str, doses: i64) -> Result<Vaccine> {
    if doses <= 0 {
        return Err(BookingError::InvalidDoses(doses));
    }
    let current = get_vaccine(conn, name)?.map_or(0, |v| v.doses);
    if current.checked_add(doses).is_none() {
        return Err(BookingError::InvalidDoses(doses));
    }
    conn.execute(
        "INSERT INTO vaccines (name, doses) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET doses = doses + excluded.doses",
        params![name, doses],
    )?;
    let vaccine =
        get_vaccine(conn, name)?.ok_or_else(|| BookingError::UnknownVaccine(name.to_string()))?;
    info!(vaccine = %vaccine.name, added = doses, total = vaccine.doses, "doses added");
    Ok(vaccine)
}

/// Decrement by one. Fails with `OutOfDoses` rather than going below zero.
pub(crate) fn take_dose(conn: &Connection, name: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE vaccines SET doses = doses - 1 WHERE name = ?1 AND doses > 0",
        params![name],
    )?;
    if n == 0 {
        return Err(match get_vaccine(conn, name)? {
            Some(_) => BookingError::OutOfDoses(name.to_string()),
            None => BookingError::UnknownVaccine(name.to_string()),
        });
    }
    Ok(())
}

pub(crate) fn return_dose(conn: &Connection, name: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE vaccines SET doses = doses + 1 WHERE name = ?1",
        params![name],
    )?;
    if n == 0 {
        return Err(BookingError::UnknownVaccine(name.to_string()));
    }
    Ok(())
}
