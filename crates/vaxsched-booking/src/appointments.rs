use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use vaxsched_core::{format_date, Role};

use crate::availability::{first_available, remove_availability, restore_availability};
use crate::db::get_date;
use crate::error::{BookingError, Result};
use crate::types::Appointment;
use crate::vaccines::{get_vaccine, return_dose, take_dose};

const APPOINTMENT_COLUMNS: &str = "id, date, caregiver, patient, vaccine, created_at";

/// Book `vaccine` for `patient` on `date` with the first available caregiver.
///
/// Checks run in a fixed order so the caller sees the most specific problem:
/// unknown vaccine, then no doses, then no caregiver.
pub fn reserve(
    conn: &mut Connection,
    patient: &str,
    date: NaiveDate,
    vaccine: &str,
) -> Result<Appointment> {
    let tx = conn.transaction()?;

    let stock = get_vaccine(&tx, vaccine)?
        .ok_or_else(|| BookingError::UnknownVaccine(vaccine.to_string()))?;
    if stock.doses <= 0 {
        return Err(BookingError::OutOfDoses(stock.name));
    }
    let caregiver =
        first_available(&tx, date)?.ok_or(BookingError::NoCaregiverAvailable(date))?;

    let appointment = Appointment {
        id: next_id(&tx)?,
        date,
        caregiver,
        patient: patient.to_string(),
        vaccine: stock.name,
        created_at: Utc::now().to_rfc3339(),
    };
    tx.execute(
        &format!("INSERT INTO appointments ({APPOINTMENT_COLUMNS}) VALUES (?1,?2,?3,?4,?5,?6)"),
        params![
            appointment.id,
            format_date(appointment.date),
            appointment.caregiver,
            appointment.patient,
            appointment.vaccine,
            appointment.created_at,
        ],
    )?;
    take_dose(&tx, &appointment.vaccine)?;
    remove_availability(&tx, &appointment.caregiver, date)?;
    tx.commit()?;

    info!(
        id = appointment.id,
        patient,
        caregiver = %appointment.caregiver,
        vaccine = %appointment.vaccine,
        %date,
        "appointment reserved"
    );
    Ok(appointment)
}

/// Cancel appointment `id` on behalf of `username`.
///
/// Patients may cancel only their own appointments; caregivers may cancel
/// any. The dose goes back to inventory and the caregiver's slot reopens.
pub fn cancel(conn: &mut Connection, role: Role, username: &str, id: i64) -> Result<Appointment> {
    let tx = conn.transaction()?;

    let appointment = get_appointment(&tx, id)?.ok_or(BookingError::AppointmentNotFound(id))?;
    if role.is_patient() && !appointment.patient.eq_ignore_ascii_case(username) {
        debug!(id, username, owner = %appointment.patient, "cancel refused");
        return Err(BookingError::NotPermitted {
            username: username.to_string(),
            id,
        });
    }

    return_dose(&tx, &appointment.vaccine)?;
    restore_availability(&tx, &appointment.caregiver, appointment.date)?;
    tx.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    tx.commit()?;

    info!(id, %role, username, "appointment canceled");
    Ok(appointment)
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>> {
    let appointment = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            params![id],
            row_to_appointment,
        )
        .optional()?;
    Ok(appointment)
}

/// Appointments where `username` is the patient (or the caregiver), by id.
pub fn list_for(conn: &Connection, role: Role, username: &str) -> Result<Vec<Appointment>> {
    let column = match role {
        Role::Patient => "patient",
        Role::Caregiver => "caregiver",
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE {column} = ?1 ORDER BY id"
    ))?;
    let rows = stmt
        .query_map(params![username], row_to_appointment)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── private helpers ───────────────────────────────────────────────────────────

fn next_id(conn: &Connection) -> Result<i64> {
    let id = conn.query_row(
        "SELECT COALESCE(MAX(id), 0) + 1 FROM appointments",
        [],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn row_to_appointment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        date: get_date(row, 1)?,
        caregiver: row.get(2)?,
        patient: row.get(3)?,
        vaccine: row.get(4)?,
        created_at: row.get(5)?,
    })
}
