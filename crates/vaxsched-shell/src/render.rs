//! Text for everything the shell prints.

use vaxsched_booking::{Appointment, Vaccine};
use vaxsched_core::{format_date, Role};

use crate::command::Operation;

pub fn banner() -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Welcome to the COVID-19 Vaccine Reservation Scheduling Application!".to_string(),
    ];
    lines.extend(help());
    lines.push(String::new());
    lines
}

pub fn help() -> Vec<String> {
    std::iter::once("*** Please enter one of the following commands ***".to_string())
        .chain(Operation::ALL.iter().map(|op| format!("> {}", op.usage())))
        .collect()
}

/// Availability search result: caregivers on the date, then dose counts.
pub fn schedule(caregivers: &[String], vaccines: &[Vaccine]) -> Vec<String> {
    let mut lines = vec!["The caregivers that are available for this date are:".to_string()];
    if caregivers.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.push(caregivers.join(" "));
    }
    lines.push("The number of available doses left for each vaccine:".to_string());
    if vaccines.is_empty() {
        lines.push("(none)".to_string());
    }
    lines.extend(
        vaccines
            .iter()
            .map(|v| format!("Name of Vaccine: {} Doses Left: {}", v.name, v.doses)),
    );
    lines
}

pub fn reservation(appointment: &Appointment) -> Vec<String> {
    vec![
        "Congrats, you have successfully made an appointment!".to_string(),
        format!("Your appointment ID is: {}", appointment.id),
        format!("Your assigned caregiver is: {}", appointment.caregiver),
    ]
}

/// One line per appointment. The viewer sees the other party's name.
pub fn appointments(viewer: Role, appointments: &[Appointment]) -> Vec<String> {
    if appointments.is_empty() {
        return vec!["No appointments scheduled.".to_string()];
    }
    appointments
        .iter()
        .map(|a| {
            let (label, other) = match viewer {
                Role::Patient => ("Caregiver name", &a.caregiver),
                Role::Caregiver => ("Patient name", &a.patient),
            };
            format!(
                "Appointment ID: {} Vaccine Name: {} Date: {} {}: {}",
                a.id,
                a.vaccine,
                format_date(a.date),
                label,
                other
            )
        })
        .collect()
}
