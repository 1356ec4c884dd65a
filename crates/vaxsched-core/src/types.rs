use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire and storage format for appointment and availability dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two kinds of registered account.
///
/// Each role has its own account table, so the same username may exist once
/// as a patient and once as a caregiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Caregiver,
}

impl Role {
    pub fn is_patient(&self) -> bool {
        matches!(self, Role::Patient)
    }

    /// Name of the SQLite table holding accounts of this role.
    pub fn table(&self) -> &'static str {
        match self {
            Role::Patient => "patients",
            Role::Caregiver => "caregivers",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Caregiver => write!(f, "caregiver"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "caregiver" => Ok(Role::Caregiver),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Parse a `yyyy-mm-dd` calendar date. Anything else (including trailing
/// text or impossible dates such as 2021-02-30) yields `None`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Inverse of [`parse_date`]; used for every date written to SQLite.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
