//! Tokenising and naming of shell commands.
//!
//! Only the operation name is interpreted here. Argument counts are checked
//! by each handler because the order of checks (login state first, or arity
//! first) differs per command.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePatient,
    CreateCaregiver,
    LoginPatient,
    LoginCaregiver,
    SearchCaregiverSchedule,
    Reserve,
    UploadAvailability,
    Cancel,
    AddDoses,
    ShowAppointments,
    Logout,
    Help,
    Quit,
}

impl Operation {
    /// Every operation, in the order the help text lists them.
    pub const ALL: [Operation; 13] = [
        Operation::CreatePatient,
        Operation::CreateCaregiver,
        Operation::LoginPatient,
        Operation::LoginCaregiver,
        Operation::SearchCaregiverSchedule,
        Operation::Reserve,
        Operation::UploadAvailability,
        Operation::Cancel,
        Operation::AddDoses,
        Operation::ShowAppointments,
        Operation::Logout,
        Operation::Help,
        Operation::Quit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreatePatient => "create_patient",
            Operation::CreateCaregiver => "create_caregiver",
            Operation::LoginPatient => "login_patient",
            Operation::LoginCaregiver => "login_caregiver",
            Operation::SearchCaregiverSchedule => "search_caregiver_schedule",
            Operation::Reserve => "reserve",
            Operation::UploadAvailability => "upload_availability",
            Operation::Cancel => "cancel",
            Operation::AddDoses => "add_doses",
            Operation::ShowAppointments => "show_appointments",
            Operation::Logout => "logout",
            Operation::Help => "help",
            Operation::Quit => "quit",
        }
    }

    /// Argument placeholders shown in the help text.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Operation::CreatePatient
            | Operation::CreateCaregiver
            | Operation::LoginPatient
            | Operation::LoginCaregiver => &["<username>", "<password>"],
            Operation::SearchCaregiverSchedule | Operation::UploadAvailability => &["<date>"],
            Operation::Reserve => &["<date>", "<vaccine>"],
            Operation::Cancel => &["<appointment_id>"],
            Operation::AddDoses => &["<vaccine>", "<number>"],
            Operation::ShowAppointments | Operation::Logout | Operation::Help | Operation::Quit => {
                &[]
            }
        }
    }

    /// Exact number of arguments after the operation name.
    pub fn arity(&self) -> usize {
        self.params().len()
    }

    /// `name <param> ...` as shown in the banner.
    pub fn usage(&self) -> String {
        std::iter::once(self.name())
            .chain(self.params().iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == lower)
            .ok_or_else(|| format!("unknown operation: {}", s))
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank or whitespace-only input.
    Empty,
    Unknown(&'a str),
    Run { op: Operation, args: Vec<&'a str> },
}

impl<'a> Command<'a> {
    /// Split on any whitespace; the first token names the operation.
    pub fn parse(line: &'a str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Command::Empty;
        };
        match first.parse::<Operation>() {
            Ok(op) => Command::Run {
                op,
                args: tokens.collect(),
            },
            Err(_) => Command::Unknown(first),
        }
    }
}
