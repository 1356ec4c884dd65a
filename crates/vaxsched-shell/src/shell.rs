use rusqlite::Connection;
use tracing::{debug, error, info};
use vaxsched_booking::{appointments, availability, vaccines, BookingError};
use vaxsched_core::{parse_date, Role};
use vaxsched_users::{accounts, Account, UserError};

use crate::command::{Command, Operation};
use crate::error::Result;
use crate::render;

const TRY_AGAIN: &str = "Please try again!";
const LOGIN_FIRST: &str = "Please login first!";
const CAREGIVER_ONLY: &str = "Please login as a caregiver first!";
const PATIENT_ONLY: &str = "Please login as a patient!";
const INVALID_DATE: &str = "Please enter a valid date in the form 'yyyy-mm-dd'";
const CREATE_FAILED: &str = "Failed to create user.";
const LOGIN_FAILED: &str = "Login failed.";

/// What one input line produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    /// Set by `quit`; the caller stops reading input.
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

/// A single interactive session: one connection, at most one logged-in
/// account.
pub struct Shell {
    conn: Connection,
    current: Option<Account>,
}

impl Shell {
    /// Create every table this shell touches and wrap the connection.
    pub fn open(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn,
            current: None,
        })
    }

    /// The logged-in account, if any.
    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run one input line. Never fails: every problem becomes a status line.
    pub fn execute(&mut self, line: &str) -> Reply {
        let (op, args) = match Command::parse(line) {
            Command::Empty => return Reply::line(TRY_AGAIN),
            Command::Unknown(name) => {
                debug!(name, "unknown operation");
                return Reply::line("Invalid operation name!");
            }
            Command::Run { op, args } => (op, args),
        };
        debug!(%op, argc = args.len(), "dispatch");

        match op {
            Operation::CreatePatient => self.create_user(Role::Patient, &args),
            Operation::CreateCaregiver => self.create_user(Role::Caregiver, &args),
            Operation::LoginPatient => self.login(Role::Patient, &args),
            Operation::LoginCaregiver => self.login(Role::Caregiver, &args),
            Operation::SearchCaregiverSchedule => self.search_caregiver_schedule(&args),
            Operation::Reserve => self.reserve(&args),
            Operation::UploadAvailability => self.upload_availability(&args),
            Operation::Cancel => self.cancel(&args),
            Operation::AddDoses => self.add_doses(&args),
            Operation::ShowAppointments => self.show_appointments(&args),
            Operation::Logout => self.logout(),
            Operation::Help => Reply::lines(render::help()),
            Operation::Quit => Reply {
                lines: vec!["Bye!".to_string()],
                quit: true,
            },
        }
    }

    // ── accounts ──────────────────────────────────────────────────────────────

    fn create_user(&mut self, role: Role, args: &[&str]) -> Reply {
        let [username, password] = args else {
            return Reply::line(CREATE_FAILED);
        };
        match accounts::create_account(&self.conn, role, username, password) {
            Ok(account) => Reply::line(format!("Created user {}", account.username)),
            Err(UserError::AlreadyExists { .. }) => Reply::line("Username taken, try again!"),
            Err(e) => {
                error!(%role, username, "create account failed: {e}");
                Reply::line(CREATE_FAILED)
            }
        }
    }

    fn login(&mut self, role: Role, args: &[&str]) -> Reply {
        if self.current.is_some() {
            return Reply::line("User already logged in.");
        }
        let [username, password] = args else {
            return Reply::line(LOGIN_FAILED);
        };
        match accounts::authenticate(&self.conn, role, username, password) {
            Ok(Some(account)) => {
                let reply = Reply::line(format!("Logged in as: {}", account.username));
                self.current = Some(account);
                reply
            }
            Ok(None) => Reply::line(LOGIN_FAILED),
            Err(e) => {
                error!(%role, username, "login failed: {e}");
                Reply::line(LOGIN_FAILED)
            }
        }
    }

    fn logout(&mut self) -> Reply {
        match self.current.take() {
            Some(account) => {
                info!(role = %account.role, username = %account.username, "logged out");
                Reply::line("Successfully logged out!")
            }
            None => Reply::line(LOGIN_FIRST),
        }
    }

    // ── schedule ──────────────────────────────────────────────────────────────

    fn search_caregiver_schedule(&mut self, args: &[&str]) -> Reply {
        if self.current.is_none() {
            return Reply::line(LOGIN_FIRST);
        }
        let [date] = args else {
            return Reply::line(TRY_AGAIN);
        };
        let Some(date) = parse_date(date) else {
            return Reply::line(INVALID_DATE);
        };

        let result = availability::caregivers_available_on(&self.conn, date).and_then(|names| {
            vaccines::list_vaccines(&self.conn).map(|stock| (names, stock))
        });
        match result {
            Ok((names, stock)) => Reply::lines(render::schedule(&names, &stock)),
            Err(e) => {
                error!(%date, "schedule search failed: {e}");
                Reply::lines(vec![
                    "Error occurred when checking the schedule.".to_string(),
                    TRY_AGAIN.to_string(),
                ])
            }
        }
    }

    fn upload_availability(&mut self, args: &[&str]) -> Reply {
        let Some(caregiver) = self.logged_in_as(Role::Caregiver) else {
            return Reply::line(CAREGIVER_ONLY);
        };
        let [date] = args else {
            return Reply::line(TRY_AGAIN);
        };
        let Some(date) = parse_date(date) else {
            return Reply::line(INVALID_DATE);
        };
        match availability::upload_availability(&self.conn, &caregiver, date) {
            Ok(_) => Reply::line("Availability uploaded!"),
            Err(BookingError::AvailabilityExists { date, .. }) => {
                Reply::line(format!("Availability for {date} was already uploaded!"))
            }
            Err(e) => {
                error!(%caregiver, %date, "upload availability failed: {e}");
                Reply::line("Error occurred when uploading availability")
            }
        }
    }

    fn add_doses(&mut self, args: &[&str]) -> Reply {
        let Some(caregiver) = self.logged_in_as(Role::Caregiver) else {
            return Reply::line(CAREGIVER_ONLY);
        };
        let [vaccine, doses] = args else {
            return Reply::line(TRY_AGAIN);
        };
        let Ok(doses) = doses.parse::<i64>() else {
            return Reply::line("Please enter a valid number of doses!");
        };
        match vaccines::add_doses(&self.conn, vaccine, doses) {
            Ok(stock) => {
                debug!(%caregiver, vaccine = %stock.name, total = stock.doses, "inventory updated");
                Reply::line("Doses updated!")
            }
            Err(BookingError::InvalidDoses(_)) => {
                Reply::line("Please enter a valid number of doses!")
            }
            Err(e) => {
                error!(%caregiver, vaccine, doses, "add doses failed: {e}");
                Reply::line("Error occurred when adding doses")
            }
        }
    }

    // ── appointments ──────────────────────────────────────────────────────────

    fn reserve(&mut self, args: &[&str]) -> Reply {
        let patient = match &self.current {
            None => return Reply::line(LOGIN_FIRST),
            Some(a) if !a.role.is_patient() => return Reply::line(PATIENT_ONLY),
            Some(a) => a.username.clone(),
        };
        let [date, vaccine] = args else {
            return Reply::line(TRY_AGAIN);
        };
        let Some(date) = parse_date(date) else {
            return Reply::line(INVALID_DATE);
        };

        match appointments::reserve(&mut self.conn, &patient, date, vaccine) {
            Ok(appointment) => Reply::lines(render::reservation(&appointment)),
            Err(BookingError::UnknownVaccine(_)) => {
                Reply::line("Please enter a valid vaccine name")
            }
            Err(BookingError::OutOfDoses(_)) => Reply::line("Not enough available doses!"),
            Err(BookingError::NoCaregiverAvailable(_)) => Reply::line("No Caregiver is available!"),
            Err(e) => {
                error!(%patient, %date, vaccine, "reservation failed: {e}");
                Reply::lines(vec![
                    "Error occurred when making the appointment.".to_string(),
                    TRY_AGAIN.to_string(),
                ])
            }
        }
    }

    fn cancel(&mut self, args: &[&str]) -> Reply {
        let Some((role, username)) = self
            .current
            .as_ref()
            .map(|a| (a.role, a.username.clone()))
        else {
            return Reply::line(LOGIN_FIRST);
        };
        let [id] = args else {
            return Reply::line(TRY_AGAIN);
        };
        let Ok(id) = id.parse::<i64>() else {
            return Reply::line("Please enter a valid appointment ID!");
        };

        match appointments::cancel(&mut self.conn, role, &username, id) {
            Ok(_) => Reply::line(format!("Appointment {id} has been successfully canceled!")),
            Err(BookingError::AppointmentNotFound(_)) => {
                Reply::line("The appointment does not exist!")
            }
            Err(BookingError::NotPermitted { .. }) => Reply::line("Sorry, you need permission"),
            Err(e) => {
                error!(%role, %username, id, "cancel failed: {e}");
                Reply::line(TRY_AGAIN)
            }
        }
    }

    fn show_appointments(&mut self, args: &[&str]) -> Reply {
        let Some(account) = &self.current else {
            return Reply::line(LOGIN_FIRST);
        };
        if !args.is_empty() {
            return Reply::line(TRY_AGAIN);
        }
        match appointments::list_for(&self.conn, account.role, &account.username) {
            Ok(list) => Reply::lines(render::appointments(account.role, &list)),
            Err(e) => {
                error!(
                    role = %account.role,
                    username = %account.username,
                    "listing appointments failed: {e}"
                );
                Reply::line(TRY_AGAIN)
            }
        }
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Username of the current account if it has `role`.
    fn logged_in_as(&self, role: Role) -> Option<String> {
        self.current
            .as_ref()
            .filter(|a| a.role == role)
            .map(|a| a.username.clone())
    }
}

/// Create all tables (idempotent). Account tables first: the booking tables
/// reference them.
pub fn init_schema(conn: &Connection) -> Result<()> {
    vaxsched_users::db::init_db(conn)?;
    vaxsched_booking::db::init_db(conn)?;
    Ok(())
}
