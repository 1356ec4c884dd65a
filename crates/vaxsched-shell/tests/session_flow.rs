// Drive the shell the way a user at the prompt would and check the exact
// status lines that come back.

use rusqlite::Connection;
use vaxsched_core::Role;
use vaxsched_shell::{repl, Shell};

fn shell() -> Shell {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
    Shell::open(conn).unwrap()
}

/// Run one line and return its single status line.
fn say(shell: &mut Shell, line: &str) -> String {
    let reply = shell.execute(line);
    assert_eq!(
        reply.lines.len(),
        1,
        "expected one line for {line:?}: {:?}",
        reply.lines
    );
    reply.lines.into_iter().next().unwrap()
}

fn doses(shell: &Shell, vaccine: &str) -> i64 {
    shell
        .connection()
        .query_row(
            "SELECT doses FROM vaccines WHERE name = ?1",
            [vaccine],
            |row| row.get(0),
        )
        .unwrap()
}

/// Caregivers amy and zed open on 2021-10-15, 2 pfizer doses, patient pat
/// registered, nobody logged in.
fn clinic() -> Shell {
    let mut s = shell();
    for name in ["amy", "zed"] {
        assert_eq!(
            say(&mut s, &format!("create_caregiver {name} pw")),
            format!("Created user {name}")
        );
        assert_eq!(
            say(&mut s, &format!("login_caregiver {name} pw")),
            format!("Logged in as: {name}")
        );
        assert_eq!(say(&mut s, "upload_availability 2021-10-15"), "Availability uploaded!");
        if name == "amy" {
            assert_eq!(say(&mut s, "add_doses pfizer 2"), "Doses updated!");
        }
        assert_eq!(say(&mut s, "logout"), "Successfully logged out!");
    }
    assert_eq!(say(&mut s, "create_patient pat pw"), "Created user pat");
    s
}

#[test]
fn empty_and_unknown_input() {
    let mut s = shell();
    assert_eq!(say(&mut s, ""), "Please try again!");
    assert_eq!(say(&mut s, "book 2021-10-15"), "Invalid operation name!");
}

#[test]
fn create_user_rules() {
    let mut s = shell();
    assert_eq!(say(&mut s, "create_patient alice"), "Failed to create user.");
    assert_eq!(say(&mut s, "create_patient alice pw"), "Created user alice");
    assert_eq!(say(&mut s, "create_patient Alice pw"), "Username taken, try again!");
    // Separate namespace per role.
    assert_eq!(say(&mut s, "create_caregiver alice pw"), "Created user alice");
    // Creating an account does not log in.
    assert!(s.current().is_none());
}

#[test]
fn login_rules() {
    let mut s = shell();
    say(&mut s, "create_patient alice pw");

    assert_eq!(say(&mut s, "login_patient alice"), "Login failed.");
    assert_eq!(say(&mut s, "login_patient alice nope"), "Login failed.");
    assert_eq!(say(&mut s, "login_caregiver alice pw"), "Login failed.");
    assert_eq!(say(&mut s, "login_patient alice pw"), "Logged in as: alice");
    assert_eq!(s.current().map(|a| a.role), Some(Role::Patient));

    say(&mut s, "create_caregiver bob pw");
    assert_eq!(say(&mut s, "login_caregiver bob pw"), "User already logged in.");
    assert_eq!(say(&mut s, "logout"), "Successfully logged out!");
    assert_eq!(say(&mut s, "logout"), "Please login first!");
}

#[test]
fn role_gates() {
    let mut s = clinic();
    assert_eq!(say(&mut s, "reserve 2021-10-15 pfizer"), "Please login first!");
    assert_eq!(say(&mut s, "show_appointments"), "Please login first!");
    assert_eq!(say(&mut s, "cancel 1"), "Please login first!");
    assert_eq!(
        say(&mut s, "upload_availability 2021-10-16"),
        "Please login as a caregiver first!"
    );

    say(&mut s, "login_patient pat pw");
    assert_eq!(
        say(&mut s, "add_doses pfizer 5"),
        "Please login as a caregiver first!"
    );
    assert_eq!(
        say(&mut s, "upload_availability 2021-10-16"),
        "Please login as a caregiver first!"
    );
    say(&mut s, "logout");

    say(&mut s, "login_caregiver amy pw");
    assert_eq!(say(&mut s, "reserve 2021-10-15 pfizer"), "Please login as a patient!");
}

#[test]
fn search_lists_caregivers_and_doses() {
    let mut s = clinic();
    say(&mut s, "login_patient pat pw");

    let reply = s.execute("search_caregiver_schedule 2021-10-15");
    assert_eq!(
        reply.lines,
        [
            "The caregivers that are available for this date are:",
            "amy zed",
            "The number of available doses left for each vaccine:",
            "Name of Vaccine: pfizer Doses Left: 2",
        ]
    );
    assert_eq!(
        say(&mut s, "search_caregiver_schedule 15/10/2021"),
        "Please enter a valid date in the form 'yyyy-mm-dd'"
    );
    assert_eq!(say(&mut s, "search_caregiver_schedule"), "Please try again!");
}

#[test]
fn reserve_then_cancel_round_trip() {
    let mut s = clinic();
    say(&mut s, "login_patient pat pw");

    let reply = s.execute("reserve 2021-10-15 pfizer");
    assert_eq!(
        reply.lines,
        [
            "Congrats, you have successfully made an appointment!",
            "Your appointment ID is: 1",
            "Your assigned caregiver is: amy",
        ]
    );
    assert_eq!(doses(&s, "pfizer"), 1);
    assert_eq!(
        say(&mut s, "show_appointments"),
        "Appointment ID: 1 Vaccine Name: pfizer Date: 2021-10-15 Caregiver name: amy"
    );

    assert_eq!(
        say(&mut s, "cancel 1"),
        "Appointment 1 has been successfully canceled!"
    );
    assert_eq!(doses(&s, "pfizer"), 2);
    assert_eq!(say(&mut s, "show_appointments"), "No appointments scheduled.");
    assert_eq!(say(&mut s, "cancel 1"), "The appointment does not exist!");
    assert_eq!(
        say(&mut s, "cancel one"),
        "Please enter a valid appointment ID!"
    );

    // amy's slot came back, so the next booking lands on her again.
    let reply = s.execute("reserve 2021-10-15 pfizer");
    assert_eq!(reply.lines[2], "Your assigned caregiver is: amy");
}

#[test]
fn reserve_failures() {
    let mut s = clinic();
    say(&mut s, "login_patient pat pw");

    assert_eq!(say(&mut s, "reserve 2021-10-15"), "Please try again!");
    assert_eq!(
        say(&mut s, "reserve tomorrow pfizer"),
        "Please enter a valid date in the form 'yyyy-mm-dd'"
    );
    assert_eq!(
        say(&mut s, "reserve 2021-10-15 moderna"),
        "Please enter a valid vaccine name"
    );
    assert_eq!(
        say(&mut s, "reserve 2021-12-25 pfizer"),
        "No Caregiver is available!"
    );

    s.execute("reserve 2021-10-15 pfizer");
    s.execute("reserve 2021-10-15 pfizer");
    assert_eq!(doses(&s, "pfizer"), 0);
    assert_eq!(
        say(&mut s, "reserve 2021-10-15 pfizer"),
        "Not enough available doses!"
    );
}

#[test]
fn caregiver_sees_patients_and_may_cancel() {
    let mut s = clinic();
    say(&mut s, "create_patient peg pw");
    say(&mut s, "login_patient pat pw");
    s.execute("reserve 2021-10-15 pfizer");
    say(&mut s, "logout");

    say(&mut s, "login_patient peg pw");
    assert_eq!(say(&mut s, "cancel 1"), "Sorry, you need permission");
    say(&mut s, "logout");

    say(&mut s, "login_caregiver amy pw");
    assert_eq!(
        say(&mut s, "show_appointments"),
        "Appointment ID: 1 Vaccine Name: pfizer Date: 2021-10-15 Patient name: pat"
    );
    assert_eq!(
        say(&mut s, "cancel 1"),
        "Appointment 1 has been successfully canceled!"
    );
}

#[test]
fn caregiver_inventory_and_availability_input_checks() {
    let mut s = clinic();
    say(&mut s, "login_caregiver amy pw");

    assert_eq!(say(&mut s, "add_doses pfizer"), "Please try again!");
    assert_eq!(
        say(&mut s, "add_doses pfizer lots"),
        "Please enter a valid number of doses!"
    );
    assert_eq!(
        say(&mut s, "add_doses pfizer -3"),
        "Please enter a valid number of doses!"
    );
    assert_eq!(say(&mut s, "add_doses moderna 4"), "Doses updated!");
    assert_eq!(doses(&s, "moderna"), 4);

    assert_eq!(
        say(&mut s, "upload_availability 2021-02-30"),
        "Please enter a valid date in the form 'yyyy-mm-dd'"
    );
    assert_eq!(
        say(&mut s, "upload_availability 2021-10-15"),
        "Availability for 2021-10-15 was already uploaded!"
    );
}

#[test]
fn dose_count_overflow_leaves_inventory_usable() {
    let mut s = clinic();
    say(&mut s, "login_caregiver amy pw");

    assert_eq!(
        say(&mut s, "add_doses pfizer 9223372036854775807"),
        "Please enter a valid number of doses!"
    );
    assert_eq!(doses(&s, "pfizer"), 2);
    assert_eq!(
        say(&mut s, "add_doses pfizer 9223372036854775805"),
        "Doses updated!"
    );
    assert_eq!(
        say(&mut s, "add_doses pfizer 1"),
        "Please enter a valid number of doses!"
    );
    assert_eq!(doses(&s, "pfizer"), i64::MAX);

    let reply = s.execute("search_caregiver_schedule 2021-10-15");
    assert_eq!(
        reply.lines.last().map(String::as_str),
        Some("Name of Vaccine: pfizer Doses Left: 9223372036854775807")
    );
}

#[test]
fn repl_prints_prompt_and_stops_on_quit() {
    let mut s = shell();
    let input = b"create_patient pat pw\nquit\nlogin_patient pat pw\n";
    let mut out = Vec::new();

    repl::run(&mut s, &input[..], &mut out, "> ", false).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "> Created user pat\n> Bye!\n");
    assert!(s.current().is_none());
}

#[test]
fn repl_ends_quietly_at_eof() {
    let mut s = shell();
    let mut out = Vec::new();
    repl::run(&mut s, &b"help\n"[..], &mut out, "$ ", true).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Welcome to the COVID-19 Vaccine Reservation Scheduling Application!"));
    assert!(text.contains("> cancel <appointment_id>"));
    assert!(text.ends_with("$ \n"));
}
