//! Line-oriented front end for the vaccine scheduler.
//!
//! [`shell::Shell`] owns the SQLite connection and the logged-in identity and
//! turns one input line into one [`shell::Reply`]. [`repl::run`] wires it to
//! any reader/writer pair; the `vaxsched` binary passes stdin and stdout.

pub mod command;
pub mod error;
pub mod render;
pub mod repl;
pub mod shell;

pub use command::{Command, Operation};
pub use error::{Result, ShellError};
pub use shell::{Reply, Shell};
