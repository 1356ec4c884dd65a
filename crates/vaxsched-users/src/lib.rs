//! Patient and caregiver accounts.
//!
//! Each role lives in its own table. Passwords are never stored: an account
//! row holds a random salt and the Argon2id hash of the password with that
//! salt, and login recomputes the hash to compare.

pub mod accounts;
pub mod db;
pub mod error;
pub mod password;
pub mod types;

pub use error::{Result, UserError};
pub use types::Account;
