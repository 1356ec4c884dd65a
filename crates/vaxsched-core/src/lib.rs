//! Shared building blocks for the vaccine scheduler: configuration loading,
//! the top-level error type, and the small value types every other crate uses.

pub mod config;
pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{format_date, parse_date, Role};
