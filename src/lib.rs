// src/lib.rs
//! Read saved PowerSchool portal pages into typed records.
//!
//! Everything public hangs off the `parse_*` functions re-exported from
//! [`extract`]; each takes the page HTML and never fails.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;
pub mod extract;
pub mod records;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::options::{PageKind, ParseOptions};
pub use extract::*;
pub use records::*;
