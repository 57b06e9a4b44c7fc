// src/core/mod.rs

pub mod html;
pub mod normalize;
pub mod sanitize;
pub mod status;
pub mod table;

pub use status::{classify_cell, classify_status, AssignmentStatus, StatusSignals};
pub use table::{locate_table, HeaderMap, TableMatch};
