//! Database operations for the facility tables.

mod read;
mod types;
mod write;

pub use read::{get_facility, list_candidates};
pub use write::{deactivate_facility, insert_facility};
