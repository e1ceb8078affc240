//! Month grid calculator with a calendar display front end.
//!
//! Features:
//! - Whole-week month grids with leading/trailing days from adjacent months
//! - Display-day resolution and month-membership flags per cell
//! - Injectable clock for today marking
//! - Event overlay, text rendering and JSON export

pub mod args;
pub mod clock;
pub mod error;
pub mod events;
pub mod formatter;
pub mod grid;
pub mod types;
