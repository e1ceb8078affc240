//! Type definitions and constants for month grids and their display.

use chrono::{NaiveDate, Weekday};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Which calendar month a cell falls into, relative to the requested month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Membership {
    /// Leading cell padding the first week.
    PreviousMonth,
    /// Day of the requested month.
    TargetMonth,
    /// Trailing cell padding the last week.
    NextMonth,
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    /// Absolute date this cell represents.
    pub date: NaiveDate,
    /// Day offset from the 1st of the target month (1-based; <= 0 for leading cells).
    pub raw_offset: i64,
    /// Day-of-month numeral to render, re-based to the month the cell belongs to.
    pub display_day: u32,
    pub is_today: bool,
    pub membership: Membership,
    pub days_in_target_month: u32,
    pub days_in_previous_month: u32,
}

impl CalendarCell {
    pub fn is_in_target_month(&self) -> bool {
        self.membership == Membership::TargetMonth
    }

    pub fn is_in_next_month(&self) -> bool {
        self.membership == Membership::NextMonth
    }

    pub fn is_in_previous_month(&self) -> bool {
        self.membership == Membership::PreviousMonth
    }

    /// Canonical timestamp of the cell: midnight UTC with millisecond precision.
    pub fn iso_stamp(&self) -> String {
        format!("{}T00:00:00.000Z", self.date.format("%Y-%m-%d"))
    }
}

impl Serialize for CalendarCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CalendarCell", 9)?;
        state.serialize_field("date", &self.date.format("%Y-%m-%d").to_string())?;
        state.serialize_field("isoStamp", &self.iso_stamp())?;
        state.serialize_field("displayDay", &self.display_day)?;
        state.serialize_field("isToday", &self.is_today)?;
        state.serialize_field("isInTargetMonth", &self.is_in_target_month())?;
        state.serialize_field("isInNextMonth", &self.is_in_next_month())?;
        state.serialize_field("isInPreviousMonth", &self.is_in_previous_month())?;
        state.serialize_field("daysInTargetMonth", &self.days_in_target_month)?;
        state.serialize_field("daysInPreviousMonth", &self.days_in_previous_month)?;
        state.end()
    }
}

/// Grid of whole weeks covering one month, in row-major reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-indexed month after rollover normalization (0 = January).
    pub month0: u32,
    /// Weekday of the 1st of the month.
    pub first_weekday: Weekday,
    /// First column of every row.
    pub week_start: Weekday,
    pub leading_days: u32,
    pub trailing_fill_days: u32,
    pub days_in_target_month: u32,
    pub days_in_previous_month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarCell> {
        self.cells.iter()
    }

    /// Rows of seven cells, top to bottom.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// One-based month number, as used for display.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }
}

impl IntoIterator for MonthGrid {
    type Item = CalendarCell;
    type IntoIter = std::vec::IntoIter<CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarCell;
    type IntoIter = std::slice::Iter<'a, CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// Display options for rendering grids.
#[derive(Clone, Debug)]
pub struct GridContext {
    /// First day of the week (Sunday unless overridden).
    pub week_start: Weekday,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Date used for today marking.
    pub today: NaiveDate,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
    pub columns: ColumnsMode,
}

pub const DAYS_PER_WEEK: usize = 7;
/// Width of one rendered week row: seven cells of a 2-column day plus a marker column.
pub const GRID_WIDTH: usize = 21;
pub const GUTTER_WIDTH_REGULAR: usize = 2;
pub const MAX_EVENTS_PER_DAY: usize = 2;
/// Upper bound for `-n/--months` (one hundred years).
pub const MAX_MONTHS_COUNT: u32 = 1200;

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

pub const TEST_TIME_VAR: &str = "MONTHGRID_TEST_TIME";

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
pub const COLOR_UNDERLINE: &str = "\x1b[4m";
