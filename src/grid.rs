//! Month grid calculation: weekday of the 1st via Zeller's congruence, whole-week
//! padding, and display-day resolution for leading and trailing cells.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::clock::Clock;
use crate::error::GridError;
use crate::types::{CalendarCell, DAYS_PER_WEEK, Membership, MonthGrid};

const WEEK: u32 = DAYS_PER_WEEK as u32;

/// Check if a year is a leap year (proleptic Gregorian).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in a one-based month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Weekday of the 1st of a one-based month, using Zeller's congruence.
pub fn first_weekday(year: i32, month: u32) -> Weekday {
    let m = if month < 3 { month + 12 } else { month };
    let q: i32 = 1;
    let year_z = if month < 3 { year - 1 } else { year };
    // Euclidean split keeps the formula valid for years before 1 CE
    let k: i32 = year_z.rem_euclid(100);
    let j: i32 = year_z.div_euclid(100);

    let h = (q + (13 * (m as i32 + 1)) / 5 + k + k / 4 + j.div_euclid(4) - 2 * j).rem_euclid(7);
    // h: 0=Sat, 1=Sun, 2=Mon, 3=Tue, 4=Wed, 5=Thu, 6=Fri
    match h {
        0 => Weekday::Sat,
        1 => Weekday::Sun,
        2 => Weekday::Mon,
        3 => Weekday::Tue,
        4 => Weekday::Wed,
        5 => Weekday::Thu,
        _ => Weekday::Fri,
    }
}

/// Days needed after the last of the month to complete the final week.
pub fn trailing_fill_days(leading_days: u32, days_in_month: u32) -> u32 {
    let total = leading_days + days_in_month;
    if total % WEEK == 0 {
        0
    } else {
        WEEK - total % WEEK
    }
}

/// Numeral shown in a cell, re-based to the month the cell belongs to.
///
/// `raw_offset` is the day offset from the 1st of the target month: `<= 0` for
/// leading cells, `> days_in_target_month` for trailing ones. Arguments that do
/// not describe a real cell (e.g. a leading offset beyond the previous month)
/// clamp to 0 rather than wrapping.
pub fn resolve_display_day(
    raw_offset: i64,
    membership: Membership,
    days_in_target_month: u32,
    days_in_previous_month: u32,
) -> u32 {
    let day = match membership {
        Membership::TargetMonth => raw_offset,
        Membership::NextMonth => raw_offset - i64::from(days_in_target_month),
        Membership::PreviousMonth => i64::from(days_in_previous_month) + raw_offset,
    };
    u32::try_from(day.max(0)).unwrap_or(u32::MAX)
}

fn classify(raw_offset: i64, days_in_target_month: u32) -> Membership {
    if raw_offset <= 0 {
        Membership::PreviousMonth
    } else if raw_offset > i64::from(days_in_target_month) {
        Membership::NextMonth
    } else {
        Membership::TargetMonth
    }
}

/// Whether a weekday header column should be highlighted: `today` lies in the
/// displayed month and falls on that weekday.
pub fn is_header_today(weekday: Weekday, month0: u32, year: i32, today: NaiveDate) -> bool {
    today.year() == year && today.month0() == month0 && today.weekday() == weekday
}

/// Build the Sunday-first grid for a zero-indexed month.
///
/// Months outside `0..=11` roll over into neighbouring years. `today` marks the
/// matching target-month cell.
pub fn compute_month_grid(
    month0: i32,
    year: i32,
    today: NaiveDate,
) -> Result<MonthGrid, GridError> {
    compute_month_grid_with(month0, year, today, Weekday::Sun)
}

/// Build the grid reading "now" from a clock at the call site.
pub fn compute_month_grid_now<C: Clock + ?Sized>(
    month0: i32,
    year: i32,
    clock: &C,
) -> Result<MonthGrid, GridError> {
    compute_month_grid(month0, year, clock.today())
}

/// Build the grid with a configurable first column.
///
/// With `Weekday::Sun` this is exactly [`compute_month_grid`].
pub fn compute_month_grid_with(
    month0: i32,
    year: i32,
    today: NaiveDate,
    week_start: Weekday,
) -> Result<MonthGrid, GridError> {
    let target = MonthCursor::new(year, month0).ok_or_else(|| {
        GridError::InvalidArgument(format!("month {month0} of year {year} is out of range"))
    })?;
    let month = target.month0 + 1;

    let first_of_month = NaiveDate::from_ymd_opt(target.year, month, 1).ok_or_else(|| {
        GridError::InvalidArgument(format!("year {} is out of range", target.year))
    })?;

    let first = first_weekday(target.year, month);
    let days_in_target_month = days_in_month(target.year, month);
    let previous = target
        .previous()
        .ok_or_else(|| GridError::InvalidArgument(format!("year {} is out of range", target.year)))?;
    let days_in_previous_month = days_in_month(previous.year, previous.month0 + 1);

    let leading_days =
        (first.num_days_from_sunday() + WEEK - week_start.num_days_from_sunday()) % WEEK;
    let trailing = trailing_fill_days(leading_days, days_in_target_month);
    let total = leading_days + days_in_target_month + trailing;

    let mut cells = Vec::with_capacity(total as usize);
    for index in 0..total {
        let raw_offset = i64::from(index) - i64::from(leading_days) + 1;
        let membership = classify(raw_offset, days_in_target_month);
        let date = first_of_month
            .checked_add_signed(Duration::days(raw_offset - 1))
            .ok_or_else(|| {
                GridError::InvalidArgument(format!(
                    "grid for {month}/{} leaves the supported date range",
                    target.year
                ))
            })?;

        cells.push(CalendarCell {
            date,
            raw_offset,
            display_day: resolve_display_day(
                raw_offset,
                membership,
                days_in_target_month,
                days_in_previous_month,
            ),
            is_today: membership == Membership::TargetMonth && date == today,
            membership,
            days_in_target_month,
            days_in_previous_month,
        });
    }

    debug!(
        year = target.year,
        month,
        leading_days,
        trailing,
        cells = cells.len(),
        "computed month grid"
    );

    Ok(MonthGrid {
        year: target.year,
        month0: target.month0,
        first_weekday: first,
        week_start,
        leading_days,
        trailing_fill_days: trailing,
        days_in_target_month,
        days_in_previous_month,
        cells,
    })
}

/// Position in the month sequence, used for previous/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    pub year: i32,
    /// Zero-indexed month, always in `0..=11`.
    pub month0: u32,
}

impl MonthCursor {
    /// Normalize a possibly out-of-range zero-indexed month into a cursor.
    pub fn new(year: i32, month0: i32) -> Option<Self> {
        Self::from_index(i64::from(year) * 12 + i64::from(month0))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month0: date.month0(),
        }
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month0)
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        Some(MonthCursor {
            year,
            month0: index.rem_euclid(12) as u32,
        })
    }

    /// Move by `months`, carrying into the year as needed.
    pub fn offset(self, months: i32) -> Option<Self> {
        Self::from_index(self.index() + i64::from(months))
    }

    pub fn next(self) -> Option<Self> {
        self.offset(1)
    }

    pub fn previous(self) -> Option<Self> {
        self.offset(-1)
    }

    /// One-based month number.
    pub fn month(self) -> u32 {
        self.month0 + 1
    }
}
