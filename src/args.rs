//! Command-line argument parsing using clap.
//!
//! Positional arguments follow the `cal` convention: `[[month] year]`

use chrono::NaiveDate;
use clap::{Parser, ValueHint};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::AppError;
use crate::formatter::parse_month;
use crate::grid::MonthCursor;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, ColumnsMode, GUTTER_WIDTH_REGULAR, GridContext, MAX_MONTHS_COUNT,
};

#[derive(Parser, Debug)]
#[command(name = "monthgrid")]
#[command(about = "Displays whole-week month grids", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Monday (default is Sunday).
    #[arg(short = 'm', long, help_heading = "Calendar options")]
    pub monday: bool,

    /// Display all twelve months of the year.
    #[arg(short = 'y', long, help_heading = "Display options")]
    pub year: bool,

    /// Display three months (previous, current, next).
    #[arg(short = '3', long = "three", help_heading = "Display options")]
    pub three_months: bool,

    /// Number of months to display, starting with the given month.
    #[arg(
        short = 'n',
        long = "months",
        help_heading = "Display options",
        value_name = "num"
    )]
    pub months_count: Option<u32>,

    /// Month (1-12 or name), or a year when given alone.
    #[arg(index = 1, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Print the grid cells as JSON instead of text.
    #[arg(long, help_heading = "Output options")]
    pub json: bool,

    /// Overlay events from a JSON file.
    #[arg(
        long,
        help_heading = "Output options",
        value_name = "file",
        value_hint = ValueHint::FilePath
    )]
    pub events: Option<PathBuf>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display month grids padded to whole weeks.

Without any arguments, display the current month.

Examples:
  monthgrid                  Display current month
  monthgrid -3               Display three months (prev, current, next)
  monthgrid 2 2024           Display February 2024
  monthgrid 2024             Display every month of 2024
  monthgrid --json 12 2024   Print December 2024 cells as JSON
  monthgrid --events ev.json Mark days that have events

Environment:
  MONTHGRID_TEST_TIME=YYYY-MM-DD  Override today's date
  RUST_LOG=debug                  Log diagnostics to stderr";

/// Months selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub start: MonthCursor,
    pub count: u32,
}

impl DisplayRange {
    /// Consecutive months from `start`; stops early instead of wrapping past the year range.
    pub fn months(&self) -> impl Iterator<Item = MonthCursor> + '_ {
        (0..self.count).map_while(move |i| {
            i32::try_from(i)
                .ok()
                .and_then(|offset| self.start.offset(offset))
        })
    }
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl GridContext {
    pub fn new(args: &Args, today: NaiveDate) -> Result<Self, AppError> {
        let color = !args.color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => {
                let n = s
                    .parse::<u32>()
                    .map_err(|_| AppError::Usage(format!("Invalid columns value: {}", s)))?;
                if n == 0 {
                    return Err(AppError::Usage("Columns must be positive".to_string()));
                }
                ColumnsMode::Fixed(n)
            }
        };

        // Prevent conflicting display modes
        let mode_count = [args.year, args.three_months, args.months_count.is_some()]
            .iter()
            .filter(|&&x| x)
            .count();

        if mode_count > 1 {
            return Err(AppError::Usage(
                "Options -y, -3, and -n are mutually exclusive".to_string(),
            ));
        }

        Ok(GridContext {
            week_start: if args.monday {
                chrono::Weekday::Mon
            } else {
                chrono::Weekday::Sun
            },
            color,
            today,
            gutter_width: GUTTER_WIDTH_REGULAR,
            columns,
        })
    }
}

fn parse_year(s: &str) -> Result<i32, AppError> {
    let year = s
        .parse::<i32>()
        .map_err(|_| AppError::Usage(format!("Invalid year: {}", s)))?;
    if !(1..=9999).contains(&year) {
        return Err(AppError::Usage(format!(
            "Invalid year: {} (must be 1-9999)",
            year
        )));
    }
    Ok(year)
}

/// Resolve positional arguments and display flags into the months to show.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: month (1-12 or name) of the current year, or a whole year
/// - 2 args: month year
pub fn get_display_range(args: &Args, today: NaiveDate) -> Result<DisplayRange, AppError> {
    let current = MonthCursor::from_date(today);

    let (target, whole_year) = match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, None) => (current, false),
        (Some(val), None) => {
            if let Some(month) = parse_month(val) {
                (
                    MonthCursor {
                        year: current.year,
                        month0: month - 1,
                    },
                    false,
                )
            } else {
                // A lone year must have 4 digits
                let year = parse_year(val)
                    .ok()
                    .filter(|y| *y >= 1000)
                    .ok_or_else(|| AppError::Usage(format!("Invalid argument: {}", val)))?;
                (MonthCursor { year, month0: 0 }, true)
            }
        }
        (Some(month_str), Some(year_str)) => {
            let month = parse_month(month_str)
                .ok_or_else(|| AppError::Usage(format!("Invalid month: {}", month_str)))?;
            let year = parse_year(year_str)?;
            (
                MonthCursor {
                    year,
                    month0: month - 1,
                },
                false,
            )
        }
        (None, Some(_)) => {
            return Err(AppError::Usage("Invalid argument combination".to_string()));
        }
    };

    // Display mode priority: year > three_months > months_count > single
    let range = if args.year || whole_year {
        DisplayRange {
            start: MonthCursor {
                year: target.year,
                month0: 0,
            },
            count: 12,
        }
    } else if args.three_months {
        let start = target
            .previous()
            .ok_or_else(|| AppError::Usage("Month out of range".to_string()))?;
        DisplayRange { start, count: 3 }
    } else if let Some(count) = args.months_count {
        if count == 0 {
            return Err(AppError::Usage("Months count must be positive".to_string()));
        }
        if count > MAX_MONTHS_COUNT {
            return Err(AppError::Usage(format!(
                "Months count must be at most {}",
                MAX_MONTHS_COUNT
            )));
        }
        DisplayRange {
            start: target,
            count,
        }
    } else {
        DisplayRange {
            start: target,
            count: 1,
        }
    };

    Ok(range)
}
