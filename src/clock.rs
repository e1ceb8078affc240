//! Source of "today" for today marking.
//!
//! Grid computation never reads the system clock itself; callers pick a
//! [`Clock`] and pass the date in.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::types::TEST_TIME_VAR;

pub trait Clock {
    /// Current calendar date, without time of day.
    fn today(&self) -> NaiveDate;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Clock honouring `MONTHGRID_TEST_TIME=YYYY-MM-DD`, falling back to the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvClock;

impl Clock for EnvClock {
    fn today(&self) -> NaiveDate {
        if let Ok(value) = std::env::var(TEST_TIME_VAR) {
            match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) => {
                    debug!(%date, "using {TEST_TIME_VAR} override");
                    return date;
                }
                Err(e) => warn!("Ignoring {TEST_TIME_VAR}={value:?}: {e}"),
            }
        }
        SystemClock.today()
    }
}
