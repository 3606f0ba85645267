use super::util::WeekdayExt;
use crate::appointments::DateKey;
use thiserror::Error;
use time::{Date, Month};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// One row of a month grid, Sunday first; `None` marks cells belonging to
/// the neighbouring months
pub(crate) type Week = [Option<u8>; DAYS_IN_WEEK];

/// Length of the Gregorian cycle in years.  400 years hold 146097 days,
/// which is exactly 20871 weeks, so both weekdays and month lengths repeat.
const CYCLE_YEARS: i32 = 400;

/// First year of the cycle that all computations are shifted into, chosen
/// to sit well inside the range supported by `time::Date`
const CYCLE_BASE: i32 = 2000;

/// Returns the weekday of the first day of the given month, counting Sunday
/// as 0 and Saturday as 6.  `month0` is 0-based (0 = January).
pub(crate) fn first_weekday_index(year: i32, month0: u8) -> Result<u8, GridError> {
    let first = cycle_date(year, month_from_index(month0)?);
    Ok(first.weekday().index0())
}

/// Returns the number of days in the given month.  `month0` is 0-based
/// (0 = January).
pub(crate) fn days_in_month(year: i32, month0: u8) -> Result<u8, GridError> {
    Ok(month_from_index(month0)?.length(cycle_year(year)))
}

fn month_from_index(month0: u8) -> Result<Month, GridError> {
    month0
        .checked_add(1)
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(GridError::InvalidMonth(month0))
}

/// Shifts `year` by whole Gregorian cycles into the years supported by `time`
fn cycle_year(year: i32) -> i32 {
    CYCLE_BASE + year.rem_euclid(CYCLE_YEARS)
}

/// Returns the first day of the given month, shifted into the base cycle
fn cycle_date(year: i32, month: Month) -> Date {
    Date::from_calendar_date(cycle_year(year), month, 1)
        .expect("the first of a month in the base cycle should be a valid date")
}

/// Layout data for displaying a single month in a seven-column grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    first_weekday: u8,
    days: u8,
}

impl MonthGrid {
    pub(crate) fn new(year: i32, month: Month) -> Result<MonthGrid, GridError> {
        MonthGrid::from_index(year, u8::from(month) - 1)
    }

    pub(crate) fn from_index(year: i32, month0: u8) -> Result<MonthGrid, GridError> {
        Ok(MonthGrid {
            year,
            month: month_from_index(month0)?,
            first_weekday: first_weekday_index(year, month0)?,
            days: days_in_month(year, month0)?,
        })
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn first_weekday(&self) -> u8 {
        self.first_weekday
    }

    pub(crate) fn days(&self) -> u8 {
        self.days
    }

    pub(crate) fn contains(&self, day: u8) -> bool {
        (1..=self.days).contains(&day)
    }

    pub(crate) fn weeks(&self) -> Vec<Week> {
        let mut weeks = Vec::new();
        let mut week: Week = [None; DAYS_IN_WEEK];
        let mut col = usize::from(self.first_weekday);
        for day in 1..=self.days {
            week[col] = Some(day);
            col += 1;
            if col == DAYS_IN_WEEK {
                weeks.push(std::mem::replace(&mut week, [None; DAYS_IN_WEEK]));
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }
        weeks
    }

    /// Returns the (row, column) of `day` in the grid, or `None` if the
    /// month has no such day
    pub(crate) fn position(&self, day: u8) -> Option<(usize, usize)> {
        if !self.contains(day) {
            return None;
        }
        let offset = usize::from(self.first_weekday) + usize::from(day) - 1;
        Some((offset / DAYS_IN_WEEK, offset % DAYS_IN_WEEK))
    }

    pub(crate) fn date_key(&self, day: u8) -> DateKey {
        DateKey::new(self.year, self.month, day)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("month index {0} is out of range; expected 0 through 11")]
    InvalidMonth(u8),
}
