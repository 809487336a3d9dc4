use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;
use time::{error::ComponentRange, Date, Month};

/// Number of years either side of the current one that can be selected
pub(crate) const YEAR_SPAN: i32 = 5;

/// A calendar month, which also serves as the key of a month record.
/// Displayed and parsed as `YYYY-MM`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    // Invariant: always the first day of the month
    first: Date,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, ComponentRange> {
        Date::from_calendar_date(year, month, 1).map(|first| YearMonth { first })
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth::new(date.year(), date.month())
            .expect("the first of the month of a valid date should be valid")
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> Month {
        self.first.month()
    }

    pub(crate) fn days_in_month(self) -> u8 {
        self.month().length(self.year())
    }

    /// Column of the 1st of the month in a Monday-first week: 0 for Monday
    /// through 6 for Sunday
    pub(crate) fn first_weekday_offset(self) -> u8 {
        self.first.weekday().number_days_from_monday()
    }

    pub(crate) fn with_month(self, month: Month) -> YearMonth {
        YearMonth::new(self.year(), month)
            .expect("every month of a valid year should be valid")
    }

    pub(crate) fn with_year(self, year: i32) -> Result<YearMonth, PeriodError> {
        YearMonth::new(year, self.month()).map_err(|_| PeriodError::OutOfTime)
    }

    pub(crate) fn next(self) -> Result<YearMonth, PeriodError> {
        match self.month() {
            Month::December => self.in_year(1, Month::January),
            m => Ok(self.with_month(m.next())),
        }
    }

    pub(crate) fn previous(self) -> Result<YearMonth, PeriodError> {
        match self.month() {
            Month::January => self.in_year(-1, Month::December),
            m => Ok(self.with_month(m.previous())),
        }
    }

    fn in_year(self, delta: i32, month: Month) -> Result<YearMonth, PeriodError> {
        let year = self.year().checked_add(delta).ok_or(PeriodError::OutOfTime)?;
        YearMonth::new(year, month).map_err(|_| PeriodError::OutOfTime)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for YearMonth {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<YearMonth, ParseMonthKeyError> {
        let err = || ParseMonthKeyError(s.to_owned());
        let (year, month) = s.rsplit_once('-').ok_or_else(err)?;
        if month.len() != 2 || year.trim_start_matches('-').is_empty() {
            return Err(err());
        }
        let year = year.parse::<i32>().map_err(|_| err())?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(err)?;
        YearMonth::new(year, month).map_err(|_| err())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid month {0:?}; expected YYYY-MM")]
pub(crate) struct ParseMonthKeyError(String);

/// The years offered by the year selector: a fixed span around the year the
/// program started in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearWindow {
    center: i32,
}

impl YearWindow {
    pub(crate) fn around(center: i32) -> YearWindow {
        YearWindow { center }
    }

    pub(crate) fn years(self) -> RangeInclusive<i32> {
        self.center.saturating_sub(YEAR_SPAN)..=self.center.saturating_add(YEAR_SPAN)
    }

    pub(crate) fn check(self, year: i32) -> Result<(), PeriodError> {
        let years = self.years();
        if years.contains(&year) {
            Ok(())
        } else {
            Err(PeriodError::OutsideYearWindow {
                year,
                first: *years.start(),
                last: *years.end(),
            })
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum PeriodError {
    #[error("year {year} is outside the selectable range {first}–{last}")]
    OutsideYearWindow { year: i32, first: i32, last: i32 },
    #[error("reached the end of time")]
    OutOfTime,
}
