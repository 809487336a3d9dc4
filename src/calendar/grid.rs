use super::YearMonth;
use crate::holiday::holiday_on;
use crate::store::MonthRecord;
use std::iter::repeat;

pub(crate) const DAYS_IN_WEEK: usize = 7;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cell {
    Blank,
    Day(DayCell),
}

impl Cell {
    pub(crate) fn as_day(&self) -> Option<&DayCell> {
        match self {
            Cell::Blank => None,
            Cell::Day(dc) => Some(dc),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) day: u8,
    pub(crate) holiday: Option<&'static str>,
    pub(crate) text: String,
}

/// The cells of one month laid out in Monday-first weeks
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    period: YearMonth,
    leading: usize,
    // Invariant: length is a multiple of DAYS_IN_WEEK
    cells: Vec<Cell>,
}

impl MonthGrid {
    pub(crate) fn period(&self) -> YearMonth {
        self.period
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(DAYS_IN_WEEK)
    }

    pub(crate) fn week_count(&self) -> usize {
        self.cells.len() / DAYS_IN_WEEK
    }

    #[cfg(test)]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn leading_blanks(&self) -> usize {
        self.leading
    }

    #[cfg(test)]
    pub(crate) fn day_count(&self) -> usize {
        self.cells.iter().filter_map(Cell::as_day).count()
    }

    #[cfg(test)]
    pub(crate) fn day(&self, day: u8) -> Option<&DayCell> {
        self.cells
            .iter()
            .filter_map(Cell::as_day)
            .find(|dc| dc.day == day)
    }
}

/// Lay out the days of `period` as a grid of Monday-first weeks, filling each
/// day with its holiday (if any) and the text stored in `record`.
///
/// The day slots of `record` are grown to cover the whole month so that
/// later edits always have a slot to write into.
pub(crate) fn render_month(period: YearMonth, record: &mut MonthRecord) -> MonthGrid {
    let leading = usize::from(period.first_weekday_offset());
    let days = period.days_in_month();
    let trailing = (DAYS_IN_WEEK - (leading + usize::from(days)) % DAYS_IN_WEEK) % DAYS_IN_WEEK;
    record.ensure_days(days);
    let mut cells = Vec::with_capacity(leading + usize::from(days) + trailing);
    cells.extend(repeat(Cell::Blank).take(leading));
    cells.extend((1..=days).map(|day| {
        Cell::Day(DayCell {
            day,
            holiday: holiday_on(period.month(), day),
            text: record.day_entry(day).to_owned(),
        })
    }));
    cells.extend(repeat(Cell::Blank).take(trailing));
    MonthGrid {
        period,
        leading,
        cells,
    }
}
