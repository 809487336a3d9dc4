use crate::calendar::{render_month, MonthGrid, PeriodError, YearMonth, YearWindow};
use crate::store::{MonthRecord, PlannerStore};
use crate::team::Team;
use time::{Date, Month};

/// An editable region of the planner
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Field {
    /// "Important notes" slot, indexed from 0
    Note(usize),
    Goals,
    Observation,
    /// Entry for a day of the month, numbered from 1
    Day(u8),
}

/// Everything shown for the selected team and month
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PlannerView {
    pub(crate) team: Team,
    pub(crate) notes: Vec<String>,
    pub(crate) goals: String,
    pub(crate) observation: String,
    pub(crate) grid: MonthGrid,
}

impl PlannerView {
    pub(crate) fn period(&self) -> YearMonth {
        self.grid.period()
    }
}

/// Owns the planner data and tracks which team and month are selected.
/// Edits always go to the record selected at the time of the edit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Planner {
    store: PlannerStore,
    team: Team,
    period: YearMonth,
    today: Date,
    years: YearWindow,
}

impl Planner {
    pub(crate) fn new(today: Date) -> Planner {
        Planner {
            store: PlannerStore::new(),
            team: Team::default(),
            period: YearMonth::containing(today),
            today,
            years: YearWindow::around(today.year()),
        }
    }

    pub(crate) fn with_team(mut self, team: Team) -> Planner {
        self.team = team;
        self
    }

    pub(crate) fn team(&self) -> Team {
        self.team
    }

    pub(crate) fn period(&self) -> YearMonth {
        self.period
    }

    /// The date the planner was started on
    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn home(&self) -> YearMonth {
        YearMonth::containing(self.today)
    }

    pub(crate) fn year_window(&self) -> YearWindow {
        self.years
    }

    pub(crate) fn store(&self) -> &PlannerStore {
        &self.store
    }

    pub(crate) fn toggle_team(&mut self) -> Team {
        self.team = self.team.other();
        log::info!("Switched to team {}", self.team);
        self.team
    }

    pub(crate) fn select(&mut self, period: YearMonth) -> Result<(), PeriodError> {
        self.years.check(period.year())?;
        if period != self.period {
            log::info!("Selected month {period}");
            self.period = period;
        }
        Ok(())
    }

    pub(crate) fn select_month(&mut self, month: Month) {
        // Same year, so still inside the window
        self.period = self.period.with_month(month);
        log::info!("Selected month {}", self.period);
    }

    pub(crate) fn select_year(&mut self, year: i32) -> Result<(), PeriodError> {
        self.years.check(year)?;
        self.select(self.period.with_year(year)?)
    }

    pub(crate) fn next_month(&mut self) -> Result<(), PeriodError> {
        self.select(self.period.next()?)
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), PeriodError> {
        self.select(self.period.previous()?)
    }

    pub(crate) fn next_year(&mut self) -> Result<(), PeriodError> {
        let year = self.period.year().checked_add(1).ok_or(PeriodError::OutOfTime)?;
        self.select_year(year)
    }

    pub(crate) fn previous_year(&mut self) -> Result<(), PeriodError> {
        let year = self.period.year().checked_sub(1).ok_or(PeriodError::OutOfTime)?;
        self.select_year(year)
    }

    pub(crate) fn go_home(&mut self) {
        self.period = self.home();
        log::info!("Returning to month {}", self.period);
    }

    /// Returns the record of the selected team and month, creating it if
    /// needed
    pub(crate) fn record(&mut self) -> &mut MonthRecord {
        self.store.month_record(self.team, self.period)
    }

    pub(crate) fn text(&mut self, field: Field) -> String {
        let record = self.record();
        match field {
            Field::Note(i) => record.note(i),
            Field::Goals => record.goals(),
            Field::Observation => record.observation(),
            Field::Day(day) => record.day_entry(day),
        }
        .to_owned()
    }

    pub(crate) fn edit(&mut self, field: Field, text: String) {
        let record = self.record();
        match field {
            Field::Note(i) => record.set_note(i, text),
            Field::Goals => record.set_goals(text),
            Field::Observation => record.set_observation(text),
            Field::Day(day) => record.set_day_entry(day, text),
        }
    }

    /// Snapshot the selected team's record for the selected month, rendering
    /// its calendar
    pub(crate) fn refresh(&mut self) -> PlannerView {
        let team = self.team;
        let period = self.period;
        let record = self.record();
        let grid = render_month(period, record);
        PlannerView {
            team,
            notes: record.notes().to_vec(),
            goals: record.goals().to_owned(),
            observation: record.observation().to_owned(),
            grid,
        }
    }
}
