use crate::calendar::YearMonth;
use crate::team::Team;
use std::collections::{BTreeMap, HashMap};

/// Number of "important notes" slots in every month record
pub(crate) const NOTE_SLOTS: usize = 15;

/// Everything one team wrote down for one month
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonthRecord {
    notes: [String; NOTE_SLOTS],
    goals: String,
    observation: String,
    // Slot `d - 1` holds the entry for day `d`
    days: Vec<String>,
}

impl MonthRecord {
    pub(crate) fn notes(&self) -> &[String] {
        &self.notes
    }

    pub(crate) fn note(&self, index: usize) -> &str {
        self.notes.get(index).map_or("", String::as_str)
    }

    pub(crate) fn goals(&self) -> &str {
        &self.goals
    }

    pub(crate) fn observation(&self) -> &str {
        &self.observation
    }

    /// Returns the entry for the 1-indexed `day`, or an empty string if
    /// nothing has been written there
    pub(crate) fn day_entry(&self, day: u8) -> &str {
        day.checked_sub(1)
            .and_then(|i| self.days.get(usize::from(i)))
            .map_or("", String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn days_len(&self) -> usize {
        self.days.len()
    }

    /// Grow the day slots so that days `1..=day` all have an entry
    pub(crate) fn ensure_days(&mut self, day: u8) {
        let len = usize::from(day);
        if self.days.len() < len {
            self.days.resize(len, String::new());
        }
    }

    pub(crate) fn set_note(&mut self, index: usize, text: String) {
        debug_assert!(index < NOTE_SLOTS, "note index {index} out of range");
        match self.notes.get_mut(index) {
            Some(slot) => *slot = text,
            None => log::warn!("Ignoring write to nonexistent note slot {index}"),
        }
    }

    pub(crate) fn set_goals(&mut self, text: String) {
        self.goals = text;
    }

    pub(crate) fn set_observation(&mut self, text: String) {
        self.observation = text;
    }

    /// Write the entry for the 1-indexed `day`, growing the day slots first
    /// if needed
    pub(crate) fn set_day_entry(&mut self, day: u8, text: String) {
        debug_assert!(day > 0, "days are numbered from 1");
        let Some(i) = day.checked_sub(1) else {
            log::warn!("Ignoring write to day 0");
            return;
        };
        self.ensure_days(day);
        if let Some(slot) = self.days.get_mut(usize::from(i)) {
            *slot = text;
        }
    }
}

/// In-memory planner data: team → month → record.  Records are created on
/// first access and live as long as the store.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PlannerStore {
    teams: HashMap<Team, BTreeMap<YearMonth, MonthRecord>>,
}

impl PlannerStore {
    pub(crate) fn new() -> PlannerStore {
        PlannerStore::default()
    }

    /// Returns the record for `team` in `period`, inserting a blank one if
    /// none exists yet
    pub(crate) fn month_record(&mut self, team: Team, period: YearMonth) -> &mut MonthRecord {
        self.teams
            .entry(team)
            .or_default()
            .entry(period)
            .or_insert_with(|| {
                log::debug!("Creating blank record for team {team}, month {period}");
                MonthRecord::default()
            })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, team: Team, period: YearMonth) -> Option<&MonthRecord> {
        self.teams.get(&team).and_then(|months| months.get(&period))
    }

    pub(crate) fn record_count(&self) -> usize {
        self.teams.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn march_2024() -> YearMonth {
        YearMonth::new(2024, Month::March).unwrap()
    }

    #[test]
    fn test_blank_record() {
        let record = MonthRecord::default();
        assert_eq!(record.notes().len(), NOTE_SLOTS);
        assert!(record.notes().iter().all(String::is_empty));
        assert_eq!(record.goals(), "");
        assert_eq!(record.observation(), "");
        assert_eq!(record.days_len(), 0);
        assert_eq!(record.day_entry(1), "");
        assert_eq!(record.day_entry(0), "");
    }

    #[test]
    fn test_set_note() {
        let mut record = MonthRecord::default();
        record.set_note(3, String::from("ligar para o fornecedor"));
        assert_eq!(record.note(3), "ligar para o fornecedor");
        assert_eq!(record.notes()[3], "ligar para o fornecedor");
        assert_eq!(record.note(2), "");
        assert_eq!(record.notes().len(), NOTE_SLOTS);
    }

    #[test]
    fn test_set_goals_and_observation() {
        let mut record = MonthRecord::default();
        record.set_goals(String::from("fechar o mês"));
        record.set_observation(String::from("nada a declarar"));
        record.set_goals(String::from("fechar o trimestre"));
        assert_eq!(record.goals(), "fechar o trimestre");
        assert_eq!(record.observation(), "nada a declarar");
    }

    #[test]
    fn test_set_day_entry_grows_days() {
        let mut record = MonthRecord::default();
        record.set_day_entry(15, String::from("text"));
        assert_eq!(record.days_len(), 15);
        assert_eq!(record.day_entry(15), "text");
        assert_eq!(record.day_entry(14), "");
        assert_eq!(record.day_entry(16), "");
    }

    #[test]
    fn test_set_day_entry_keeps_longer_days() {
        let mut record = MonthRecord::default();
        record.ensure_days(31);
        record.set_day_entry(2, String::from("reunião"));
        assert_eq!(record.days_len(), 31);
        assert_eq!(record.day_entry(2), "reunião");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "note index 15 out of range")]
    fn test_set_note_past_last_slot() {
        MonthRecord::default().set_note(NOTE_SLOTS, String::from("sobrando"));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "days are numbered from 1")]
    fn test_set_day_zero() {
        let mut record = MonthRecord::default();
        record.ensure_days(31);
        assert_eq!(record.day_entry(0), "");
        record.set_day_entry(0, String::from("dia zero"));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_bad_writes_are_ignored() {
        let mut record = MonthRecord::default();
        record.ensure_days(31);
        record.set_note(NOTE_SLOTS, String::from("sobrando"));
        record.set_day_entry(0, String::from("dia zero"));
        assert_eq!(record, {
            let mut blank = MonthRecord::default();
            blank.ensure_days(31);
            blank
        });
        assert_eq!(record.day_entry(0), "");
    }

    #[test]
    fn test_ensure_days_never_shrinks() {
        let mut record = MonthRecord::default();
        record.ensure_days(30);
        record.ensure_days(28);
        assert_eq!(record.days_len(), 30);
    }

    #[test]
    fn test_month_record_is_idempotent() {
        let mut store = PlannerStore::new();
        let first: *const MonthRecord = store.month_record(Team::Tarde, march_2024());
        let second: *const MonthRecord = store.month_record(Team::Tarde, march_2024());
        assert_eq!(first, second);
        assert_eq!(store.record_count(), 1);
    }

    #[test]
    fn test_mutations_persist_across_lookups() {
        let mut store = PlannerStore::new();
        store
            .month_record(Team::Tarde, march_2024())
            .set_goals(String::from("bater a meta"));
        assert_eq!(
            store.month_record(Team::Tarde, march_2024()).goals(),
            "bater a meta"
        );
    }

    #[test]
    fn test_teams_are_isolated() {
        let mut store = PlannerStore::new();
        let tarde = store.month_record(Team::Tarde, march_2024());
        tarde.set_note(0, String::from("só da tarde"));
        tarde.set_day_entry(10, String::from("plantão"));
        let manha = store.month_record(Team::Manha, march_2024());
        assert_eq!(manha, &MonthRecord::default());
        assert_eq!(store.record_count(), 2);
    }

    #[test]
    fn test_months_are_isolated() {
        let mut store = PlannerStore::new();
        store
            .month_record(Team::Manha, march_2024())
            .set_observation(String::from("março"));
        let april = YearMonth::new(2024, Month::April).unwrap();
        assert_eq!(store.month_record(Team::Manha, april).observation(), "");
    }

    #[test]
    fn test_get_does_not_create() {
        let store = PlannerStore::new();
        assert_eq!(store.get(Team::Tarde, march_2024()), None);
        assert_eq!(store.record_count(), 0);
    }
}
