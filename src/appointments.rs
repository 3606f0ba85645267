use std::collections::HashMap;
use std::fmt;
use time::{Date, Month};

/// Canonical identifier of a calendar day, formatted `YYYY-MM-DD` with a
/// 1-based, zero-padded month and a zero-padded day.  The year is written
/// as a plain integer.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DateKey(String);

impl DateKey {
    pub(crate) fn new(year: i32, month: Month, day: u8) -> DateKey {
        DateKey(format!("{year}-{:02}-{day:02}", u8::from(month)))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> DateKey {
        DateKey::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory mapping from days to their appointment notes.
///
/// The store has no internal locking: mutation requires `&mut self`, so all
/// writes go through whoever owns it.  Sharing one between threads would
/// need an external `Mutex`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct AppointmentStore {
    appointments: HashMap<DateKey, Vec<String>>,
}

impl AppointmentStore {
    pub(crate) fn new() -> AppointmentStore {
        AppointmentStore::default()
    }

    /// Returns a copy of the notes stored for `key`, or an empty list if
    /// nothing has been saved for it
    pub(crate) fn get(&self, key: &DateKey) -> Vec<String> {
        self.appointments.get(key).cloned().unwrap_or_default()
    }

    /// Replaces the notes stored for `key` with a copy of `notes`.  Saving
    /// an empty list keeps the key with an empty list.
    pub(crate) fn save<S: AsRef<str>>(&mut self, key: DateKey, notes: &[S]) {
        let notes = notes
            .iter()
            .map(|s| s.as_ref().to_owned())
            .collect::<Vec<_>>();
        log::debug!("Storing {} note(s) for {key}", notes.len());
        self.appointments.insert(key, notes);
    }

    pub(crate) fn has_appointments(&self, key: &DateKey) -> bool {
        self.appointments.get(key).is_some_and(|notes| !notes.is_empty())
    }
}

/// Splits editor text into one note per line.  A trailing `\r` is removed
/// from each line and trailing blank lines are dropped; interior blank lines
/// are kept.
///
/// Empty text yields `[]`, not `[""]`: clearing the editor and saving leaves
/// the day with no notes rather than a single empty one.
pub(crate) fn notes_from_text(text: &str) -> Vec<String> {
    let mut notes = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
        .collect::<Vec<_>>();
    while notes.last().is_some_and(String::is_empty) {
        notes.pop();
    }
    notes
}
