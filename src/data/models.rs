//! Data models for temperature records.

use std::fmt;

use thiserror::Error;

/// Temperature above which an entry is considered hot, exclusive.
pub const HOT_THRESHOLD: f64 = 25.0;
/// Temperature below which an entry is considered cold, exclusive.
pub const COLD_THRESHOLD: f64 = 10.0;

/// A single dated temperature observation.
///
/// Dates are kept as `YYYY-MM-DD` strings: that format sorts
/// lexically in chronological order, and equality checks are exact
/// string matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub date: String,
    pub temp: f64,
}

impl Entry {
    pub fn new(date: impl Into<String>, temp: f64) -> Self {
        Entry {
            date: date.into(),
            temp,
        }
    }

    /// Temperature band this entry falls into, used for color coding.
    pub fn band(&self) -> TempBand {
        if self.temp > HOT_THRESHOLD {
            TempBand::Hot
        } else if self.temp < COLD_THRESHOLD {
            TempBand::Cold
        } else {
            TempBand::Mild
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.date, self.temp)
    }
}

/// Coarse temperature classification driving display colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    Hot,
    Mild,
    Cold,
}

/// Error raised when a persisted line cannot be parsed into an Entry.
///
/// The storage layer drops such lines silently; the variants exist so
/// callers that do care (tests, mostly) can tell why a line failed.
#[derive(Debug, Error, PartialEq)]
pub enum ParseEntryError {
    #[error("line is empty")]
    Empty,
    #[error("line has no field separator")]
    MissingSeparator,
    #[error("temperature is not a number: {0:?}")]
    BadTemperature(String),
}

impl std::str::FromStr for Entry {
    type Err = ParseEntryError;

    /// Parse a `date,temperature` line.
    ///
    /// Extra comma-separated fields after the temperature are
    /// tolerated and ignored, matching the on-disk format's loose
    /// contract.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseEntryError::Empty);
        }
        let (date, rest) = line
            .split_once(',')
            .ok_or(ParseEntryError::MissingSeparator)?;
        let temp_field = rest.split(',').next().unwrap_or("").trim();
        let temp: f64 = temp_field
            .parse()
            .map_err(|_| ParseEntryError::BadTemperature(temp_field.to_string()))?;
        Ok(Entry::new(date.trim(), temp))
    }
}

/// The in-memory entry store.
///
/// Owns the full record set for the process lifetime. Order is
/// insertion/load order; display paths sort on demand. Mutations go
/// through [`upsert`](EntryLog::upsert) and
/// [`remove`](EntryLog::remove) only, so the one-entry-per-date
/// invariant holds.
#[derive(Debug, Default)]
pub struct EntryLog {
    entries: Vec<Entry>,
}

impl EntryLog {
    pub fn new(entries: Vec<Entry>) -> Self {
        EntryLog { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a new entry, or overwrite the temperature of an
    /// existing entry with the same date. Returns true when an
    /// existing entry was updated in place.
    pub fn upsert(&mut self, date: &str, temp: f64) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.date == date) {
            existing.temp = temp;
            true
        } else {
            self.entries.push(Entry::new(date, temp));
            false
        }
    }

    /// Remove every entry whose date exactly equals `date`.
    /// Returns the number of entries removed (0 or more).
    pub fn remove(&mut self, date: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.date != date);
        before - self.entries.len()
    }

    /// Entries sorted most-recent-date first.
    pub fn sorted_desc(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}
