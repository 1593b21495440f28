//! Flat-file storage layer for temperature records.
//!
//! On-disk format: one record per line, `date,temperature`,
//! comma-delimited, no header. The whole file is rewritten after
//! every mutation; there is no append path and no locking, since
//! exactly one process instance owns the file at a time.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::models::Entry;

/// Storage interface for the record file.
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a new Store pointing at the record file.
    pub fn new(path: PathBuf) -> Self {
        Store { path }
    }

    #[allow(dead_code)] // Used in tests
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load all records from disk.
    ///
    /// Malformed lines are dropped silently. A missing or unreadable
    /// file is treated the same as an empty one; load never fails,
    /// by contract.
    pub fn load(&self) -> Vec<Entry> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        content
            .lines()
            .filter_map(|line| line.parse::<Entry>().ok())
            .collect()
    }

    /// Rewrite the whole file from `entries`, in sequence order.
    ///
    /// Failure propagates to the caller; the in-memory record set is
    /// untouched either way.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory: {parent:?}"))?;
            }
        }
        let mut file = fs::File::create(&self.path)
            .with_context(|| format!("Failed to open record file for writing: {:?}", self.path))?;
        for entry in entries {
            writeln!(file, "{entry}")
                .with_context(|| format!("Failed to write record file: {:?}", self.path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> Store {
        Store::new(dir.path().join("weather_data.txt"))
    }

    /// Multiset view of a record set, for order-insensitive comparison.
    fn as_multiset(entries: &[Entry]) -> BTreeMap<(String, String), usize> {
        let mut set = BTreeMap::new();
        for e in entries {
            *set.entry((e.date.clone(), e.temp.to_string())).or_insert(0) += 1;
        }
        set
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let entries = vec![
            Entry::new("2024-01-10", 5.0),
            Entry::new("2024-01-11", -2.5),
            Entry::new("2023-06-01", 31.0),
        ];
        store.save(&entries).unwrap();
        let loaded = store.load();
        assert_eq!(as_multiset(&loaded), as_multiset(&entries));

        // A second save/load cycle of what we just read changes nothing.
        store.save(&loaded).unwrap();
        assert_eq!(as_multiset(&store.load()), as_multiset(&entries));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "2024-01-10,5.0\nnot,a,number\n\ngarbage without comma\n",
        )
        .unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], Entry::new("2024-01-10", 5.0));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("nested").join("weather_data.txt"));
        store.save(&[Entry::new("2024-01-10", 5.0)]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&[Entry::new("2024-01-10", 5.0), Entry::new("2024-01-11", 6.0)])
            .unwrap();
        store.save(&[Entry::new("2024-01-12", 7.0)]).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, "2024-01-12");
    }
}
