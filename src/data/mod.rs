//! Data layer: record models, statistics, and flat-file persistence.

mod models;
mod stats;
mod storage;

pub use models::{Entry, EntryLog, TempBand};
pub use stats::TempStats;
pub use storage::Store;

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn avg_triple(log: &EntryLog) -> Option<(f64, f64, f64)> {
        TempStats::from_entries(log.entries()).map(|s| (s.high, s.low, s.avg))
    }

    /// Full add/add/delete/delete lifecycle against a real file.
    #[test]
    fn test_add_delete_scenario() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("weather_data.txt"));
        let mut log = EntryLog::new(store.load());
        assert!(log.is_empty());

        log.upsert("2024-01-10", 5.0);
        store.save(log.entries()).unwrap();
        assert_eq!(avg_triple(&log), Some((5.0, 5.0, 5.0)));

        log.upsert("2024-01-11", 15.0);
        store.save(log.entries()).unwrap();
        assert_eq!(avg_triple(&log), Some((15.0, 5.0, 10.0)));

        assert_eq!(log.remove("2024-01-10"), 1);
        store.save(log.entries()).unwrap();
        assert_eq!(avg_triple(&log), Some((15.0, 15.0, 15.0)));

        // Deleting the same date again finds nothing and changes nothing.
        assert_eq!(log.remove("2024-01-10"), 0);
        assert_eq!(log.len(), 1);

        // What survived on disk matches the in-memory state.
        let reloaded = EntryLog::new(store.load());
        assert_eq!(reloaded.entries(), log.entries());
    }
}
