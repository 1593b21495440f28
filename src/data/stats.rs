//! Temperature statistics derived from the current record set.

use super::models::Entry;

/// Max/min/average over the temperature field of a record set.
///
/// Always recomputed on demand, never cached; duplicates count with
/// multiplicity in the average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempStats {
    pub high: f64,
    pub low: f64,
    pub avg: f64,
}

impl TempStats {
    /// Compute stats over `entries`, or `None` when there is no data.
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let mut high = f64::NEG_INFINITY;
        let mut low = f64::INFINITY;
        let mut sum = 0.0;
        for entry in entries {
            high = high.max(entry.temp);
            low = low.min(entry.temp);
            sum += entry.temp;
        }
        Some(TempStats {
            high,
            low,
            avg: sum / entries.len() as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_has_no_stats() {
        assert_eq!(TempStats::from_entries(&[]), None);
    }

    #[test]
    fn test_single_entry_collapses() {
        let stats = TempStats::from_entries(&[Entry::new("2024-01-10", 5.0)]).unwrap();
        assert_eq!(stats.high, 5.0);
        assert_eq!(stats.low, 5.0);
        assert_eq!(stats.avg, 5.0);
    }

    #[test]
    fn test_duplicates_weight_the_average() {
        let entries = vec![
            Entry::new("2024-01-10", 10.0),
            Entry::new("2024-01-11", 10.0),
            Entry::new("2024-01-12", 40.0),
        ];
        let stats = TempStats::from_entries(&entries).unwrap();
        assert_eq!(stats.high, 40.0);
        assert_eq!(stats.low, 10.0);
        assert_eq!(stats.avg, 20.0);
    }

    #[test]
    fn test_negative_temperatures() {
        let entries = vec![
            Entry::new("2024-01-10", -12.0),
            Entry::new("2024-01-11", 4.0),
        ];
        let stats = TempStats::from_entries(&entries).unwrap();
        assert_eq!(stats.high, 4.0);
        assert_eq!(stats.low, -12.0);
        assert_eq!(stats.avg, -4.0);
    }
}
