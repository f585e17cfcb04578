//! Best score persistence
//!
//! The best score is stored as a decimal string under a single key so that
//! older saves (and hand-edited ones) stay readable. Failures never stop play:
//! loading falls back to 0 and saving only logs.

pub use crate::platform::storage::StorageError;
use crate::platform::storage::KeyValueStore;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "highScore";

/// Parse a stored best score. Tolerates surrounding whitespace.
pub fn parse_best(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Load the best score, 0 when absent, unreadable or malformed
pub fn load_best<S: KeyValueStore + ?Sized>(store: &S) -> u64 {
    match store.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => match parse_best(&raw) {
            Some(best) => {
                log::info!("Loaded best score {best}");
                best
            }
            None => {
                log::warn!("Ignoring malformed best score {raw:?}");
                0
            }
        },
        Ok(None) => {
            log::info!("No best score saved, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to load best score: {e}");
            0
        }
    }
}

/// Persist the best score
pub fn save_best<S: KeyValueStore + ?Sized>(store: &mut S, best: u64) -> Result<(), StorageError> {
    store.set(BEST_SCORE_KEY, &best.to_string())?;
    log::info!("Saved best score {best}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    /// Store whose every operation fails
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_missing_best_is_zero() {
        assert_eq!(load_best(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_malformed_best_is_zero() {
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, "lots")), 0);
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, "-3")), 0);
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, "")), 0);
    }

    #[test]
    fn test_reads_decimal_string() {
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, "42")), 42);
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, " 7\n")), 7);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_best(&mut store, 31).unwrap();
        assert_eq!(store.get(BEST_SCORE_KEY), Ok(Some("31".to_string())));
        assert_eq!(load_best(&store), 31);
    }

    #[test]
    fn test_failing_store() {
        let mut store = FailingStore;
        assert_eq!(load_best(&store), 0);
        assert_eq!(
            save_best(&mut store, 5),
            Err(StorageError::Backend("quota exceeded".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        assert_eq!(
            StorageError::Io("denied".to_string()).to_string(),
            "storage io error: denied"
        );
    }
}
