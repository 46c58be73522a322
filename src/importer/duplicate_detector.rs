// ==========================================
// Tournament Scoring - Duplicate Detector
// ==========================================
// Two sources of duplicates:
// - already persisted (repository probe)
// - accepted earlier in the same run, not flushed yet
// A duplicate is a skip, not a failure.
// ==========================================

use crate::importer::error::RowError;
use crate::repository::RepositoryResult;
use std::collections::HashSet;
use std::hash::Hash;

pub struct DuplicateDetector<K> {
    accepted: HashSet<K>,
}

impl<K: Eq + Hash> DuplicateDetector<K> {
    pub fn new() -> Self {
        Self {
            accepted: HashSet::new(),
        }
    }

    /// Checks one key and remembers it when it is new.
    ///
    /// # Arguments
    /// - key: natural uniqueness key of the record
    /// - line: source line, for the message
    /// - describe: human description of the key, built only on a hit
    /// - persisted: repository probe, skipped on an in-run hit
    ///
    /// # Returns
    /// - Ok(()): new key, now remembered
    /// - Err(RowError::Duplicate): skip the row
    /// - Err(RowError::Unexpected): the probe failed
    pub fn check_and_remember<D, P>(
        &mut self,
        key: K,
        line: usize,
        describe: D,
        persisted: P,
    ) -> Result<(), RowError>
    where
        D: FnOnce() -> String,
        P: FnOnce(&K) -> RepositoryResult<bool>,
    {
        let seen = self.accepted.contains(&key)
            || persisted(&key).map_err(|e| RowError::unexpected(line, e))?;

        if seen {
            return Err(RowError::Duplicate {
                line,
                description: describe(),
            });
        }

        self.accepted.insert(key);
        Ok(())
    }
}

impl<K: Eq + Hash> Default for DuplicateDetector<K> {
    fn default() -> Self {
        Self::new()
    }
}
