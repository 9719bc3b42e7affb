//! Shared in-memory result store

use crate::record::{LoadTestRecord, TestRecord};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Probe and load test results keyed by id
///
/// Writes are insert-or-replace under a short write lock; reads return
/// cloned snapshots so callers never hold the lock. Share it with `Arc`.
#[derive(Debug, Default)]
pub struct ResultStore {
    tests: RwLock<HashMap<String, TestRecord>>,
    load_tests: RwLock<HashMap<String, LoadTestRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_test(&self, record: TestRecord) {
        let mut tests = self.tests.write();
        tests.insert(record.test_id.clone(), record);
    }

    pub fn insert_load_test(&self, record: LoadTestRecord) {
        let mut load_tests = self.load_tests.write();
        load_tests.insert(record.test_id.clone(), record);
    }

    pub fn test(&self, test_id: &str) -> Option<TestRecord> {
        self.tests.read().get(test_id).cloned()
    }

    pub fn load_test(&self, test_id: &str) -> Option<LoadTestRecord> {
        self.load_tests.read().get(test_id).cloned()
    }

    pub fn tests(&self) -> HashMap<String, TestRecord> {
        self.tests.read().clone()
    }

    pub fn load_tests(&self) -> HashMap<String, LoadTestRecord> {
        self.load_tests.read().clone()
    }

    /// Records whose id is in `ids`; unknown ids are skipped
    pub fn select_tests(&self, ids: &[String]) -> Vec<TestRecord> {
        let tests = self.tests.read();
        let mut seen = std::collections::HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| tests.get(id).cloned())
            .collect()
    }

    pub fn test_count(&self) -> usize {
        self.tests.read().len()
    }

    pub fn load_test_count(&self) -> usize {
        self.load_tests.read().len()
    }

    /// Drop every stored record
    pub fn clear(&self) {
        let cleared_tests = {
            let mut tests = self.tests.write();
            let n = tests.len();
            tests.clear();
            n
        };
        let cleared_loads = {
            let mut load_tests = self.load_tests.write();
            let n = load_tests.len();
            load_tests.clear();
            n
        };
        debug!(
            "Cleared {} test records and {} load test records",
            cleared_tests, cleared_loads
        );
    }
}
