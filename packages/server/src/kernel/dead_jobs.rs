//! Dead-job cache.
//!
//! Set of job ids whose stream probe failed outright. Membership is append-only:
//! once an id is recorded it stays for the lifetime of the cache, and liveness for
//! that id is answered without another probe.

use std::collections::HashSet;
use std::sync::RwLock;

/// Append-only set of unreachable job ids.
///
/// Shared across concurrent resolvers through `Arc`; inserts commute, so a plain
/// lock around the set is all the coordination needed.
#[derive(Debug, Default)]
pub struct DeadJobCache {
    ids: RwLock<HashSet<i32>>,
}

impl DeadJobCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, job_id: i32) -> bool {
        self.ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&job_id)
    }

    /// Record `job_id` as dead. Returns `true` if it was not already present.
    pub fn insert(&self, job_id: i32) -> bool {
        self.ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(job_id)
    }

    pub fn len(&self) -> usize {
        self.ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
