//! Server dependencies for resolvers (using traits for testability)
//!
//! This module provides the central dependency container used by the job actions.
//! All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use ledger_rpc::{JobFilters, LedgerRpcService, RawJobRecord};
use std::sync::Arc;

use crate::kernel::{BaseJobSource, BaseStreamProber, DeadJobCache};

// =============================================================================
// LedgerRpcService Adapter (implements BaseJobSource trait)
// =============================================================================

/// Wrapper around LedgerRpcService that implements BaseJobSource trait
pub struct LedgerRpcAdapter(pub Arc<LedgerRpcService>);

impl LedgerRpcAdapter {
    pub fn new(service: Arc<LedgerRpcService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseJobSource for LedgerRpcAdapter {
    async fn get_job(&self, id: i32) -> Result<RawJobRecord> {
        Ok(self.0.get_job(id).await?)
    }

    async fn get_jobs(&self, filters: &JobFilters) -> Result<Vec<RawJobRecord>> {
        Ok(self.0.get_jobs(filters).await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to resolvers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub job_source: Arc<dyn BaseJobSource>,
    pub prober: Arc<dyn BaseStreamProber>,
    /// Created empty with the deps and shared by every request they serve
    pub dead_jobs: Arc<DeadJobCache>,
    /// Upper bound on concurrent probes per `jobs` query; `None` probes every job at once
    pub probe_concurrency: Option<usize>,
}

impl ServerDeps {
    /// Create new ServerDeps with an empty dead-job cache
    pub fn new(
        job_source: Arc<dyn BaseJobSource>,
        prober: Arc<dyn BaseStreamProber>,
        probe_concurrency: Option<usize>,
    ) -> Self {
        Self {
            job_source,
            prober,
            dead_jobs: Arc::new(DeadJobCache::new()),
            probe_concurrency,
        }
    }
}
