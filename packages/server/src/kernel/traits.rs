// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Liveness and URL derivation live in domains/jobs/actions and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseJobSource, BaseStreamProber)

use anyhow::Result;
use async_trait::async_trait;
use ledger_rpc::{JobFilters, RawJobRecord};

// =============================================================================
// Job Source Trait (Infrastructure - ledger RPC)
// =============================================================================

#[async_trait]
pub trait BaseJobSource: Send + Sync {
    /// Fetch one raw job record by ledger id
    async fn get_job(&self, id: i32) -> Result<RawJobRecord>;

    /// Fetch raw job records matching the filters, in ledger order
    async fn get_jobs(&self, filters: &JobFilters) -> Result<Vec<RawJobRecord>>;
}

// =============================================================================
// Stream Prober Trait (Infrastructure - HTTP GET)
// =============================================================================

#[async_trait]
pub trait BaseStreamProber: Send + Sync {
    /// Issue a GET against `url` and return the response status code.
    ///
    /// Transport failures (refused connection, timeout, TLS) are returned as `Err`.
    async fn probe(&self, url: &str) -> Result<u16>;
}
