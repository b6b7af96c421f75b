//! Test harness wiring mock ledger and prober into ServerDeps.
//!
//! Nothing leaves the process: the ledger and every stream are mocks.

use server_core::kernel::test_dependencies::{
    raw_test_job, raw_video_job, MockJobSource, MockStreamProber,
};
use server_core::kernel::{ServerDeps, TestDependencies};
use std::sync::Arc;
use test_context::AsyncTestContext;

use super::GraphQLClient;

/// Root used by the default fixture's stream URLs.
pub const ROOT: &str = "http://root/";

/// Test harness holding the mocks and the deps built from them.
pub struct TestHarness {
    pub deps: TestDependencies,
    pub server_deps: Arc<ServerDeps>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::with_deps(default_fixture())
    }

    async fn teardown(self) {}
}

/// Ledger with one TestJob and three VideoJobs:
/// - job 1 (TestJob, broadcaster 0xB)
/// - job 2 (live, broadcaster 0xB)
/// - job 3 (probe times out, broadcaster 0xC)
/// - job 4 (answers 404, broadcaster 0xB)
pub fn default_fixture() -> TestDependencies {
    TestDependencies::new()
        .mock_job_source(MockJobSource::new().with_jobs(vec![
            raw_test_job(1, "s1", "0xB"),
            raw_video_job(2, "s2", "0xB"),
            raw_video_job(3, "s3", "0xC"),
            raw_video_job(4, "s4", "0xB"),
        ]))
        .mock_prober(
            MockStreamProber::new()
                .with_status("http://root/s2.m3u8", 200)
                .with_failure("http://root/s3.m3u8", "operation timed out")
                .with_status("http://root/s4.m3u8", 404)
                .with_status("http://streams.livepeer.org/s2.m3u8", 200)
                .with_status("http://www.streambox.fr/playlists/x36xhzz/s2.m3u8", 200),
        )
}

impl TestHarness {
    pub fn with_deps(deps: TestDependencies) -> Self {
        init_tracing();

        let server_deps = Arc::new(deps.to_deps());
        Self { deps, server_deps }
    }

    /// GraphQL client sharing this harness's deps.
    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.server_deps.clone())
    }

    /// Number of probes issued so far
    pub fn probe_count(&self) -> usize {
        self.deps.prober.call_count()
    }
}

// Run tests with: RUST_LOG=debug cargo test -- --nocapture
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
