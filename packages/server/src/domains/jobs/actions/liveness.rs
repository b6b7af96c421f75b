//! Stream liveness.
//!
//! A job is live when a GET on its playlist answers exactly 200. Probes that fail
//! outright put the job id in the dead-job cache, and every later check for that id
//! answers `false` without touching the network.

use tracing::{debug, warn};

use crate::domains::jobs::actions::stream_url::resolve_url;
use crate::domains::jobs::models::JobDetails;
use crate::kernel::ServerDeps;

/// Result of one probe, after classification.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Stream answered 200.
    Live,
    /// Stream answered with another status. Not cached; the next check probes again.
    Offline { status: u16 },
    /// No answer at all. The cause is kept here for logging only.
    Unreachable { cause: anyhow::Error },
}

impl ProbeOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, ProbeOutcome::Live)
    }
}

/// Map a raw probe result onto a [`ProbeOutcome`].
///
/// Transport errors, timeouts and anything else that prevents a status code are
/// indistinguishable here and all become `Unreachable`.
pub fn classify_probe(result: anyhow::Result<u16>) -> ProbeOutcome {
    match result {
        Ok(200) => ProbeOutcome::Live,
        Ok(status) => ProbeOutcome::Offline { status },
        Err(cause) => ProbeOutcome::Unreachable { cause },
    }
}

/// Derive the job's URL and probe it once.
pub async fn probe_job(job: &JobDetails, stream_root_url: &str, deps: &ServerDeps) -> ProbeOutcome {
    let url = match resolve_url(job, stream_root_url) {
        Ok(url) => url,
        Err(e) => {
            return ProbeOutcome::Unreachable {
                cause: anyhow::Error::new(e),
            }
        }
    };

    debug!(job_id = job.id, url = %url, "Probing job stream");
    classify_probe(deps.prober.probe(&url).await)
}

/// Whether the job's stream is currently playable.
///
/// Order of evaluation: an explicit `live` on the job, then the dead-job cache,
/// then a probe. Never fails; probe errors are absorbed into `false`.
pub async fn resolve_live(job: &JobDetails, stream_root_url: &str, deps: &ServerDeps) -> bool {
    if let Some(live) = job.live {
        return live;
    }

    if deps.dead_jobs.contains(job.id) {
        debug!(job_id = job.id, "Job is cached as dead, skipping probe");
        return false;
    }

    match probe_job(job, stream_root_url, deps).await {
        ProbeOutcome::Live => true,
        ProbeOutcome::Offline { status } => {
            debug!(job_id = job.id, status, "Job stream is not live");
            false
        }
        ProbeOutcome::Unreachable { cause } => {
            mark_unreachable(job, cause, deps);
            false
        }
    }
}

/// Record `job` in the dead-job cache. `cause` is logged and dropped.
pub fn mark_unreachable(job: &JobDetails, cause: anyhow::Error, deps: &ServerDeps) {
    warn!(job_id = job.id, "Job stream unreachable, marking dead: {:#}", cause);
    deps.dead_jobs.insert(job.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockStreamProber;
    use crate::kernel::TestDependencies;

    fn job(id: i32, stream: &str) -> JobDetails {
        JobDetails {
            id,
            broadcaster: "0xB".to_string(),
            profiles: Vec::new(),
            stream: stream.to_string(),
            transcoder: "0xT".to_string(),
            live: None,
            url: None,
        }
    }

    #[test]
    fn classify_only_200_is_live() {
        assert!(classify_probe(Ok(200)).is_live());
        assert!(!classify_probe(Ok(204)).is_live());
        assert!(matches!(
            classify_probe(Ok(404)),
            ProbeOutcome::Offline { status: 404 }
        ));
        assert!(matches!(
            classify_probe(Err(anyhow::anyhow!("timeout"))),
            ProbeOutcome::Unreachable { .. }
        ));
    }

    #[tokio::test]
    async fn live_stream_is_not_cached() {
        let test_deps = TestDependencies::new()
            .mock_prober(MockStreamProber::new().with_status("http://root/s2.m3u8", 200));
        let deps = test_deps.to_deps();

        assert!(resolve_live(&job(2, "s2"), "http://root/", &deps).await);
        assert!(test_deps.prober.was_probed("http://root/s2.m3u8"));
        assert!(!deps.dead_jobs.contains(2));
    }

    #[tokio::test]
    async fn non_200_is_not_live_and_not_cached() {
        let test_deps = TestDependencies::new()
            .mock_prober(MockStreamProber::new().with_status("http://root/s4.m3u8", 404));
        let deps = test_deps.to_deps();

        assert!(!resolve_live(&job(4, "s4"), "http://root/", &deps).await);
        assert!(!resolve_live(&job(4, "s4"), "http://root/", &deps).await);
        assert!(!deps.dead_jobs.contains(4));
        assert_eq!(test_deps.prober.call_count(), 2);
    }

    #[tokio::test]
    async fn probe_failure_marks_job_dead_for_good() {
        let test_deps = TestDependencies::new().mock_prober(
            MockStreamProber::new()
                .with_failure("http://root/s3.m3u8", "operation timed out")
                .with_status("http://other/s3.m3u8", 200),
        );
        let deps = test_deps.to_deps();

        assert!(!resolve_live(&job(3, "s3"), "http://root/", &deps).await);
        assert!(deps.dead_jobs.contains(3));

        // A root that would answer 200 is never tried.
        assert!(!resolve_live(&job(3, "s3"), "http://other/", &deps).await);
        assert_eq!(test_deps.prober.call_count(), 1);
    }

    #[tokio::test]
    async fn explicit_live_value_short_circuits() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.to_deps();
        deps.dead_jobs.insert(5);

        let mut precomputed = job(5, "s5");
        precomputed.live = Some(true);

        assert!(resolve_live(&precomputed, "http://root/", &deps).await);
        assert_eq!(test_deps.prober.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_root_counts_as_unreachable() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.to_deps();

        assert!(!resolve_live(&job(6, "s6"), "not a url", &deps).await);
        assert!(deps.dead_jobs.contains(6));
        assert_eq!(test_deps.prober.call_count(), 0);
    }

    #[tokio::test]
    async fn caches_are_isolated_per_deps() {
        let test_deps = TestDependencies::new()
            .mock_prober(MockStreamProber::new().with_status("http://root/s7.m3u8", 200));

        let first = test_deps.to_deps();
        first.dead_jobs.insert(7);
        assert!(!resolve_live(&job(7, "s7"), "http://root/", &first).await);

        let second = test_deps.to_deps();
        assert!(resolve_live(&job(7, "s7"), "http://root/", &second).await);
    }
}
