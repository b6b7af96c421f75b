//! Job query actions
//!
//! Query actions return data directly. RPC failures are returned unchanged so the
//! GraphQL layer reports them as execution errors.

use anyhow::Result;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use ledger_rpc::JobFilters;
use tracing::info;

use crate::domains::jobs::actions::liveness::{mark_unreachable, resolve_live};
use crate::domains::jobs::actions::stream_url::{playlist_name, resolve_url};
use crate::domains::jobs::models::Job;
use crate::kernel::ServerDeps;

/// Get a single job by ledger id.
///
/// `live` and `url` are left unset; the GraphQL field resolvers derive them on demand.
pub async fn get_job(id: i32, deps: &ServerDeps) -> Result<Job> {
    info!(job_id = id, "Getting job");

    let raw = deps.job_source.get_job(id).await?;
    Ok(Job::from(raw))
}

/// Get jobs matching `filters`, with `url` and `live` derived for each.
///
/// With `dead` false only jobs whose stream answered live are returned. Ledger order
/// is preserved either way.
pub async fn get_jobs(
    filters: &JobFilters,
    dead: bool,
    stream_root_url: &str,
    deps: &ServerDeps,
) -> Result<Vec<Job>> {
    info!(?filters, dead, stream_root_url, "Getting jobs");

    let raw_jobs = deps.job_source.get_jobs(filters).await?;
    let jobs = raw_jobs.into_iter().map(Job::from);

    let jobs: Vec<Job> = match deps.probe_concurrency {
        Some(limit) => {
            stream::iter(jobs)
                .map(|job| with_stream_state(job, stream_root_url, deps))
                .buffered(limit.max(1))
                .collect::<Vec<_>>()
                .await
        }
        None => join_all(jobs.map(|job| with_stream_state(job, stream_root_url, deps))).await,
    };

    let total = jobs.len();
    let jobs: Vec<Job> = if dead {
        jobs
    } else {
        jobs.into_iter()
            .filter(|job| job.details().live == Some(true))
            .collect()
    };

    info!(total, returned = jobs.len(), "Resolved jobs");
    Ok(jobs)
}

/// Attach `url` and `live` to a freshly normalized job.
///
/// Test jobs never probe and are always reported not live. A root that cannot be
/// joined leaves the bare playlist name as `url` and counts as an unreachable
/// stream for video jobs.
async fn with_stream_state(mut job: Job, stream_root_url: &str, deps: &ServerDeps) -> Job {
    let known_live = match resolve_url(job.details(), stream_root_url) {
        Ok(url) => {
            job.details_mut().url = Some(url);
            None
        }
        Err(e) => {
            let playlist = playlist_name(&job.details().stream);
            job.details_mut().url = Some(playlist);
            if job.is_video() {
                mark_unreachable(job.details(), anyhow::Error::new(e), deps);
            }
            Some(false)
        }
    };

    let live = match (known_live, &job) {
        (Some(live), _) => live,
        (None, Job::Test(_)) => false,
        (None, Job::Video(details)) => resolve_live(details, stream_root_url, deps).await,
    };
    job.details_mut().live = Some(live);

    job
}
