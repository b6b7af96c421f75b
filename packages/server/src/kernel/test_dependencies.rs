// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use ledger_rpc::{JobFilters, RawJobRecord, TranscodingOption};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseJobSource, BaseStreamProber, ServerDeps};

// =============================================================================
// Record builders
// =============================================================================

/// Raw ledger record with no transcoding options (normalizes to a TestJob)
pub fn raw_test_job(id: i32, stream: &str, broadcaster: &str) -> RawJobRecord {
    RawJobRecord {
        job_id: id,
        stream_id: stream.to_string(),
        broadcaster: broadcaster.to_string(),
        transcoder: "0xT".to_string(),
        transcoding_options: Vec::new(),
    }
}

/// Raw ledger record with one 720p option (normalizes to a VideoJob)
pub fn raw_video_job(id: i32, stream: &str, broadcaster: &str) -> RawJobRecord {
    RawJobRecord {
        transcoding_options: vec![TranscodingOption {
            hash: format!("h{}", id),
            name: "P720p30fps16x9".to_string(),
            bitrate: "1000k".to_string(),
            framerate: 30,
            resolution: "1280x720".to_string(),
        }],
        ..raw_test_job(id, stream, broadcaster)
    }
}

// =============================================================================
// Mock Job Source
// =============================================================================

pub struct MockJobSource {
    jobs: Arc<Mutex<Vec<RawJobRecord>>>,
    failure: Arc<Mutex<Option<String>>>,
    job_calls: Arc<Mutex<Vec<i32>>>,
    jobs_calls: Arc<Mutex<Vec<JobFilters>>>,
}

impl MockJobSource {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            job_calls: Arc::new(Mutex::new(Vec::new())),
            jobs_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add several records, keeping their order
    pub fn with_jobs(self, jobs: Vec<RawJobRecord>) -> Self {
        self.jobs.lock().unwrap().extend(jobs);
        self
    }

    /// Make every call fail with the given message
    pub fn failing(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Ids passed to get_job
    pub fn job_calls(&self) -> Vec<i32> {
        self.job_calls.lock().unwrap().clone()
    }

    /// Filters passed to get_jobs
    pub fn jobs_calls(&self) -> Vec<JobFilters> {
        self.jobs_calls.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }
}

impl Default for MockJobSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseJobSource for MockJobSource {
    async fn get_job(&self, id: i32) -> Result<RawJobRecord> {
        self.job_calls.lock().unwrap().push(id);
        self.check_failure()?;

        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| job.job_id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("job {} not found", id))
    }

    async fn get_jobs(&self, filters: &JobFilters) -> Result<Vec<RawJobRecord>> {
        self.jobs_calls.lock().unwrap().push(filters.clone());
        self.check_failure()?;

        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .filter(|job| {
                filters
                    .broadcaster
                    .as_ref()
                    .map_or(true, |broadcaster| &job.broadcaster == broadcaster)
            })
            .cloned()
            .collect())
    }
}

// =============================================================================
// Mock Stream Prober
// =============================================================================

#[derive(Debug, Clone)]
enum ProbeResponse {
    Status(u16),
    Failure(String),
}

pub struct MockStreamProber {
    responses: Arc<Mutex<HashMap<String, ProbeResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockStreamProber {
    /// Unconfigured URLs fail as if the connection was refused
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer GETs for `url` with `status`
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), ProbeResponse::Status(status));
        self
    }

    /// Fail GETs for `url` with a transport error
    pub fn with_failure(self, url: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), ProbeResponse::Failure(message.to_string()));
        self
    }

    /// All URLs probed, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if a URL was probed
    pub fn was_probed(&self, url: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|u| u == url)
    }
}

impl Default for MockStreamProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStreamProber for MockStreamProber {
    async fn probe(&self, url: &str) -> Result<u16> {
        self.calls.lock().unwrap().push(url.to_string());

        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(ProbeResponse::Status(status)) => Ok(status),
            Some(ProbeResponse::Failure(message)) => anyhow::bail!("{}", message),
            None => anyhow::bail!("connection refused: {}", url),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub job_source: Arc<MockJobSource>,
    pub prober: Arc<MockStreamProber>,
    pub probe_concurrency: Option<usize>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            job_source: Arc::new(MockJobSource::new()),
            prober: Arc::new(MockStreamProber::new()),
            probe_concurrency: None,
        }
    }

    /// Set a mock job source
    pub fn mock_job_source(mut self, source: MockJobSource) -> Self {
        self.job_source = Arc::new(source);
        self
    }

    /// Set a mock stream prober
    pub fn mock_prober(mut self, prober: MockStreamProber) -> Self {
        self.prober = Arc::new(prober);
        self
    }

    /// Bound the batch probe fan-out
    pub fn probe_concurrency(mut self, limit: usize) -> Self {
        self.probe_concurrency = Some(limit);
        self
    }

    /// Convert into ServerDeps for testing. The mocks stay reachable through `self`.
    pub fn to_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.job_source.clone(),
            self.prober.clone(),
            self.probe_concurrency,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
