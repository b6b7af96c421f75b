//! Normalized job shape.
//!
//! Ledger records arrive as `RawJobRecord`; everything past the RPC boundary works
//! with [`Job`], whose variant is fixed at construction from the profile list.

use ledger_rpc::{RawJobRecord, TranscodingOption};

/// One transcoding profile, keyed by the option hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProfile {
    pub id: String,
    pub name: String,
    pub bitrate: String,
    pub framerate: i32,
    pub resolution: String,
}

impl From<TranscodingOption> for VideoProfile {
    fn from(option: TranscodingOption) -> Self {
        Self {
            id: option.hash,
            name: option.name,
            bitrate: option.bitrate,
            framerate: option.framerate,
            resolution: option.resolution,
        }
    }
}

/// Fields shared by both job variants.
///
/// `live` and `url` stay `None` until derived (or supplied by precomputed data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub id: i32,
    pub broadcaster: String,
    pub profiles: Vec<VideoProfile>,
    pub stream: String,
    pub transcoder: String,
    pub live: Option<bool>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    TestJob,
    VideoJob,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::TestJob => "TestJob",
            JobKind::VideoJob => "VideoJob",
        }
    }
}

/// A job with its discriminant: `Test` has no profiles, `Video` has at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Test(JobDetails),
    Video(JobDetails),
}

impl Job {
    /// Wrap `details` in the variant its profile list calls for.
    pub fn from_details(details: JobDetails) -> Self {
        if details.profiles.is_empty() {
            Job::Test(details)
        } else {
            Job::Video(details)
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            Job::Test(_) => JobKind::TestJob,
            Job::Video(_) => JobKind::VideoJob,
        }
    }

    pub fn details(&self) -> &JobDetails {
        match self {
            Job::Test(details) | Job::Video(details) => details,
        }
    }

    pub fn details_mut(&mut self) -> &mut JobDetails {
        match self {
            Job::Test(details) | Job::Video(details) => details,
        }
    }

    pub fn id(&self) -> i32 {
        self.details().id
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Job::Video(_))
    }
}

impl From<RawJobRecord> for Job {
    fn from(raw: RawJobRecord) -> Self {
        Job::from_details(JobDetails {
            id: raw.job_id,
            broadcaster: raw.broadcaster,
            profiles: raw
                .transcoding_options
                .into_iter()
                .map(VideoProfile::from)
                .collect(),
            stream: raw.stream_id,
            transcoder: raw.transcoder,
            live: None,
            url: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_job(options: Vec<TranscodingOption>) -> RawJobRecord {
        RawJobRecord {
            job_id: 1,
            stream_id: "s1".to_string(),
            broadcaster: "0xB".to_string(),
            transcoder: "0xT".to_string(),
            transcoding_options: options,
        }
    }

    fn option(hash: &str) -> TranscodingOption {
        TranscodingOption {
            hash: hash.to_string(),
            name: "P1".to_string(),
            bitrate: "1000k".to_string(),
            framerate: 30,
            resolution: "1280x720".to_string(),
        }
    }

    #[test]
    fn test_job_without_profiles() {
        let job = Job::from(raw_job(vec![]));

        assert_eq!(job.kind(), JobKind::TestJob);
        assert_eq!(job.kind().as_str(), "TestJob");

        let details = job.details();
        assert_eq!(details.id, 1);
        assert_eq!(details.stream, "s1");
        assert_eq!(details.broadcaster, "0xB");
        assert_eq!(details.transcoder, "0xT");
        assert!(details.profiles.is_empty());
        assert_eq!(details.live, None);
        assert_eq!(details.url, None);
    }

    #[test]
    fn video_job_renames_hash_to_id() {
        let job = Job::from(raw_job(vec![option("h1")]));

        assert!(job.is_video());
        assert_eq!(
            job.details().profiles,
            vec![VideoProfile {
                id: "h1".to_string(),
                name: "P1".to_string(),
                bitrate: "1000k".to_string(),
                framerate: 30,
                resolution: "1280x720".to_string(),
            }]
        );
    }

    #[test]
    fn profile_order_is_kept() {
        let job = Job::from(raw_job(vec![option("a"), option("b"), option("c")]));

        let ids: Vec<&str> = job
            .details()
            .profiles
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
