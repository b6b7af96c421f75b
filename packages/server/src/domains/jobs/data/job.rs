use juniper::{graphql_interface, graphql_object, FieldError, FieldResult, GraphQLObject};

use crate::domains::jobs::actions::{resolve_live, resolve_url, FIELD_STREAM_ROOT_URL};
use crate::domains::jobs::models::{self, JobDetails, JobKind, VideoProfile};
use crate::server::graphql::context::GraphQLContext;

/// One transcoding configuration of a job
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(name = "VideoProfile")]
pub struct VideoProfileData {
    pub id: String,
    pub name: String,
    pub bitrate: String,
    pub framerate: i32,
    pub resolution: String,
}

impl From<VideoProfile> for VideoProfileData {
    fn from(profile: VideoProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            bitrate: profile.bitrate,
            framerate: profile.framerate,
            resolution: profile.resolution,
        }
    }
}

fn profile_list(details: &JobDetails) -> Vec<Option<VideoProfileData>> {
    details
        .profiles
        .iter()
        .cloned()
        .map(|profile| Some(VideoProfileData::from(profile)))
        .collect()
}

/// A transcoding job tracked by the ledger
#[graphql_interface(for = [TestJobData, VideoJobData], context = GraphQLContext)]
pub trait Job {
    fn id(&self) -> i32;
    fn broadcaster(&self) -> &str;
    fn profiles(&self) -> Vec<Option<VideoProfileData>>;
    fn stream(&self) -> &str;
    fn transcoder(&self) -> &str;
    #[graphql(name = "type")]
    fn job_type(&self) -> &str;
}

/// Job with no transcoding profiles
#[derive(Debug, Clone)]
pub struct TestJobData {
    details: JobDetails,
}

#[graphql_object(name = "TestJob", context = GraphQLContext, impl = JobValue)]
impl TestJobData {
    fn id(&self) -> i32 {
        self.details.id
    }

    fn broadcaster(&self) -> &str {
        &self.details.broadcaster
    }

    fn profiles(&self) -> Vec<Option<VideoProfileData>> {
        profile_list(&self.details)
    }

    fn stream(&self) -> &str {
        &self.details.stream
    }

    fn transcoder(&self) -> &str {
        &self.details.transcoder
    }

    #[graphql(name = "type")]
    fn job_type(&self) -> &str {
        JobKind::TestJob.as_str()
    }
}

/// Job with at least one transcoding profile; exposes its stream
#[derive(Debug, Clone)]
pub struct VideoJobData {
    details: JobDetails,
}

#[graphql_object(name = "VideoJob", context = GraphQLContext, impl = JobValue)]
impl VideoJobData {
    fn id(&self) -> i32 {
        self.details.id
    }

    fn broadcaster(&self) -> &str {
        &self.details.broadcaster
    }

    fn profiles(&self) -> Vec<Option<VideoProfileData>> {
        profile_list(&self.details)
    }

    fn stream(&self) -> &str {
        &self.details.stream
    }

    fn transcoder(&self) -> &str {
        &self.details.transcoder
    }

    #[graphql(name = "type")]
    fn job_type(&self) -> &str {
        JobKind::VideoJob.as_str()
    }

    /// Whether the stream currently answers. Values from the `jobs` query are reused.
    async fn live(
        &self,
        ctx: &GraphQLContext,
        #[graphql(default = FIELD_STREAM_ROOT_URL)] stream_root_url: String,
    ) -> bool {
        resolve_live(&self.details, &stream_root_url, ctx.deps()).await
    }

    /// Playlist URL of the stream
    fn url(
        &self,
        #[graphql(default = FIELD_STREAM_ROOT_URL)] stream_root_url: String,
    ) -> FieldResult<String> {
        resolve_url(&self.details, &stream_root_url)
            .map_err(|e| FieldError::new(e.to_string(), juniper::Value::null()))
    }
}

impl From<models::Job> for JobValue {
    fn from(job: models::Job) -> Self {
        match job {
            models::Job::Test(details) => TestJobData { details }.into(),
            models::Job::Video(details) => VideoJobData { details }.into(),
        }
    }
}
