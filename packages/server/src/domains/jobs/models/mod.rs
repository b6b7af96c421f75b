pub mod job;

pub use job::{Job, JobDetails, JobKind, VideoProfile};
