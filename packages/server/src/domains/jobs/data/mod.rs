pub mod job;

pub use job::{JobValue, TestJobData, VideoJobData, VideoProfileData};
