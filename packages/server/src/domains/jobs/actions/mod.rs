pub mod liveness;
pub mod queries;
pub mod stream_url;

pub use liveness::{classify_probe, mark_unreachable, probe_job, resolve_live, ProbeOutcome};
pub use queries::{get_job, get_jobs};
pub use stream_url::{playlist_name, resolve_url, StreamUrlError, FIELD_STREAM_ROOT_URL, JOBS_STREAM_ROOT_URL};
